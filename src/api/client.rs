//! HTTP client for the Solaria API.

use std::future::Future;

use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::config::ApiConfig;
use super::payload::{SendFacturaPayload, require_transaction_id};
use super::session::Session;
use crate::core::{Customer, CustomerRequest, FacturaPage, SolariaError, Transaction};
use crate::document::{DocumentArtifact, DocumentSink, SavedDocument, bundle_facturas};

/// File name used when a stored factura path has no last segment.
const FALLBACK_FILE_NAME: &str = "factura.pdf";

/// The submission seam of the invoice workflow.
pub trait FacturaApi {
    /// Submit a validated request for `transaction_id`; returns the raw JSON body.
    ///
    /// At most one attempt is made.
    fn send_factura(
        &self,
        request: &CustomerRequest,
        transaction_id: Option<&str>,
    ) -> impl Future<Output = Result<Value, SolariaError>> + Send;
}

impl<A: FacturaApi + Sync> FacturaApi for &A {
    fn send_factura(
        &self,
        request: &CustomerRequest,
        transaction_id: Option<&str>,
    ) -> impl Future<Output = Result<Value, SolariaError>> + Send {
        (**self).send_factura(request, transaction_id)
    }
}

/// A customer's facturas saved as one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacturaBundle {
    pub saved: SavedDocument,
    /// Files that downloaded and went into the archive.
    pub included: usize,
    /// Files listed on the customer record.
    pub requested: usize,
}

/// Client for the Solaria REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Session,
}

#[derive(Deserialize)]
struct TransactionsEnvelope {
    result: TransactionsResult,
}

#[derive(Deserialize)]
struct TransactionsResult {
    data: Vec<Transaction>,
}

#[derive(Deserialize)]
struct CustomersEnvelope {
    result: Vec<Customer>,
}

impl ApiClient {
    /// Build a client for `config`, authenticating every request with `session`.
    pub fn new(config: ApiConfig, session: Session) -> Result<Self, SolariaError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| SolariaError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// `POST /api/v1/send-factura/{transactionId}`.
    ///
    /// # Errors
    ///
    /// `InvalidReference` if `transaction_id` is missing or blank (no request
    /// is made), `RequestFailed` on network errors, non-2xx statuses or a
    /// body that is not JSON.
    pub async fn send_factura(
        &self,
        request: &CustomerRequest,
        transaction_id: Option<&str>,
    ) -> Result<Value, SolariaError> {
        let transaction_id = require_transaction_id(transaction_id)?;
        let url = self
            .config
            .endpoint(&["api", "v1", "send-factura", transaction_id])?;
        let payload = SendFacturaPayload::from(request);

        tracing::info!(%transaction_id, business = request.is_business, "sending factura request");

        let resp = self
            .authorize(self.http.post(url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| request_failed(&e))?;

        let body = read_json(resp).await.inspect_err(|e| {
            tracing::warn!(%transaction_id, error = %e, "factura request failed");
        })?;
        tracing::debug!(%transaction_id, "factura request accepted");
        Ok(body)
    }

    /// `GET /api/v1/get`: all transactions.
    pub async fn get_transactions(&self) -> Result<Vec<Transaction>, SolariaError> {
        let url = self.config.endpoint(&["api", "v1", "get"])?;
        let envelope: TransactionsEnvelope = self.get_json(url).await?;
        Ok(envelope.result.data)
    }

    /// `GET /api/v1/admin/customer`: all customers.
    pub async fn get_customers(&self) -> Result<Vec<Customer>, SolariaError> {
        let url = self.config.endpoint(&["api", "v1", "admin", "customer"])?;
        let envelope: CustomersEnvelope = self.get_json(url).await?;
        Ok(envelope.result)
    }

    /// `GET /api/v1/getAllFactura?page={n}`: one page of facturas (1-based).
    pub async fn get_facturas(&self, page: u32) -> Result<FacturaPage, SolariaError> {
        let mut url = self.config.endpoint(&["api", "v1", "getAllFactura"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string());
        self.get_json(url).await
    }

    /// Fetch a stored factura file by its server-relative path.
    ///
    /// The artifact is named after the last path segment.
    pub async fn download_file(&self, path: &str) -> Result<DocumentArtifact, SolariaError> {
        let url = self.config.file_url(path);
        let file_name = path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME);

        tracing::debug!(%url, "downloading factura file");

        let resp = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| request_failed(&e))?;
        let resp = check_status(resp).await?;
        let bytes = resp.bytes().await.map_err(|e| request_failed(&e))?;

        Ok(DocumentArtifact::from_bytes(file_name, bytes.to_vec()))
    }

    /// Download every stored factura of `customer` and save them through
    /// `sink` as one `facturas.zip`.
    ///
    /// Files that fail to download are logged and left out of the bundle.
    /// Returns `None` without touching the network or the sink when the
    /// customer has no stored facturas.
    ///
    /// # Errors
    ///
    /// `Save` if the bundle cannot be built or the sink rejects it.
    pub async fn download_customer_facturas(
        &self,
        customer: &Customer,
        sink: &impl DocumentSink,
    ) -> Result<Option<FacturaBundle>, SolariaError> {
        if customer.facturas.is_empty() {
            tracing::info!(customer = %customer.id, "no facturas found");
            return Ok(None);
        }

        let mut files = Vec::with_capacity(customer.facturas.len());
        for file in &customer.facturas {
            match self.download_file(&file.path).await {
                Ok(artifact) => files.push(artifact),
                Err(e) => tracing::warn!(path = %file.path, error = %e, "skipping factura file"),
            }
        }

        let saved = sink.save(&bundle_facturas(&files)?)?;
        tracing::info!(
            customer = %customer.id,
            included = files.len(),
            requested = customer.facturas.len(),
            "downloaded facturas"
        );
        Ok(Some(FacturaBundle {
            saved,
            included: files.len(),
            requested: customer.facturas.len(),
        }))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SolariaError> {
        let resp = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(|e| request_failed(&e))?;
        let body = read_json(resp).await?;
        serde_json::from_value(body)
            .map_err(|e| SolariaError::RequestFailed(format!("unexpected response shape: {e}")))
    }
}

impl FacturaApi for ApiClient {
    async fn send_factura(
        &self,
        request: &CustomerRequest,
        transaction_id: Option<&str>,
    ) -> Result<Value, SolariaError> {
        ApiClient::send_factura(self, request, transaction_id).await
    }
}

fn request_failed(e: &reqwest::Error) -> SolariaError {
    SolariaError::RequestFailed(e.to_string())
}

/// Turn a non-2xx response into `RequestFailed` carrying status and body.
async fn check_status(resp: Response) -> Result<Response, SolariaError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(SolariaError::RequestFailed(format!("HTTP {status}: {body}")))
}

async fn read_json(resp: Response) -> Result<Value, SolariaError> {
    let resp = check_status(resp).await?;
    let body = resp.text().await.map_err(|e| request_failed(&e))?;
    serde_json::from_str(&body)
        .map_err(|e| SolariaError::RequestFailed(format!("response is not JSON: {e}")))
}

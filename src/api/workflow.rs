//! Invoice-request submission workflow.
//!
//! `Idle → Validating → Submitting → ExtractingDocument → Done`, with
//! `Failed(reason)` reachable from every step. Nothing is retried; the
//! user resubmits.

use super::client::FacturaApi;
use crate::core::{CustomerForm, CustomerRequest, SolariaError, validate_customer_form};
use crate::document::{DecodedInvoiceDocument, DocumentSink, SavedDocument, extract_document};

/// Where a submission currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Validating,
    Submitting,
    ExtractingDocument,
    Done,
    /// Terminal failure with the error message.
    Failed(String),
}

impl WorkflowState {
    /// Whether a submission is in flight (the submit control stays disabled).
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Validating | Self::Submitting | Self::ExtractingDocument
        )
    }
}

/// Everything produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub request: CustomerRequest,
    pub document: DecodedInvoiceDocument,
    pub saved: SavedDocument,
}

/// Runs form validation, submission, document extraction and saving.
///
/// `submit` takes `&mut self`, so one workflow never has two submissions
/// outstanding.
#[derive(Debug)]
pub struct InvoiceWorkflow<A, S> {
    api: A,
    sink: S,
    state: WorkflowState,
}

impl<A: FacturaApi, S: DocumentSink> InvoiceWorkflow<A, S> {
    pub fn new(api: A, sink: S) -> Self {
        Self {
            api,
            sink,
            state: WorkflowState::Idle,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Back to `Idle`, e.g. when the form dialog is closed.
    pub fn reset(&mut self) {
        self.transition(WorkflowState::Idle);
    }

    /// Validate `form`, submit it for `transaction_id`, and save the returned document.
    ///
    /// On error the state is `Failed` and the error is returned unchanged.
    /// Extraction errors mean the API accepted the request: the invoice may
    /// exist server-side even though no document was saved.
    pub async fn submit(
        &mut self,
        form: &CustomerForm,
        transaction_id: Option<&str>,
    ) -> Result<SubmissionOutcome, SolariaError> {
        let result = self.run(form, transaction_id).await;
        if let Err(e) = &result {
            if e.is_post_submission() {
                tracing::warn!(error = %e, "invoice submitted but document could not be saved");
            }
            self.transition(WorkflowState::Failed(e.to_string()));
        }
        result
    }

    async fn run(
        &mut self,
        form: &CustomerForm,
        transaction_id: Option<&str>,
    ) -> Result<SubmissionOutcome, SolariaError> {
        self.transition(WorkflowState::Validating);
        let request = validate_customer_form(form).map_err(SolariaError::Validation)?;

        self.transition(WorkflowState::Submitting);
        let body = self.api.send_factura(&request, transaction_id).await?;

        self.transition(WorkflowState::ExtractingDocument);
        let document = extract_document(&body)?;
        let saved = self.sink.save(&document.artifact())?;

        self.transition(WorkflowState::Done);
        Ok(SubmissionOutcome {
            request,
            document,
            saved,
        })
    }

    fn transition(&mut self, next: WorkflowState) {
        tracing::debug!(from = ?self.state, to = ?next, "workflow transition");
        self.state = next;
    }
}

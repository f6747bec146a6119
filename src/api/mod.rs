//! Solaria API client and the invoice submission workflow.
//!
//! # Example
//!
//! ```ignore
//! use solaria::api::*;
//! use solaria::core::*;
//! use solaria::document::DirectorySink;
//!
//! let client = ApiClient::new(ApiConfig::from_env()?, Session::bearer(token))?;
//! let mut workflow = InvoiceWorkflow::new(client, DirectorySink::new("downloads"));
//!
//! let form = CustomerFormBuilder::new("María Rodríguez", "112340567", "maria@example.cr").form();
//! match workflow.submit(&form, Some("66a1f0c2")).await {
//!     Ok(outcome) => println!("{}", Notification::saved(&outcome.saved).message()),
//!     Err(e) => eprintln!("{}", Notification::from_error(&e).message()),
//! }
//! ```

mod client;
mod config;
mod notification;
mod payload;
mod session;
mod workflow;

pub use client::{ApiClient, FacturaApi, FacturaBundle};
pub use config::{API_TIMEOUT_ENV, API_URL_ENV, ApiConfig, DEFAULT_API_URL};
pub use notification::{Notification, NotificationLevel};
pub use payload::{SendFacturaPayload, require_transaction_id, transaction_id_from_value};
pub use session::Session;
pub use workflow::{InvoiceWorkflow, SubmissionOutcome, WorkflowState};

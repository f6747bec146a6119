//! Core request types, form validation, and list helpers.
//!
//! This module provides the customer invoice-request model and the
//! client-side rules a form must pass before it is sent to the API.

mod builder;
pub mod countries;
mod error;
pub mod listing;
mod types;
mod validation;

pub use builder::*;
pub use countries::{DEFAULT_DIAL_CODE, DIAL_CODES, DialCode, dial_code_for, is_valid_dial_code};
pub use error::*;
pub use types::*;
pub use validation::*;

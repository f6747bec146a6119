//! # solaria
//!
//! Client library for the Solaria electronic invoicing ("factura") API:
//! validate a customer's invoice request, submit it for a point-of-sale
//! transaction, and save the signed XML invoice the API returns.
//!
//! Invoice numbering, tax computation and the XML sent to the tax
//! authority are owned by the API; this crate only prepares requests and
//! handles responses.
//!
//! ## Quick Start
//!
//! ```rust
//! use solaria::core::*;
//!
//! let form = CustomerFormBuilder::new("Soda La Esquina", "3101123456", "caja@laesquina.cr")
//!     .business("Soda La Esquina S.A.")
//!     .phone_number("+506 8888-7777")
//!     .form();
//!
//! let request = validate_customer_form(&form).unwrap();
//! assert!(request.is_business);
//! assert_eq!(request.phone_number.as_deref(), Some("50688887777"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Request types, form validation, list pagination/filtering |
//! | `document` | `RespuestaXML` extraction and document sinks |
//! | `api` | HTTP client, configuration, submission workflow |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "document")]
pub mod document;

#[cfg(feature = "api")]
pub mod api;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

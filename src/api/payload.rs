use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{CustomerRequest, SolariaError};

/// Request body of `POST /api/v1/send-factura/{transactionId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendFacturaPayload {
    #[serde(rename = "Nombre")]
    pub nombre: String,
    /// Identification number of the customer.
    #[serde(rename = "Numero")]
    pub numero: String,
    #[serde(rename = "CorreoElectronico")]
    pub correo_electronico: String,
    /// Digits only; empty when no phone was given.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    /// Dial code; empty when none was given.
    pub code: String,
    #[serde(rename = "isBusiness")]
    pub is_business: bool,
    /// Empty for non-business customers.
    #[serde(rename = "BusinessName")]
    pub business_name: String,
}

impl From<&CustomerRequest> for SendFacturaPayload {
    fn from(req: &CustomerRequest) -> Self {
        Self {
            nombre: req.full_name.clone(),
            numero: req.identification_number.clone(),
            correo_electronico: req.email.clone(),
            phone_number: req.phone_number.clone().unwrap_or_default(),
            code: req.country_code.clone().unwrap_or_default(),
            is_business: req.is_business,
            business_name: req.business_name.clone().unwrap_or_default(),
        }
    }
}

/// Accept a transaction id only if present and not blank.
pub fn require_transaction_id(transaction_id: Option<&str>) -> Result<&str, SolariaError> {
    match transaction_id.map(str::trim) {
        None => Err(SolariaError::InvalidReference(
            "transaction id is missing".into(),
        )),
        Some("") => Err(SolariaError::InvalidReference(
            "transaction id is empty".into(),
        )),
        Some(id) => Ok(id),
    }
}

/// Accept a transaction id from untyped JSON input.
///
/// `null` and non-string values are rejected like a missing id.
pub fn transaction_id_from_value(value: &Value) -> Result<&str, SolariaError> {
    match value {
        Value::String(s) => require_transaction_id(Some(s.as_str())),
        Value::Null => require_transaction_id(None),
        other => Err(SolariaError::InvalidReference(format!(
            "transaction id must be a string, got {}",
            json_type_name(other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

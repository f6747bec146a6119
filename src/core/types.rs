use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::countries::{DEFAULT_DIAL_CODE, dial_code_for, is_valid_dial_code};

/// Identification document type of the customer (Hacienda code list).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentificationType {
    /// 01: Cédula física (natural person).
    #[default]
    Physical,
    /// 02: Cédula jurídica (legal entity).
    Legal,
    /// 03: DIMEX (resident foreigner).
    Dimex,
    /// 04: NITE (tax identification for non-residents).
    Nite,
}

impl IdentificationType {
    /// Two-digit code as used by the API and the form.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Physical => "01",
            Self::Legal => "02",
            Self::Dimex => "03",
            Self::Nite => "04",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "01" => Some(Self::Physical),
            "02" => Some(Self::Legal),
            "03" => Some(Self::Dimex),
            "04" => Some(Self::Nite),
            _ => None,
        }
    }
}

/// Raw invoice-request form values, exactly as entered.
///
/// Every field is a string; [`validate_customer_form`](super::validate_customer_form)
/// turns it into a typed [`CustomerRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerForm {
    pub identification_id: String,
    pub full_name: String,
    /// Identification type code ("01".."04"); blank means "01".
    pub identification_type: String,
    pub identification_number: String,
    pub email: String,
    pub phone_number: String,
    /// International dial code, e.g. "+506".
    pub country_code: String,
    /// "true" or "false"; blank means "false".
    pub is_business: String,
    pub business_name: String,
}

impl CustomerForm {
    /// Prefill a form from an existing customer record.
    ///
    /// Mirrors picking a customer from the name suggestions. The stored
    /// `code` selects the first listed dial code it starts with, and that
    /// code is removed from the stored phone number so it is not sent twice.
    /// An unlisted but well-formed code is kept as is; anything else falls
    /// back to [`DEFAULT_DIAL_CODE`].
    pub fn from_customer(customer: &Customer) -> Self {
        let is_business = customer.is_business.unwrap_or(false);
        let phone = customer.phone_number.as_deref().unwrap_or_default();

        let (country_code, phone_number) = match dial_code_for(&customer.code) {
            Some(dial) => (
                dial.code.to_string(),
                phone.replacen(dial.code, "", 1).trim().to_string(),
            ),
            None if is_valid_dial_code(customer.code.trim()) => {
                (customer.code.trim().to_string(), phone.to_string())
            }
            None => (DEFAULT_DIAL_CODE.to_string(), phone.to_string()),
        };

        Self {
            identification_id: customer.id.clone(),
            full_name: customer.name.clone(),
            identification_type: if is_business {
                IdentificationType::Legal.code().to_string()
            } else {
                IdentificationType::Physical.code().to_string()
            },
            identification_number: customer.customer_id.clone(),
            email: customer.email.clone(),
            phone_number,
            country_code,
            is_business: is_business.to_string(),
            business_name: customer.business_name.clone().unwrap_or_default(),
        }
    }
}

/// A validated customer invoice request.
///
/// Invariant: when `is_business` is true, `business_name` is `Some` and
/// non-empty and `identification_number` has at least 10 digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub identification_id: String,
    pub full_name: String,
    pub identification_type: IdentificationType,
    /// Digits only, 9 to 12 long.
    pub identification_number: String,
    pub email: String,
    /// Digits only, 8 to 15 long.
    pub phone_number: Option<String>,
    pub country_code: Option<String>,
    pub is_business: bool,
    pub business_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Read-only list records
// ---------------------------------------------------------------------------

/// A point-of-sale transaction an invoice can be issued for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
    #[serde(rename = "dineIn", default)]
    pub dine_in: bool,
    #[serde(default)]
    pub table_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Stored factura file reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacturaFile {
    pub path: String,
}

/// A registered customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    /// Identification number of the customer.
    #[serde(rename = "customerId")]
    pub customer_id: String,
    pub name: String,
    #[serde(rename = "BusinessName", default)]
    pub business_name: Option<String>,
    #[serde(rename = "isBusiness", default)]
    pub is_business: Option<bool>,
    /// Dial code, e.g. "+506".
    #[serde(default)]
    pub code: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub facturas: Vec<FacturaFile>,
}

/// Customer summary embedded in a factura record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacturaCustomer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
}

/// A generated factura.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factura {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "customerId")]
    pub customer: FacturaCustomer,
    #[serde(rename = "isBusiness", default)]
    pub is_business: bool,
    #[serde(rename = "SolariaInvoiceId")]
    pub solaria_invoice_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub path: Option<String>,
}

/// One server-side page of facturas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacturaPage {
    pub data: Vec<Factura>,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

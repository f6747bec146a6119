use super::countries::DEFAULT_DIAL_CODE;
use super::error::SolariaError;
use super::types::*;
use super::validation;

/// Builder for invoice-request forms.
///
/// Starts from the same defaults as a fresh form: identification type
/// "01", dial code "+506", not a business.
///
/// ```
/// use solaria::core::*;
///
/// let request = CustomerFormBuilder::new("María Rodríguez", "112340567", "maria@example.cr")
///     .phone_number("8888-7777")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.phone_number.as_deref(), Some("88887777"));
/// assert_eq!(request.country_code.as_deref(), Some("+506"));
/// ```
#[derive(Debug, Clone)]
pub struct CustomerFormBuilder {
    form: CustomerForm,
}

impl CustomerFormBuilder {
    pub fn new(
        full_name: impl Into<String>,
        identification_number: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            form: CustomerForm {
                identification_id: String::new(),
                full_name: full_name.into(),
                identification_type: IdentificationType::default().code().to_string(),
                identification_number: identification_number.into(),
                email: email.into(),
                phone_number: String::new(),
                country_code: DEFAULT_DIAL_CODE.to_string(),
                is_business: "false".to_string(),
                business_name: String::new(),
            },
        }
    }

    pub fn identification_id(mut self, id: impl Into<String>) -> Self {
        self.form.identification_id = id.into();
        self
    }

    pub fn identification_type(mut self, kind: IdentificationType) -> Self {
        self.form.identification_type = kind.code().to_string();
        self
    }

    pub fn phone_number(mut self, phone: impl Into<String>) -> Self {
        self.form.phone_number = phone.into();
        self
    }

    pub fn country_code(mut self, code: impl Into<String>) -> Self {
        self.form.country_code = code.into();
        self
    }

    /// Mark the customer as a business with the given registered name.
    ///
    /// Also switches the identification type to "02" (cédula jurídica).
    pub fn business(mut self, business_name: impl Into<String>) -> Self {
        self.form.is_business = "true".to_string();
        self.form.business_name = business_name.into();
        self.form.identification_type = IdentificationType::Legal.code().to_string();
        self
    }

    /// The raw form, without validation.
    pub fn form(self) -> CustomerForm {
        self.form
    }

    /// Validate the form and return the typed request.
    pub fn build(self) -> Result<CustomerRequest, SolariaError> {
        validation::validate_customer_form(&self.form).map_err(SolariaError::Validation)
    }
}

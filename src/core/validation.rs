use super::countries::is_valid_dial_code;
use super::error::ValidationError;
use super::types::*;

/// Minimum digits of an identification number.
pub const MIN_ID_DIGITS: usize = 9;
/// Maximum digits of an identification number.
pub const MAX_ID_DIGITS: usize = 12;
/// Minimum digits of a business (cédula jurídica) identification number.
pub const MIN_BUSINESS_ID_DIGITS: usize = 10;
/// Minimum digits of a phone number after stripping separators.
pub const MIN_PHONE_DIGITS: usize = 8;
/// Maximum digits of a phone number after stripping separators.
pub const MAX_PHONE_DIGITS: usize = 15;
/// Minimum characters of the customer's full name.
pub const MIN_NAME_CHARS: usize = 2;

/// Validate a raw invoice-request form.
///
/// Returns the typed request, or every field error found (not just the first).
/// Pure function: no I/O, no clock.
pub fn validate_customer_form(form: &CustomerForm) -> Result<CustomerRequest, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        errors.push(ValidationError::new("full_name", "name is required"));
    } else if full_name.chars().count() < MIN_NAME_CHARS {
        errors.push(ValidationError::new(
            "full_name",
            format!("name must be at least {MIN_NAME_CHARS} characters"),
        ));
    }

    let identification_type = parse_identification_type(&form.identification_type, &mut errors);
    let is_business = parse_is_business(&form.is_business, &mut errors);

    let identification_number = form.identification_number.trim();
    validate_identification_number(identification_number, is_business, &mut errors);

    let email = form.email.trim();
    if email.is_empty() {
        errors.push(ValidationError::new("email", "email is required"));
    } else if !is_valid_email(email) {
        errors.push(ValidationError::new("email", "invalid email address"));
    }

    let phone_number = validate_phone_number(&form.phone_number, &mut errors);

    let country_code = match form.country_code.trim() {
        "" => None,
        code if is_valid_dial_code(code) => Some(code.to_string()),
        code => {
            errors.push(ValidationError::new(
                "country_code",
                format!("invalid dial code '{code}' (expected '+' followed by 1-4 digits)"),
            ));
            None
        }
    };

    let business_name = match form.business_name.trim() {
        name if is_business && name.is_empty() => {
            errors.push(ValidationError::new(
                "business_name",
                "business name is required for business customers",
            ));
            None
        }
        name if is_business => Some(name.to_string()),
        _ => None,
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(CustomerRequest {
        identification_id: form.identification_id.trim().to_string(),
        full_name: full_name.to_string(),
        identification_type,
        identification_number: identification_number.to_string(),
        email: email.to_string(),
        phone_number,
        country_code,
        is_business,
        business_name,
    })
}

fn parse_identification_type(code: &str, errors: &mut Vec<ValidationError>) -> IdentificationType {
    let code = code.trim();
    if code.is_empty() {
        return IdentificationType::default();
    }
    IdentificationType::from_code(code).unwrap_or_else(|| {
        errors.push(ValidationError::new(
            "identification_type",
            format!("unknown identification type '{code}'"),
        ));
        IdentificationType::default()
    })
}

fn parse_is_business(value: &str, errors: &mut Vec<ValidationError>) -> bool {
    match value.trim() {
        "" | "false" => false,
        "true" => true,
        other => {
            errors.push(ValidationError::new(
                "is_business",
                format!("expected 'true' or 'false', got '{other}'"),
            ));
            false
        }
    }
}

fn validate_identification_number(number: &str, is_business: bool, errors: &mut Vec<ValidationError>) {
    const FIELD: &str = "identification_number";

    if number.is_empty() {
        errors.push(ValidationError::new(FIELD, "identification number is required"));
        return;
    }
    if !number.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ValidationError::new(FIELD, "only digits are allowed"));
        return;
    }
    // All ASCII digits, so byte length == digit count.
    let len = number.len();
    if len < MIN_ID_DIGITS {
        errors.push(ValidationError::new(
            FIELD,
            format!("must have at least {MIN_ID_DIGITS} digits"),
        ));
    } else if len > MAX_ID_DIGITS {
        errors.push(ValidationError::new(
            FIELD,
            format!("must have at most {MAX_ID_DIGITS} digits"),
        ));
    } else if is_business && len < MIN_BUSINESS_ID_DIGITS {
        errors.push(ValidationError::new(
            FIELD,
            format!("business identification must have at least {MIN_BUSINESS_ID_DIGITS} digits"),
        ));
    }
}

fn validate_phone_number(raw: &str, errors: &mut Vec<ValidationError>) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    let digits = normalize_phone(raw);
    if (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
        Some(digits)
    } else {
        errors.push(ValidationError::new(
            "phone_number",
            format!(
                "phone number must have {MIN_PHONE_DIGITS}-{MAX_PHONE_DIGITS} digits, got {}",
                digits.len()
            ),
        ));
        None
    }
}

/// Strip everything except ASCII digits from a phone number.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check an email address against the usual `local@domain.tld` shape.
///
/// Local part: letters, digits and `_ ' + - .`, no leading dot, no `..`,
/// not ending in a dot. Domain: at least two labels of letters, digits and
/// inner hyphens, with an alphabetic top-level label of 2+ characters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.'))
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let (tld, rest) = match labels.split_last() {
        Some(split) => split,
        None => return false,
    };
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    rest.iter().all(|label| {
        !label.is_empty()
            && label.as_bytes()[0].is_ascii_alphanumeric()
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

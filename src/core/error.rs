use thiserror::Error;

/// Errors that can occur while validating, submitting, or extracting a factura.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolariaError {
    /// One or more form fields failed validation.
    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The transaction identifier is missing, blank, or not a string.
    #[error("invalid transaction reference: {0}")]
    InvalidReference(String),

    /// Network failure, non-2xx status, or unreadable response body.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// The response carries no `solaria.RespuestaXML` document.
    #[error("response does not contain solaria.RespuestaXML")]
    MissingDocument,

    /// `RespuestaXML` is too short or cannot be split at the payload offset.
    #[error("malformed RespuestaXML: {0}")]
    MalformedDocument(String),

    /// The embedded payload is not valid base64 or not UTF-8 text.
    #[error("failed to decode document: {0}")]
    Decode(String),

    /// The host could not store the downloaded document.
    #[error("failed to save document: {0}")]
    Save(String),

    /// Invalid client configuration (base URL, timeout).
    #[error("configuration error: {0}")]
    Config(String),
}

impl SolariaError {
    /// Field-level errors when this is a [`SolariaError::Validation`].
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Whether the failure happened after the API accepted the request.
    ///
    /// The invoice may already exist server-side in that case.
    pub fn is_post_submission(&self) -> bool {
        matches!(
            self,
            Self::MissingDocument | Self::MalformedDocument(_) | Self::Decode(_) | Self::Save(_)
        )
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single validation error with field name and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Form field the error belongs to (e.g. "identification_number").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

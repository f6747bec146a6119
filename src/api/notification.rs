use crate::core::{SolariaError, ValidationError};
use crate::document::SavedDocument;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// What the user is shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Errors rendered next to their form fields.
    Inline(Vec<ValidationError>),
    /// A transient toast.
    Toast {
        level: NotificationLevel,
        message: String,
    },
}

impl Notification {
    /// Convert any workflow error into a user-facing notification.
    pub fn from_error(err: &SolariaError) -> Self {
        if let SolariaError::Validation(errors) = err {
            return Self::Inline(errors.clone());
        }
        let mut message = match err {
            SolariaError::InvalidReference(_) => "Select a valid transaction first.".to_string(),
            SolariaError::RequestFailed(reason) => {
                format!("Error sending the factura request: {reason}")
            }
            SolariaError::MissingDocument => "The API response did not include RespuestaXML.".to_string(),
            other => format!("Error processing the document: {other}"),
        };
        if err.is_post_submission() {
            message.push_str(" The invoice may already have been issued; check the facturas list before resubmitting.");
        }
        Self::Toast {
            level: NotificationLevel::Error,
            message,
        }
    }

    /// Success toast naming the saved file.
    pub fn saved(saved: &SavedDocument) -> Self {
        Self::Toast {
            level: NotificationLevel::Success,
            message: format!("XML saved as '{}'", saved.file_name),
        }
    }

    /// Flattened message text, field errors joined by newlines.
    pub fn message(&self) -> String {
        match self {
            Self::Inline(errors) => errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Toast { message, .. } => message.clone(),
        }
    }
}

/// Credentials of the signed-in admin, issued by the identity provider.
///
/// Passed explicitly to [`ApiClient`](super::ApiClient); the client never
/// reads login state from anywhere else.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    bearer_token: Option<String>,
}

impl Session {
    /// No credentials; requests are sent without `Authorization`.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Requests carry `Authorization: Bearer <token>`.
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            bearer_token: (!token.trim().is_empty()).then_some(token),
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

use thiserror::Error;

/// Authorization errors for the stock endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),
}

impl AuthError {
    /// Machine-readable code reported in the response envelope
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::AuthenticationRequired | AuthError::InvalidApiKey => "unauthorized",
            AuthError::PermissionDenied(_) => "forbidden",
        }
    }
}

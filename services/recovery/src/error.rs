use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Recovery service error variants, one per caller-facing failure kind.
#[derive(Debug, thiserror::Error)]
pub enum RecoveryServiceError {
    #[error("invalid input")]
    InvalidInput,
    #[error("password must be at least 6 characters")]
    WeakPassword,
    /// Deliberately generic: wrong, expired, and already-used codes are
    /// indistinguishable to the caller.
    #[error("invalid or expired code")]
    InvalidOrExpiredCode,
    #[error("storage unavailable")]
    StorageUnavailable(#[source] anyhow::Error),
    #[error("password update failed, request a new code")]
    IdentityProvider(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl RecoveryServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::IdentityProvider(_) => "IDENTITY_PROVIDER_ERROR",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for RecoveryServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput | Self::WeakPassword => StatusCode::BAD_REQUEST,
            Self::InvalidOrExpiredCode => StatusCode::UNAUTHORIZED,
            Self::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::IdentityProvider(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 5xx only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Infrastructure errors need the anyhow chain logged so the root cause is
        // traceable; the response body never carries it.
        match &self {
            Self::StorageUnavailable(e) | Self::IdentityProvider(e) | Self::Internal(e) => {
                tracing::error!(error = %e, kind = self.kind(), "infrastructure error");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "success": false,
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
            },
        });
        (status, axum::Json(body)).into_response()
    }
}

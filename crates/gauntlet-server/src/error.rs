use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gauntlet_primitives::{AuctionId, PrimitivesError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflicting auction {0} is running")]
    Conflict(AuctionId),
    #[error("Bid authentication failed: {0}")]
    AuthenticationFailure(String),
    #[error("Auction {0} vanished from the registry before closing")]
    InternalInvariantViolation(AuctionId),
    #[error("Auction {0} deadline is out of range")]
    DeadlineOverflow(AuctionId),
    #[error("Broadcast failed: {0}")]
    BroadcastError(String),
}

impl ServerError {
    fn code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            Self::AuthenticationFailure(_) => (StatusCode::UNAUTHORIZED, "authentication_failure"),
            Self::InternalInvariantViolation(_)
            | Self::DeadlineOverflow(_)
            | Self::BroadcastError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl From<PrimitivesError> for ServerError {
    fn from(error: PrimitivesError) -> Self {
        match error {
            PrimitivesError::SignatureError(reason) => Self::AuthenticationFailure(reason),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(json!({ "error": code, "message": self.to_string() })),
        )
            .into_response()
    }
}

pub type Result<T> = core::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[tokio::test]
    async fn renders_json_error_with_status() {
        let response = ServerError::Conflict(AuctionId::new([0, 0, 0, 1])).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "conflict");
        assert_eq!(body["message"], "Conflicting auction 0x00000001 is running");
    }

    #[test]
    fn maps_primitives_errors() {
        assert!(matches!(
            ServerError::from(PrimitivesError::SignatureError("bad".into())),
            ServerError::AuthenticationFailure(_)
        ));
        assert!(matches!(
            ServerError::from(PrimitivesError::ValidationError("bad".into())),
            ServerError::InvalidInput(_)
        ));
    }

    #[test]
    fn status_codes() {
        let cases = [
            (ServerError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (ServerError::AuthenticationFailure("x".into()), StatusCode::UNAUTHORIZED),
            (
                ServerError::InternalInvariantViolation(AuctionId::new([0; 4])),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServerError::DeadlineOverflow(AuctionId::new([0; 4])),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}

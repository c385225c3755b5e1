use gauntlet_primitives::PrimitivesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Failed to parse server url: {0}")]
    ServerUrlParsingError(String),
    #[error("Failed server request: {0}")]
    ServerRequestError(String),
    #[error("Server rejected request with {status} ({code}): {message}")]
    ServerRejected {
        status: u16,
        code: String,
        message: String,
    },
    #[error("Failed to subscribe to server: {0}")]
    ServerSubscriptionError(String),
    #[error("Failed to parse incoming event: {0}")]
    EventParsingError(String),
    #[error("Failed bid signing: {0}")]
    BidSigningError(String),
    #[error("Primitives error: {0}")]
    PrimitivesError(#[from] PrimitivesError),
}

pub type Result<T> = core::result::Result<T, ClientError>;

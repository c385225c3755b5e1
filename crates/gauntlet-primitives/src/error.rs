use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitivesError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Invalid signature: {0}")]
    SignatureError(String),
    #[error("Decoding error: {0}")]
    DecodingError(String),
}

pub type Result<T> = core::result::Result<T, PrimitivesError>;

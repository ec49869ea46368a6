// Error types for the token lifecycle

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Token endpoint error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, AuthError>;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Malformed minting blob: {0}")]
    MalformedBlob(String),

    #[error("Invalid account id {account_id:?}: {reason}")]
    InvalidAccountId { account_id: String, reason: String },

    #[error("Missing environment variable {0}")]
    MissingEnv(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Call to {method} reverted: {reason}")]
    Reverted { method: String, reason: String },

    #[error("Token {0} not found")]
    TokenNotFound(String),

    #[error("Check {check} failed: expected {expected}, got {actual}")]
    CheckFailed {
        check: &'static str,
        expected: String,
        actual: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarnessError {
    /// True when the remote contract rejected the call, as opposed to the
    /// request never reaching it.
    pub fn is_revert(&self) -> bool {
        matches!(self, HarnessError::Reverted { .. })
    }
}

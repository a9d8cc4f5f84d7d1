use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Invalid public key encoding {key:?}: {reason}")]
    InvalidPublicKeyEncoding { key: String, reason: String },

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(f64),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CoreError {
    pub(crate) fn invalid_address(address: &str, reason: impl ToString) -> Self {
        CoreError::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_pubkey(key: &str, reason: impl ToString) -> Self {
        CoreError::InvalidPublicKeyEncoding {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

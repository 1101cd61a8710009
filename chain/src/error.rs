/// Errors raised while building, querying or relaying Algorand transactions.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request fields failed validation. Raised before any node call.
    #[error("{0}")]
    InvalidInput(String),

    /// An account address did not decode or its checksum did not match.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The service is missing a setting the operation needs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP round-trip to the node failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The node answered with a non-2xx status.
    #[error("Node error ({status}): {message}")]
    Node {
        /// HTTP status code.
        status: u16,
        /// Message returned by algod.
        message: String,
    },

    /// The node has no record of the requested resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Base64, base32 or msgpack encoding failed.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The transaction pool refused the transaction.
    #[error("Transaction {tx_id} rejected: {reason}")]
    Rejected {
        /// Transaction id reported by the node.
        tx_id: String,
        /// The pool error text.
        reason: String,
    },

    /// The transaction was accepted but not confirmed within the wait bound.
    #[error("Transaction not confirmed: {tx_id} still pending after {rounds} rounds")]
    NotConfirmed {
        /// Transaction id reported by the node.
        tx_id: String,
        /// Number of rounds waited.
        rounds: u64,
    },
}

impl Error {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error came from request validation rather than a node call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InvalidAddress(_))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Self::Encoding(e.to_string())
    }
}

impl From<rmpv::decode::Error> for Error {
    fn from(e: rmpv::decode::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(Error::invalid_input("missing creator").is_validation());
        assert!(Error::InvalidAddress("abc".to_string()).is_validation());
        assert!(!Error::Config("PLATFORM_WALLET".to_string()).is_validation());
        assert!(!Error::NotConfirmed {
            tx_id: "X".to_string(),
            rounds: 10
        }
        .is_validation());
    }

    #[test]
    fn test_not_confirmed_message() {
        let err = Error::NotConfirmed {
            tx_id: "ABC".to_string(),
            rounds: 10,
        };
        assert_eq!(
            err.to_string(),
            "Transaction not confirmed: ABC still pending after 10 rounds"
        );
    }
}

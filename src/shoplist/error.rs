use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Item name cannot be empty")]
    EmptyName,

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Stored value for '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl ShopError {
    /// True when the stored bytes exist but could not be decoded.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, ShopError::Corrupt { .. })
    }
}

pub type Result<T> = std::result::Result<T, ShopError>;

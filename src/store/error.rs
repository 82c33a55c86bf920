/// Error type for blog store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Storage-level failure (connectivity, server error, cursor failure).
    #[error("storage error: {0}")]
    Backend(String),
    /// A value could not be converted into a storage document.
    #[error("storage encode error: {0}")]
    Encode(String),
}

#[cfg(feature = "mongo")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl From<bson::ser::Error> for StoreError {
    fn from(err: bson::ser::Error) -> Self {
        StoreError::Encode(err.to_string())
    }
}

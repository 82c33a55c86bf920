//! Handler error type and its mapping onto gRPC status codes.

use bson::Bson;
use tonic::{Code, Status};

use crate::store::StoreError;

/// Outcome of a failed blog operation.
///
/// Every variant collapses onto one of three caller-visible codes:
/// `InvalidArgument`, `NotFound` or `Internal` (see [`BlogError::code`]).
#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    /// The wire identifier is not a valid storage identifier.
    #[error("cannot parse blog id {0:?}")]
    InvalidId(String),
    /// A write request arrived without its `blog` payload.
    #[error("missing blog in request")]
    MissingBlog,
    /// No document matched the identifier, or the matching one is unreadable.
    #[error("cannot find blog: {0}")]
    NotFound(String),
    /// The store generated an identifier of an unexpected type.
    #[error("cannot convert generated id {0} to ObjectId")]
    UnexpectedId(Bson),
    /// A stored document could not be decoded into a blog post.
    #[error("error while decoding blog: {0}")]
    Decode(#[from] bson::de::Error),
    /// The storage layer failed.
    #[error("internal error: {0}")]
    Store(#[from] StoreError),
}

impl BlogError {
    /// The status code reported to callers.
    pub fn code(&self) -> Code {
        match self {
            BlogError::InvalidId(_) | BlogError::MissingBlog => Code::InvalidArgument,
            BlogError::NotFound(_) => Code::NotFound,
            BlogError::UnexpectedId(_) | BlogError::Decode(_) | BlogError::Store(_) => {
                Code::Internal
            }
        }
    }
}

impl From<BlogError> for Status {
    fn from(err: BlogError) -> Self {
        Status::new(err.code(), err.to_string())
    }
}

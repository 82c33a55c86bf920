pub mod config;
mod error;
pub mod grpc;
mod model;
pub mod service;
pub mod store;

pub use error::BlogError;
pub use model::{BlogFields, BlogId, BlogPost, BlogRecord};
pub use service::{BlogHandler, BlogStream};
#[cfg(feature = "mongo")]
pub use store::{MongoBlogStore, MongoConfig};
pub use store::{BlogCursor, BlogStore, InMemoryBlogStore, StoreError};

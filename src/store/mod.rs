//! BlogStore - the document store behind the blog handler.
//!
//! The handler issues exactly one store call per operation and interprets the
//! outcome itself: `None` from `find_one` and zero counts from `update_one` /
//! `delete_one` are how "not found" is reported, never as errors.
//!
//! ## Example
//!
//! ```ignore
//! use blog_service::{BlogFields, BlogStore, InMemoryBlogStore};
//!
//! let store = InMemoryBlogStore::new();
//! let id = store.insert(&fields).await?;
//! let doc = store.find_one(&id.as_object_id().unwrap()).await?;
//! ```

mod error;
mod in_memory;
#[cfg(feature = "mongo")]
mod mongo;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use futures::stream::BoxStream;

use crate::model::BlogFields;

pub use error::StoreError;
pub use in_memory::InMemoryBlogStore;
#[cfg(feature = "mongo")]
pub use mongo::{MongoBlogStore, MongoConfig};

/// Cursor over raw documents.
///
/// Dropping the stream releases the underlying cursor, so whoever owns it owns
/// the cleanup.
pub type BlogCursor = BoxStream<'static, Result<Document, StoreError>>;

/// Abstract single-collection document storage for blog posts.
#[async_trait]
pub trait BlogStore: Send + Sync + 'static {
    /// Insert a new document built from `fields`. Returns the identifier the
    /// store generated.
    async fn insert(&self, fields: &BlogFields) -> Result<Bson, StoreError>;

    /// Fetch the document with `_id == id`. Returns None if not found.
    async fn find_one(&self, id: &ObjectId) -> Result<Option<Document>, StoreError>;

    /// `$set` `fields` on the document with `_id == id`. Returns the matched count.
    async fn update_one(&self, id: &ObjectId, fields: &BlogFields) -> Result<u64, StoreError>;

    /// Delete the document with `_id == id`. Returns the deleted count.
    async fn delete_one(&self, id: &ObjectId) -> Result<u64, StoreError>;

    /// Open a cursor over every document, in the store's native scan order.
    async fn find_all(&self) -> Result<BlogCursor, StoreError>;
}

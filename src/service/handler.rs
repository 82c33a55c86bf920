//! BlogHandler — the five blog operations over an injected store.
//!
//! Transport-agnostic: takes and returns `BlogPost`s and reports failures as
//! `BlogError`. The gRPC layer in `crate::grpc` only converts messages.

use std::future;
use std::sync::Arc;

use bson::Document;
use futures::stream::{BoxStream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::error::BlogError;
use crate::model::{BlogId, BlogPost, BlogRecord};
use crate::store::{BlogStore, StoreError};

/// Stream of decoded posts produced by [`BlogHandler::list`].
///
/// Ends after the first `Err`; posts already yielded stay delivered.
pub type BlogStream = BoxStream<'static, Result<BlogPost, BlogError>>;

/// Stateless handler shared by all calls.
pub struct BlogHandler<S> {
    store: Arc<S>,
}

impl<S> Clone for BlogHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: BlogStore> BlogHandler<S> {
    /// Create a handler over the given store.
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    /// Create a handler over a store that is shared with other owners.
    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert a new post. Any `id` on the input is ignored.
    pub async fn create(&self, blog: BlogPost) -> Result<BlogPost, BlogError> {
        info!("CreateBlog called");

        let generated = self.store.insert(&blog.fields()).await.map_err(|e| {
            error!("CreateBlog insert failed: {}", e);
            BlogError::from(e)
        })?;

        let oid = generated
            .as_object_id()
            .ok_or_else(|| BlogError::UnexpectedId(generated.clone()))?;

        let created = blog.with_id(oid.into());
        info!(blog_id = %created.id, "Blog created");
        Ok(created)
    }

    /// Fetch a post by its wire identifier.
    ///
    /// A document that exists but does not decode is reported as `NotFound`,
    /// same as a missing one.
    pub async fn read(&self, blog_id: &str) -> Result<BlogPost, BlogError> {
        info!(blog_id, "ReadBlog called");
        let id = BlogId::parse(blog_id)?;

        let doc = self
            .store
            .find_one(&id.object_id())
            .await?
            .ok_or_else(|| BlogError::NotFound(blog_id.to_string()))?;

        match BlogRecord::decode(doc) {
            Ok(record) => Ok(record.into()),
            Err(e) => {
                warn!(blog_id, "Stored blog does not decode: {}", e);
                Err(BlogError::NotFound(blog_id.to_string()))
            }
        }
    }

    /// Overwrite all three mutable fields of an existing post.
    ///
    /// Returns the input unchanged; storage is not re-read.
    pub async fn update(&self, blog: BlogPost) -> Result<BlogPost, BlogError> {
        info!(blog_id = %blog.id, "UpdateBlog called");
        let id = BlogId::parse(&blog.id)?;

        let matched = self
            .store
            .update_one(&id.object_id(), &blog.fields())
            .await
            .map_err(|e| {
                error!(blog_id = %blog.id, "UpdateBlog failed: {}", e);
                BlogError::from(e)
            })?;

        if matched == 0 {
            return Err(BlogError::NotFound(blog.id));
        }
        Ok(blog)
    }

    /// Remove a post. Returns the identifier that was deleted.
    pub async fn delete(&self, blog_id: &str) -> Result<String, BlogError> {
        info!(blog_id, "DeleteBlog called");
        let id = BlogId::parse(blog_id)?;

        let deleted = self
            .store
            .delete_one(&id.object_id())
            .await
            .map_err(|e| {
                error!(blog_id, "DeleteBlog failed: {}", e);
                BlogError::from(e)
            })?;

        if deleted == 0 {
            return Err(BlogError::NotFound(blog_id.to_string()));
        }
        Ok(blog_id.to_string())
    }

    /// Open a stream over every stored post, in storage scan order.
    ///
    /// Failing to open the cursor fails the call. After that, a cursor or
    /// decode failure is yielded as the final item. Dropping the stream
    /// releases the cursor.
    pub async fn list(&self) -> Result<BlogStream, BlogError> {
        info!("ListBlog called");

        let cursor = self.store.find_all().await.map_err(|e| {
            error!("ListBlog cannot open cursor: {}", e);
            BlogError::from(e)
        })?;

        let blogs = cursor
            .map(decode_listed)
            .scan(false, |failed, item| {
                if *failed {
                    return future::ready(None);
                }
                if let Err(e) = &item {
                    error!("ListBlog stream failed: {}", e);
                    *failed = true;
                }
                future::ready(Some(item))
            });

        debug!("ListBlog cursor opened");
        Ok(blogs.boxed())
    }
}

fn decode_listed(doc: Result<Document, StoreError>) -> Result<BlogPost, BlogError> {
    let record = BlogRecord::decode(doc?)?;
    Ok(record.into())
}

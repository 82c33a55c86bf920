//! InMemoryBlogStore - Vec-backed blog store for testing and development.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use futures::stream::{self, StreamExt};

use super::{BlogCursor, BlogStore, StoreError};
use crate::model::BlogFields;

/// In-memory blog store.
///
/// Documents are kept in insertion order, which is the order `find_all`
/// yields them in. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryBlogStore {
    storage: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryBlogStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document as-is, assigning an `_id` if it has none.
    ///
    /// No shape checks are made, so this can hold documents that do not decode
    /// as blog posts.
    pub fn insert_raw(&self, mut doc: Document) -> Result<Bson, StoreError> {
        let id = match doc.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                doc.insert("_id", id.clone());
                id
            }
        };

        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        if storage.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(StoreError::Backend(format!("duplicate key: _id {}", id)));
        }

        storage.push(doc);
        Ok(id)
    }

    /// Number of stored documents.
    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn has_id(doc: &Document, id: &ObjectId) -> bool {
    matches!(doc.get("_id"), Some(Bson::ObjectId(oid)) if oid == id)
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn insert(&self, fields: &BlogFields) -> Result<Bson, StoreError> {
        let mut doc = bson::to_document(fields)?;
        doc.insert("_id", ObjectId::new());
        self.insert_raw(doc)
    }

    async fn find_one(&self, id: &ObjectId) -> Result<Option<Document>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        Ok(storage.iter().find(|doc| has_id(doc, id)).cloned())
    }

    async fn update_one(&self, id: &ObjectId, fields: &BlogFields) -> Result<u64, StoreError> {
        let set = bson::to_document(fields)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        match storage.iter_mut().find(|doc| has_id(doc, id)) {
            Some(doc) => {
                for (key, value) in set {
                    doc.insert(key, value);
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: &ObjectId) -> Result<u64, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?;

        match storage.iter().position(|doc| has_id(doc, id)) {
            Some(index) => {
                storage.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_all(&self) -> Result<BlogCursor, StoreError> {
        let snapshot = self
            .storage
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".into()))?
            .clone();

        Ok(stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }
}

//! Blog post domain types.
//!
//! `BlogPost` is the transport-neutral shape handed to and returned from the
//! handler. `BlogRecord` is the persisted document, keyed by the store's
//! native `ObjectId`. `BlogFields` is the mutable part of a post and doubles as
//! the `$set` payload for updates.

use std::fmt;

use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

use crate::error::BlogError;

/// Storage identifier of a blog post.
///
/// Wire identifiers are strings; every by-identifier operation goes through
/// [`BlogId::parse`] before touching storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlogId(ObjectId);

impl BlogId {
    /// Parse a wire identifier (24 hex characters).
    pub fn parse(raw: &str) -> Result<Self, BlogError> {
        ObjectId::parse_str(raw)
            .map(BlogId)
            .map_err(|_| BlogError::InvalidId(raw.to_string()))
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BlogId {
    fn from(oid: ObjectId) -> Self {
        BlogId(oid)
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// The caller-owned fields of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogFields {
    pub author_id: String,
    pub title: String,
    pub content: String,
}

/// A blog post as seen by callers. `id` is empty until the store assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPost {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl BlogPost {
    pub fn new(
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            author_id: author_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn fields(&self) -> BlogFields {
        BlogFields {
            author_id: self.author_id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }

    pub fn with_id(mut self, id: BlogId) -> Self {
        self.id = id.to_string();
        self
    }
}

/// Persisted document shape: `{ _id, author_id, title, content }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub author_id: String,
    pub title: String,
    pub content: String,
}

impl BlogRecord {
    /// Decode a raw document returned by the store.
    pub fn decode(doc: Document) -> Result<Self, bson::de::Error> {
        bson::from_document(doc)
    }
}

impl From<BlogRecord> for BlogPost {
    fn from(record: BlogRecord) -> Self {
        BlogPost {
            id: record.id.to_hex(),
            author_id: record.author_id,
            title: record.title,
            content: record.content,
        }
    }
}

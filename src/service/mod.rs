//! service — blog operations, independent of the transport.
//!
//! ```ignore
//! use blog_service::{BlogHandler, BlogPost, InMemoryBlogStore};
//!
//! let handler = BlogHandler::new(InMemoryBlogStore::new());
//! let created = handler.create(BlogPost::new("A", "T", "C")).await?;
//! let read = handler.read(&created.id).await?;
//! ```

mod handler;

pub use handler::{BlogHandler, BlogStream};

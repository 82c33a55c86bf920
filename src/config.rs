//! Configuration for the blog server and demo client.
//!
//! CLI arguments with environment variable fallbacks, using clap.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::ensure;
use clap::Parser;

/// blog-server - gRPC blog post service backed by MongoDB
#[derive(Parser, Debug, Clone)]
#[command(name = "blog-server")]
#[command(about = "gRPC blog post service backed by MongoDB")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:50051")]
    pub listen: SocketAddr,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "devdb")]
    pub mongodb_db: String,

    /// MongoDB collection holding the blog posts
    #[arg(long, env = "MONGODB_COLLECTION", default_value = "blog")]
    pub mongodb_collection: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in milliseconds, for calls that carry no deadline of their own
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value = "30000")]
    pub request_timeout_ms: u64,

    /// Posts buffered ahead of a slow ListBlog caller
    #[arg(long, env = "LIST_BUFFER", default_value = "16")]
    pub list_buffer: usize,
}

impl Args {
    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.request_timeout_ms > 0,
            "REQUEST_TIMEOUT_MS must be greater than 0"
        );
        ensure!(self.list_buffer > 0, "LIST_BUFFER must be greater than 0");
        ensure!(
            !self.mongodb_collection.is_empty(),
            "MONGODB_COLLECTION must not be empty"
        );
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[cfg(feature = "mongo")]
    pub fn mongo_config(&self) -> crate::store::MongoConfig {
        crate::store::MongoConfig {
            uri: self.mongodb_uri.clone(),
            database: self.mongodb_db.clone(),
            collection: self.mongodb_collection.clone(),
        }
    }
}

/// blog-client - walks a blog server through create, read, update, delete and list
#[derive(Parser, Debug, Clone)]
#[command(name = "blog-client")]
pub struct ClientArgs {
    /// Server endpoint
    #[arg(long, env = "BLOG_SERVER", default_value = "http://localhost:50051")]
    pub server: String,
}

//! MongoDB-backed blog store.

use std::time::Duration;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use futures::stream::StreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use super::{BlogCursor, BlogStore, StoreError};
use crate::model::BlogFields;

/// Server selection and connect timeout applied when the URI sets none.
const DEFAULT_MONGO_TIMEOUT: Duration = Duration::from_secs(3);

/// Where to find the blog collection.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

/// Blog store over a single MongoDB collection.
///
/// Works on raw documents so that decoding, and how a decode failure is
/// reported, stays with the handler.
#[derive(Debug, Clone)]
pub struct MongoBlogStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoBlogStore {
    /// Connect and verify the server answers a `ping`.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let options = client_options(&config.uri).await?;
        info!("Connecting to MongoDB at {}", hosts(&options));

        let client = Client::with_options(options)
            .map_err(|e| StoreError::Backend(format!("failed to connect to MongoDB: {}", e)))?;

        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Backend(format!("MongoDB ping failed: {}", e)))?;

        info!(
            "Connected to MongoDB collection '{}.{}'",
            config.database, config.collection
        );

        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        Ok(Self { client, collection })
    }

    /// Close the client's connection pool.
    pub async fn shutdown(self) {
        debug!("Shutting down MongoDB client");
        self.client.shutdown().await;
    }
}

/// Parse `uri`, bounding server selection and connection setup unless the
/// URI sets its own limits.
async fn client_options(uri: &str) -> Result<ClientOptions, StoreError> {
    let mut options = ClientOptions::parse(uri)
        .await
        .map_err(|e| StoreError::Backend(format!("invalid MongoDB URI: {}", e)))?;

    options
        .server_selection_timeout
        .get_or_insert(DEFAULT_MONGO_TIMEOUT);
    options.connect_timeout.get_or_insert(DEFAULT_MONGO_TIMEOUT);
    Ok(options)
}

/// Host list for logging; credentials and options stay out of the logs.
fn hosts(options: &ClientOptions) -> String {
    options
        .hosts
        .iter()
        .map(|host| host.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn by_id(id: &ObjectId) -> Document {
    doc! { "_id": *id }
}

#[async_trait]
impl BlogStore for MongoBlogStore {
    async fn insert(&self, fields: &BlogFields) -> Result<Bson, StoreError> {
        let doc = bson::to_document(fields)?;
        let result = self.collection.insert_one(doc).await?;
        Ok(result.inserted_id)
    }

    async fn find_one(&self, id: &ObjectId) -> Result<Option<Document>, StoreError> {
        Ok(self.collection.find_one(by_id(id)).await?)
    }

    async fn update_one(&self, id: &ObjectId, fields: &BlogFields) -> Result<u64, StoreError> {
        let update = doc! { "$set": bson::to_document(fields)? };
        let result = self.collection.update_one(by_id(id), update).await?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, id: &ObjectId) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(by_id(id)).await?;
        Ok(result.deleted_count)
    }

    async fn find_all(&self) -> Result<BlogCursor, StoreError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.map(|doc| doc.map_err(StoreError::from)).boxed())
    }
}

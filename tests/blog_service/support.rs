//! Test doubles and server bootstrap shared by the blog service suites.

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use blog_service::grpc::messages::Blog;
use blog_service::grpc::{self, BlogServiceClient, GrpcHandler};
use blog_service::{BlogCursor, BlogFields, BlogHandler, BlogStore, InMemoryBlogStore, StoreError};
use bson::oid::ObjectId;
use bson::{Bson, Document};
use futures::stream::{self, Stream, StreamExt};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;

pub fn blog(author_id: &str, title: &str, content: &str) -> Blog {
    Blog {
        id: String::new(),
        author_id: author_id.into(),
        title: title.into(),
        content: content.into(),
    }
}

/// Bind to port 0, spawn the gRPC server, and return a connected client.
pub async fn start_server<S: BlogStore>(handler: GrpcHandler<S>) -> BlogServiceClient<Channel> {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let svc = grpc::grpc_server(handler);
    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(svc)
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    BlogServiceClient::connect(format!("http://{addr}")).await.unwrap()
}

/// A server over a fresh in-memory store, plus a handle on that store.
pub async fn in_memory_server() -> (InMemoryBlogStore, BlogServiceClient<Channel>) {
    let store = InMemoryBlogStore::new();
    let client = start_server(GrpcHandler::new(BlogHandler::new(store.clone()))).await;
    (store, client)
}

/// Wait until the flag is set, failing the test after two seconds.
pub async fn wait_until(flag: &AtomicBool) {
    for _ in 0..200 {
        if flag.load(Ordering::SeqCst) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("flag was never set");
}

// ---------------------------------------------------------------------------
// CountingStore — in-memory store that counts every call
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct CountingStore {
    pub inner: InMemoryBlogStore,
    pub calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlogStore for CountingStore {
    async fn insert(&self, fields: &BlogFields) -> Result<Bson, StoreError> {
        self.tick();
        self.inner.insert(fields).await
    }

    async fn find_one(&self, id: &ObjectId) -> Result<Option<Document>, StoreError> {
        self.tick();
        self.inner.find_one(id).await
    }

    async fn update_one(&self, id: &ObjectId, fields: &BlogFields) -> Result<u64, StoreError> {
        self.tick();
        self.inner.update_one(id, fields).await
    }

    async fn delete_one(&self, id: &ObjectId) -> Result<u64, StoreError> {
        self.tick();
        self.inner.delete_one(id).await
    }

    async fn find_all(&self) -> Result<BlogCursor, StoreError> {
        self.tick();
        self.inner.find_all().await
    }
}

// ---------------------------------------------------------------------------
// BrokenStore — every call fails, except an optional scripted insert id
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct BrokenStore {
    pub inserted_id: Option<Bson>,
}

fn unreachable_backend() -> StoreError {
    StoreError::Backend("connection refused".into())
}

#[async_trait]
impl BlogStore for BrokenStore {
    async fn insert(&self, _fields: &BlogFields) -> Result<Bson, StoreError> {
        self.inserted_id.clone().ok_or_else(unreachable_backend)
    }

    async fn find_one(&self, _id: &ObjectId) -> Result<Option<Document>, StoreError> {
        Err(unreachable_backend())
    }

    async fn update_one(&self, _id: &ObjectId, _fields: &BlogFields) -> Result<u64, StoreError> {
        Err(unreachable_backend())
    }

    async fn delete_one(&self, _id: &ObjectId) -> Result<u64, StoreError> {
        Err(unreachable_backend())
    }

    async fn find_all(&self) -> Result<BlogCursor, StoreError> {
        Err(unreachable_backend())
    }
}

// ---------------------------------------------------------------------------
// ScriptedCursorStore — find_all replays fixed items and reports release
// ---------------------------------------------------------------------------

/// `find_all` yields `items`, then ends, or never ends if `hang` is set.
/// `released` flips once the cursor is dropped.
#[derive(Clone, Default)]
pub struct ScriptedCursorStore {
    pub items: Vec<Result<Document, StoreError>>,
    pub hang: bool,
    pub released: Arc<AtomicBool>,
}

impl ScriptedCursorStore {
    pub fn new(items: Vec<Result<Document, StoreError>>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }
}

struct ReleaseGuard {
    inner: BlogCursor,
    released: Arc<AtomicBool>,
}

impl Stream for ReleaseGuard {
    type Item = Result<Document, StoreError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl BlogStore for ScriptedCursorStore {
    async fn insert(&self, _fields: &BlogFields) -> Result<Bson, StoreError> {
        Err(unreachable_backend())
    }

    async fn find_one(&self, _id: &ObjectId) -> Result<Option<Document>, StoreError> {
        Ok(None)
    }

    async fn update_one(&self, _id: &ObjectId, _fields: &BlogFields) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn delete_one(&self, _id: &ObjectId) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn find_all(&self) -> Result<BlogCursor, StoreError> {
        let items = stream::iter(self.items.clone());
        let inner = if self.hang {
            items.chain(stream::pending()).boxed()
        } else {
            items.boxed()
        };
        Ok(ReleaseGuard {
            inner,
            released: Arc::clone(&self.released),
        }
        .boxed())
    }
}

// ---------------------------------------------------------------------------
// SlowStore — inserts never finish, the cursor yields one document per delay
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct SlowStore {
    pub items: Vec<Document>,
    pub delay: Duration,
}

#[async_trait]
impl BlogStore for SlowStore {
    async fn insert(&self, _fields: &BlogFields) -> Result<Bson, StoreError> {
        futures::future::pending().await
    }

    async fn find_one(&self, _id: &ObjectId) -> Result<Option<Document>, StoreError> {
        Ok(None)
    }

    async fn update_one(&self, _id: &ObjectId, _fields: &BlogFields) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn delete_one(&self, _id: &ObjectId) -> Result<u64, StoreError> {
        Ok(0)
    }

    async fn find_all(&self) -> Result<BlogCursor, StoreError> {
        let delay = self.delay;
        Ok(stream::iter(self.items.clone())
            .then(move |doc| async move {
                tokio::time::sleep(delay).await;
                Ok(doc)
            })
            .boxed())
    }
}

//! gRPC transport — maps the `blog.BlogService` RPCs onto [`BlogHandler`].
//!
//! Uses tonic for the server and client and prost for messages (standard
//! protobuf wire format, no `.proto` file; see `build.rs`).
//!
//! ## RPCs
//!
//! - `CreateBlog`, `ReadBlog`, `UpdateBlog`, `DeleteBlog` — unary.
//! - `ListBlog` — server streaming, one `ListBlogResponse` per stored post.
//!
//! ## Example
//!
//! ```ignore
//! use blog_service::{grpc, BlogHandler, InMemoryBlogStore};
//!
//! let handler = grpc::GrpcHandler::new(BlogHandler::new(InMemoryBlogStore::new()));
//!
//! // Get the server to compose with other tonic routes
//! let svc = grpc::grpc_server(handler.clone());
//!
//! // Or serve directly
//! grpc::serve(handler, "[::1]:50051".parse()?, Duration::from_secs(30), shutdown).await?;
//! ```

pub mod messages;

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::{debug, info};

use crate::error::BlogError;
use crate::service::BlogHandler;
use crate::store::BlogStore;
use messages::{
    CreateBlogRequest, CreateBlogResponse, DeleteBlogRequest, DeleteBlogResponse,
    ListBlogRequest, ListBlogResponse, ReadBlogRequest, ReadBlogResponse, UpdateBlogRequest,
    UpdateBlogResponse,
};

// ---------------------------------------------------------------------------
// Generated service trait + server/client
// ---------------------------------------------------------------------------

include!(concat!(env!("OUT_DIR"), "/blog.BlogService.rs"));

pub use blog_service_client::BlogServiceClient;
pub use blog_service_server::{BlogService, BlogServiceServer};

/// Default capacity of the channel between the list cursor and the caller.
pub const DEFAULT_LIST_BUFFER: usize = 16;

// ---------------------------------------------------------------------------
// Handler implementation
// ---------------------------------------------------------------------------

/// gRPC handler that wraps a [`BlogHandler`] and implements the generated
/// `BlogService` trait.
pub struct GrpcHandler<S> {
    handler: BlogHandler<S>,
    list_buffer: usize,
}

impl<S> Clone for GrpcHandler<S> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            list_buffer: self.list_buffer,
        }
    }
}

impl<S: BlogStore> GrpcHandler<S> {
    pub fn new(handler: BlogHandler<S>) -> Self {
        Self {
            handler,
            list_buffer: DEFAULT_LIST_BUFFER,
        }
    }

    /// How many listed posts may be queued ahead of a slow caller.
    pub fn with_list_buffer(mut self, list_buffer: usize) -> Self {
        self.list_buffer = list_buffer.max(1);
        self
    }
}

#[tonic::async_trait]
impl<S: BlogStore> BlogService for GrpcHandler<S> {
    async fn create_blog(
        &self,
        request: Request<CreateBlogRequest>,
    ) -> Result<Response<CreateBlogResponse>, Status> {
        let blog = request.into_inner().blog.ok_or(BlogError::MissingBlog)?;
        let created = self.handler.create(blog.into()).await?;
        Ok(Response::new(CreateBlogResponse {
            blog: Some(created.into()),
        }))
    }

    async fn read_blog(
        &self,
        request: Request<ReadBlogRequest>,
    ) -> Result<Response<ReadBlogResponse>, Status> {
        let blog = self.handler.read(&request.into_inner().blog_id).await?;
        Ok(Response::new(ReadBlogResponse {
            blog: Some(blog.into()),
        }))
    }

    async fn update_blog(
        &self,
        request: Request<UpdateBlogRequest>,
    ) -> Result<Response<UpdateBlogResponse>, Status> {
        let blog = request.into_inner().blog.ok_or(BlogError::MissingBlog)?;
        let updated = self.handler.update(blog.into()).await?;
        Ok(Response::new(UpdateBlogResponse {
            blog: Some(updated.into()),
        }))
    }

    async fn delete_blog(
        &self,
        request: Request<DeleteBlogRequest>,
    ) -> Result<Response<DeleteBlogResponse>, Status> {
        let blog_id = self.handler.delete(&request.into_inner().blog_id).await?;
        Ok(Response::new(DeleteBlogResponse { blog_id }))
    }

    type ListBlogStream = ReceiverStream<Result<ListBlogResponse, Status>>;

    async fn list_blog(
        &self,
        _request: Request<ListBlogRequest>,
    ) -> Result<Response<Self::ListBlogStream>, Status> {
        let mut blogs = self.handler.list().await?;
        let (tx, rx) = mpsc::channel(self.list_buffer);

        // The task owns the cursor; every exit path drops it. `blogs` already
        // ends after its first error, so the loop only forwards.
        tokio::spawn(async move {
            let mut sent = 0usize;
            loop {
                let next = tokio::select! {
                    _ = tx.closed() => {
                        debug!(sent, "ListBlog cancelled by caller");
                        return;
                    }
                    next = blogs.next() => next,
                };

                let Some(item) = next else { break };
                let item = item
                    .map(|blog| {
                        sent += 1;
                        ListBlogResponse {
                            blog: Some(blog.into()),
                        }
                    })
                    .map_err(Status::from);

                if tx.send(item).await.is_err() {
                    debug!(sent, "ListBlog cancelled by caller");
                    return;
                }
            }
            debug!(sent, "ListBlog finished");
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}

// ---------------------------------------------------------------------------
// Convenience constructors
// ---------------------------------------------------------------------------

/// Create a `BlogServiceServer` from a handler.
pub fn grpc_server<S: BlogStore>(handler: GrpcHandler<S>) -> BlogServiceServer<GrpcHandler<S>> {
    BlogServiceServer::new(handler)
}

/// Bind and serve the gRPC transport at `addr` until `shutdown` resolves.
///
/// Calls without their own `grpc-timeout` are cut off after `request_timeout`.
pub async fn serve<S, F>(
    handler: GrpcHandler<S>,
    addr: SocketAddr,
    request_timeout: Duration,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    S: BlogStore,
    F: Future<Output = ()>,
{
    info!("Serving blog.BlogService on {}", addr);
    tonic::transport::Server::builder()
        .timeout(request_timeout)
        .add_service(grpc_server(handler))
        .serve_with_shutdown(addr, shutdown)
        .await
}

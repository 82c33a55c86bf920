//! blog-client - walks a running blog server through every RPC.

use clap::Parser;
use futures::{Stream, StreamExt};
use tonic::Status;

use blog_service::config::ClientArgs;
use blog_service::grpc::messages::{
    Blog, CreateBlogRequest, DeleteBlogRequest, ListBlogRequest, ListBlogResponse,
    ReadBlogRequest, UpdateBlogRequest,
};
use blog_service::grpc::BlogServiceClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = ClientArgs::parse();

    let mut client = BlogServiceClient::connect(args.server.clone()).await?;
    println!("Client connected to {}", args.server);

    let created = client
        .create_blog(CreateBlogRequest {
            blog: Some(Blog {
                id: String::new(),
                author_id: "Batman".into(),
                title: "Batman's Identity".into(),
                content: "Underneath the mask...".into(),
            }),
        })
        .await?
        .into_inner()
        .blog
        .ok_or_else(|| anyhow::anyhow!("CreateBlog returned no blog"))?;
    println!("Blog created: {:?}\n", created);

    // A malformed id is rejected before the server touches storage.
    match client
        .read_blog(ReadBlogRequest {
            blog_id: "not_found".into(),
        })
        .await
    {
        Ok(resp) => println!("Unexpectedly read blog: {:?}\n", resp.into_inner()),
        Err(status) => println!("Failed to read blog: {:?} {}\n", status.code(), status.message()),
    }

    let read = client
        .read_blog(ReadBlogRequest {
            blog_id: created.id.clone(),
        })
        .await?
        .into_inner();
    println!("Got blog: {:?}\n", read);

    let updated = client
        .update_blog(UpdateBlogRequest {
            blog: Some(Blog {
                id: created.id.clone(),
                author_id: "Batman".into(),
                title: format!(
                    "Batman's Identity (updated:{})",
                    chrono::Local::now().to_rfc2822()
                ),
                content: "Bruce? Is that you?".into(),
            }),
        })
        .await?
        .into_inner();
    println!("Blog updated: {:?}\n", updated);

    let deleted = client
        .delete_blog(DeleteBlogRequest {
            blog_id: created.id.clone(),
        })
        .await?
        .into_inner();
    println!("Blog deleted: {:?}\n", deleted);

    let stream = client.list_blog(ListBlogRequest {}).await?.into_inner();
    let count = print_listing(stream).await?;
    println!("Listed {} blogs", count);

    Ok(())
}

/// Print every listed blog. A stream that ends in an error fails the run.
async fn print_listing<S>(mut stream: S) -> anyhow::Result<usize>
where
    S: Stream<Item = Result<ListBlogResponse, Status>> + Unpin,
{
    let mut count = 0usize;
    while let Some(item) = stream.next().await {
        match item {
            Ok(resp) => {
                count += 1;
                println!("{:?}", resp.blog);
            }
            Err(status) => {
                anyhow::bail!("ListBlog ended with error after {} blogs: {}", count, status);
            }
        }
    }
    Ok(count)
}

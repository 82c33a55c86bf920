//! blog-server - gRPC blog post service backed by MongoDB

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_service::config::Args;
use blog_service::grpc::{self, GrpcHandler};
use blog_service::{BlogHandler, MongoBlogStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("blog_service={},info", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    args.validate()?;

    info!("Blog service starting");
    info!("Listen: {}", args.listen);
    info!("MongoDB collection: {}.{}", args.mongodb_db, args.mongodb_collection);

    let store = MongoBlogStore::connect(&args.mongo_config()).await?;

    let handler = GrpcHandler::new(BlogHandler::new(store.clone())).with_list_buffer(args.list_buffer);

    grpc::serve(handler, args.listen, args.request_timeout(), shutdown_signal()).await?;

    info!("Closing MongoDB connection");
    store.shutdown().await;
    info!("Exited");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Stopping server");
}

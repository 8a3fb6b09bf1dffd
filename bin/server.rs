// Receipt Points - Web Server
// POST /receipts/process, GET /receipts/:id/points

use clap::Parser;
use receipt_points::api::run_server;
use receipt_points::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting receipt-server v{}", receipt_points::VERSION);

    run_server(config).await
}

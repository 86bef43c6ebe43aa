use clap::Parser;
use eyre::Result;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use treesync_server::config::Cli;
use treesync_server::{create_router, seed, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.tracing_filter().into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("building example sync tree");
    let tree = seed::build_example_tree();
    let state = AppState::new(tree);

    let app = create_router(state);

    info!("treesync-server listening on {}", cli.listen);
    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use portfolio_terminal::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quote_server=info,portfolio_terminal=info")),
        )
        .init();

    let port = std::env::var("QUOTE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT);

    server::serve(port).await
}

use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::info;

use webhook_relay::config::Config;
use webhook_relay::create_app;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    info!("Starting webhook relay on {}:{}", config.host, config.port);

    let app = create_app(config.clone());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Webhook endpoint: http://{}/webhook", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

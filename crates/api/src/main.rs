use anyhow::Context;

use taxi_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    taxi_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let app = taxi_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        page_size = config.page_size,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

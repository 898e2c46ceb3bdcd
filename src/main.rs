use anyhow::Context;
use meal_market::api;
use meal_market::config::Config;
use meal_market::lifecycle::{MarketSystem, SystemOptions};
use meal_market::seed::CatalogSeed;
use resource_actor::tracing::setup_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        addr = %config.bind_addr(),
        cart_retention_secs = config.cart_retention.as_secs(),
        promo_codes = config.promo_codes.len(),
        "Starting meal market"
    );

    let market = MarketSystem::new(SystemOptions::from_config(&config));

    let seed = match &config.catalog_seed {
        Some(path) => CatalogSeed::load(path).await?,
        None => CatalogSeed::demo(),
    };
    seed.apply(&market.catalog, &market.accounts)
        .await
        .context("failed to seed catalog")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), "Listening");

    axum::serve(listener, api::router(market.app_state()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    market.shutdown().await?;
    info!("Meal market stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully..."),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully..."),
    }
}

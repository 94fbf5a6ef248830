use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_client::{
    config::AppConfig,
    navigation::LaunchRoute,
    services::catalog_service,
    session::FileStore,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let store = Arc::new(FileStore::new(&config.session_store_path));
    tracing::info!(
        api = %config.api_base_url,
        session_store = %store.path().display(),
        "starting storefront client"
    );
    let state = AppState::new(config, store)?;

    let route = LaunchRoute::resolve(&state.session).await;
    tracing::info!(?route, "launch route resolved");

    if matches!(route, LaunchRoute::MemberHome | LaunchRoute::AdminHome) {
        match catalog_service::list_categories(&state.api).await {
            Ok(categories) => tracing::info!(count = categories.len(), "catalog loaded"),
            Err(err) => tracing::warn!(error = %err, "catalog unavailable"),
        }
    }

    Ok(())
}

use tracing::info;
use bookstore::catalog::controller::app;
use bookstore::catalog::factory::create_catalog_service;
use bookstore::core::controller::AppState;
use bookstore::core::domain::Configuration;
use bookstore::core::library::LibraryResult;
use bookstore::utils::logs::setup_tracing;

#[tokio::main]
async fn main() -> LibraryResult<()> {
    let config = Configuration::from_env()?;
    setup_tracing(&config.log_filter);
    info!(branch = %config.branch_id, store = %config.store, "starting catalog service");

    let catalog = create_catalog_service(&config).await?;
    let addr = config.listen_addr();
    let app = app(AppState::new(catalog));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("catalog service listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

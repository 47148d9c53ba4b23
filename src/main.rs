use std::net::{IpAddr, SocketAddr};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spotbook::{config::Config, store::CatalogStore, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Spotbook API");

    // An inconsistent catalog is a fatal startup error.
    let catalog = match CatalogStore::load(&config.app.data_file) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load catalog from {}: {e:#}", config.app.data_file);
            std::process::exit(1);
        }
    };
    info!(
        "Catalog loaded: {} events, {} spots",
        catalog.events().len(),
        catalog.read_spots().await.len()
    );

    let state = AppState::new(catalog);
    let app = spotbook::router(state);

    let host: IpAddr = config
        .app
        .host
        .parse()
        .expect("HOST must be a valid IP address");
    let addr = SocketAddr::from((host, config.app.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .await
        .expect("Server error");
}

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth_api::config::ServerConfig;
use hearth_api::router::build_app;
use hearth_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );

    // --- Static tables: a bad file aborts startup ---
    let catalog = config.load_catalog().expect("Failed to load price catalog");
    let rules = config.load_rules().expect("Failed to load compatibility rules");
    for dangling in rules.dangling_values(&catalog) {
        tracing::warn!(
            owner = %dangling.owner,
            field = %dangling.field,
            value = %dangling.value,
            "Rule refers to a value the catalog does not offer"
        );
    }
    tracing::info!(
        custom_catalog = config.catalog_path.is_some(),
        custom_rules = config.rules_path.is_some(),
        "Catalog and rule table loaded"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = hearth_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    hearth_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    hearth_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready");

    let app = build_app(AppState {
        pool,
        config: Arc::new(config),
        catalog: Arc::new(catalog),
        rules: Arc::new(rules),
    });

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Hearth API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Shut down cleanly");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal = received, "Draining connections before shutdown");
}

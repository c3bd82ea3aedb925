use axum::{http::HeaderValue, http::Method, routing::get, Router};
use configuration::Config;
use database::TrustStore;
use query::QueryService;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer, AllowOrigin},
    trace::TraceLayer,
};
// Note: Tracing is initialized by the binary, not here.

pub mod error;
pub mod handlers;
pub mod methodology;

pub use methodology::Methodology;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub service: QueryService,
    /// Sent as `X-GTI-Version` on every data response.
    pub api_version: HeaderValue,
    pub methodology: Methodology,
}

impl AppState {
    pub fn new(
        service: QueryService,
        api_version: &str,
        methodology: Methodology,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            service,
            api_version: HeaderValue::from_str(api_version)?,
            methodology,
        })
    }
}

/// Builds the CORS layer. Origins that are not valid header values are
/// skipped; with none left, cross-origin requests are refused.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin.");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

/// Builds the application router. Every route is a read-only GET.
pub fn router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/countries", get(handlers::get_countries))
        .route("/api/score", get(handlers::get_scores))
        .route("/api/country/:iso3", get(handlers::get_country))
        .route("/api/methodology", get(handlers::get_methodology))
        .with_state(state)
        .layer(cors_layer(cors_origins))
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
///
/// Serves until Ctrl-C or SIGTERM, then lets in-flight requests finish.
pub async fn run_server(config: &Config, store: Arc<dyn TrustStore>) -> anyhow::Result<()> {
    let methodology = Methodology::load(&config.methodology.path, &config.server.api_version);
    let state = Arc::new(AppState::new(
        QueryService::new(store),
        &config.server.api_version,
        methodology,
    )?);
    let app = router(state, &config.server.cors_origins);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Web server listening.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C.");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM.");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down."),
    }
}

//! API server implementation

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use ignis_core::IgnisConfig;
use ignis_storage::OccurrenceStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{Result, health, routes};

/// Ignis API server
pub struct Server {
    state: AppState,
}

impl Server {
    /// Creates a server over `store` with the given configuration.
    pub fn new(store: Arc<dyn OccurrenceStore>, config: IgnisConfig) -> Self {
        Self {
            state: AppState::new(store, config),
        }
    }

    /// Handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Full application router: probes, `/api`, and the static fallback.
    pub fn router(&self) -> Router {
        let server = &self.state.config().server;

        let mut app = Router::new()
            .route("/healthz", get(health::healthz))
            .route("/readyz", get(health::readyz))
            .nest("/api", routes::router())
            .fallback_service(ServeDir::new(&server.public_dir))
            .layer(TraceLayer::new_for_http());
        if server.permissive_cors {
            app = app.layer(CorsLayer::permissive());
        }
        app.with_state(self.state.clone())
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.state.config().bind_addr();
        let listener = TcpListener::bind(&addr).await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serves on an already bound listener.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            addr = %addr,
            backend = self.state.store().backend_name(),
            public_dir = %self.state.public_dir().display(),
            "Ignis API listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Ignis API stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C.
///
/// If the signal handler cannot be installed this never resolves, so the
/// server keeps running instead of shutting down at once.
pub async fn shutdown_signal() {
    wait_for_signal(tokio::signal::ctrl_c()).await;
}

async fn wait_for_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

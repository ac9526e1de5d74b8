//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_student_routes};
use crate::config::PaginationConfig;
use crate::core::service::StudentService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_service(InMemoryStudentService::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    service: Option<Arc<dyn StudentService>>,
    pagination: PaginationConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            service: None,
            pagination: PaginationConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the student service (required)
    pub fn with_service(mut self, service: impl StudentService + 'static) -> Self {
        self.service = Some(Arc::new(service));
        self
    }

    /// Set an already shared student service (required)
    pub fn with_shared_service(mut self, service: Arc<dyn StudentService>) -> Self {
        self.service = Some(service);
        self
    }

    /// Override the default and maximum page sizes of the listing endpoint
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for endpoints that don't fit the student CRUD pattern.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - Health routes
    /// - Student CRUD routes
    /// - Custom routes
    ///
    /// wrapped in a request tracing layer.
    pub fn build(mut self) -> Result<Router> {
        let service = self
            .service
            .take()
            .ok_or_else(|| anyhow::anyhow!("StudentService is required. Call .with_service()"))?;

        let state = AppState::new(service).with_page_sizes(
            self.pagination.default_page_size,
            self.pagination.max_page_size,
        );

        let mut app = build_health_routes().merge(build_student_routes(state));
        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_service(service)
    ///     .serve("127.0.0.1:8080").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
///
/// A handler that cannot be installed never fires.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

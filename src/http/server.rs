//! HTTP server assembly.
//!
//! Combines the health and inventory routers, applies request tracing and
//! CORS, and serves on the configured address.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServiceConfig;
use crate::store::ComicStore;

use super::routes::{comic_routes, health_routes, AppState};

pub struct HttpServer {
    config: ServiceConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: ServiceConfig, store: Arc<dyn ComicStore>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    fn build_router(config: &ServiceConfig, store: Arc<dyn ComicStore>) -> Router {
        let state = AppState::new(store);

        // No configured origins means permissive CORS for development
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(comic_routes(state))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the listen address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until shutdown.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();

        info!(%addr, "starting comicshelf HTTP server");

        // Bind through ToSocketAddrs so hostnames resolve too
        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_server_uses_configured_address() {
        let server = HttpServer::new(ServiceConfig::default(), Arc::new(MemoryStore::new()));
        assert_eq!(server.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new(ServiceConfig::default(), Arc::new(MemoryStore::new()));
        let _router = server.router();
    }

    #[test]
    fn test_router_builds_with_origin_list() {
        let config = ServiceConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };

        let server = HttpServer::new(config, Arc::new(MemoryStore::new()));
        let _router = server.router();
    }
}

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServeError, ServeResult};
use crate::router::build_router;
use crate::state::AppState;

/// The Deltaview sync server.
pub struct SyncServer {
    config: ServerConfig,
}

impl SyncServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(Arc::new(AppState::new(&self.config)))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServeResult<()> {
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            accounts = self.config.accounts.len(),
            inject = self.config.enable_inject,
            "deltaview listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServeError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = SyncServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:7001".parse().unwrap()
        );
    }

    #[test]
    fn router_builds() {
        let server = SyncServer::new(ServerConfig::default());
        let _router = server.router();
    }
}

//! Shared application state.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ServerConfig;
use crate::services::{InflightRequests, UploadService};

/// Shared application state, cheap to clone into handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: SqlitePool,
    inflight: InflightRequests,
    uploads: UploadService,
}

impl AppState {
    /// Assemble the state from a loaded config and an open pool.
    #[must_use]
    pub fn new(config: ServerConfig, pool: SqlitePool) -> Self {
        let uploads = UploadService::new(config.upload_dir.clone(), config.max_upload_bytes);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                inflight: InflightRequests::new(),
                uploads,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    #[must_use]
    pub fn inflight(&self) -> &InflightRequests {
        &self.inner.inflight
    }

    #[must_use]
    pub fn uploads(&self) -> &UploadService {
        &self.inner.uploads
    }
}

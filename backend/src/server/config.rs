//! Server configuration: where to listen and where to mirror employees.

use std::net::SocketAddr;

use backend::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Storage used for the employee mirror.
#[derive(Clone)]
pub enum MirrorBackend {
    /// Process-local map; contents are lost on restart.
    Memory,
    /// PostgreSQL through the shared connection pool.
    Postgres(DbPool),
}

impl MirrorBackend {
    /// Short label used in startup logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres(_) => "postgres",
        }
    }
}

/// Everything `create_server` needs besides the upstream adapter.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) mirror: MirrorBackend,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Listen on `bind_addr` and mirror employees in memory.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            mirror: MirrorBackend::Memory,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Mirror employees into PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.mirror = MirrorBackend::Postgres(pool);
        self
    }

    /// Selected mirror storage.
    pub fn mirror(&self) -> &MirrorBackend {
        &self.mirror
    }

    #[cfg(feature = "metrics")]
    /// Record request metrics and expose `/metrics` when `Some`.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

//! Backend entry-point: loads settings, wires the upstream client and mirror
//! store, and serves the employee API.

mod server;

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, run_pending_migrations};
use backend::outbound::upstream::UpstreamHttpSource;
use backend::settings::EmployeeApiSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings(std::env::args_os())?;
    info!(?settings, "settings loaded");

    let source = UpstreamHttpSource::new(
        settings.upstream_base_url()?,
        settings.upstream_timeout(),
        settings.upstream_auth()?,
    )
    .wrap_err("build upstream employee client")?;

    let bind_addr = settings.bind_addr()?;
    let mut config = ServerConfig::new(bind_addr);
    if let Some(pool_config) = settings.pool_config() {
        let database_url = pool_config.database_url().to_owned();
        let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("apply database migrations")?;
        info!(applied, "database migrations complete");
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("build database pool")?;
        config = config.with_db_pool(pool);
    } else {
        info!("no database configured; mirroring employees in memory");
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::prometheus_metrics());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, Arc::new(source), config)
        .wrap_err_with(|| format!("bind HTTP server to {bind_addr}"))?;
    info!(%bind_addr, "employee API listening");
    server.await.wrap_err("run HTTP server")
}

fn load_settings<I>(args: I) -> Result<EmployeeApiSettings>
where
    I: IntoIterator<Item = OsString>,
{
    EmployeeApiSettings::load_from_iter(args).map_err(|err| eyre!("load settings: {err}"))
}

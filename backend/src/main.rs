//! Storefront entry-point: applies migrations, provisions the admin account,
//! and serves the catalogue pages and JSON API.

mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use color_eyre::eyre::{Context, eyre};
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppConfig, ServerConfig, create_server};
use storefront::domain::{AdminBootstrap, ensure_admin};
use storefront::inbound::http::health::HealthState;
use storefront::inbound::http::session_config::key_fingerprint;
use storefront::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "PC parts catalogue server")]
struct Cli {
    /// Address to listen on; overrides `BIND_ADDR`.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let mut config = AppConfig::from_env(&DefaultEnv::new()).wrap_err("invalid configuration")?;
    if let Some(bind) = cli.bind {
        config = config.with_bind_addr(bind);
    }
    info!(
        fingerprint = %key_fingerprint(&config.session.key),
        cookie_secure = config.session.cookie_secure,
        "cookie key loaded"
    );

    let database_url = config.database_url.clone();
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")?
        .wrap_err("database migrations failed")?;

    let pool_config = PoolConfig::new(&config.database_url).with_max_size(config.pool_max_size);
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("database pool unavailable")?;
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let catalogue = Arc::new(DieselCatalogueRepository::new(pool));

    match ensure_admin(users.as_ref(), &config.admin_password)
        .await
        .map_err(|err| eyre!("admin bootstrap failed: {err}"))?
    {
        AdminBootstrap::Created(id) => info!(user_id = %id, "admin account created"),
        AdminBootstrap::AlreadyPresent => info!("admin account already present"),
    }

    let bind_addr = config.bind_addr;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(config.session, bind_addr, users, catalogue),
    )
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");

    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}

//! Embedded PostgreSQL harness for the Diesel adapter suites.
//!
//! Each [`EmbeddedDatabase`] owns a throwaway cluster with the schema
//! migrated, plus a Tokio runtime for driving the async adapters from
//! synchronous tests. The cluster stops when the value is dropped.

pub mod cluster_skip;
pub mod pg_embed;

use pg_embedded_setup_unpriv::TestCluster;
use storefront::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;

pub use cluster_skip::handle_cluster_setup_failure;

/// Database every fresh cluster already has.
const DATABASE_NAME: &str = "postgres";

pub struct EmbeddedDatabase {
    pub pool: DbPool,
    pub database_url: String,
    runtime: Runtime,
    _cluster: TestCluster,
}

impl EmbeddedDatabase {
    /// Start a cluster, apply migrations, and open a small pool.
    pub fn start() -> Result<Self, String> {
        let cluster = pg_embed::test_cluster()?;
        let database_url = cluster.connection().database_url(DATABASE_NAME).to_string();
        run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let config = PoolConfig::new(database_url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            pool,
            database_url,
            runtime,
            _cluster: cluster,
        })
    }

    /// Drive an adapter call to completion.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

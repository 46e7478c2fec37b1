//! Process configuration read from the environment at start-up.

use std::net::SocketAddr;

use mockable::Env;
use storefront::inbound::http::session_config::{
    SessionConfigError, SessionSettings, session_settings_from_env,
};
use tracing::warn;
use zeroize::Zeroizing;

pub(crate) const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub(crate) const BIND_ADDR_ENV: &str = "BIND_ADDR";
pub(crate) const ADMIN_PASSWORD_ENV: &str = "ADMIN_PASSWORD";
pub(crate) const POOL_MAX_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";

const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/pc_parts";
const DEFAULT_ADMIN_PASSWORD: &str = "password";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Everything the binary needs to start serving.
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Applied only when the `admin` account is first created.
    pub admin_password: Zeroizing<String>,
    pub pool_max_size: u32,
    pub session: SessionSettings,
}

/// Invalid start-up configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error(transparent)]
    Session(#[from] SessionConfigError),
}

impl AppConfig {
    /// Read configuration, applying development defaults for unset values.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let database_url = env
            .string(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let bind_addr = match env.string(BIND_ADDR_ENV) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value: raw,
                expected: "host:port",
            })?,
            None => default_bind_addr(),
        };

        let admin_password = Zeroizing::new(match env.string(ADMIN_PASSWORD_ENV) {
            Some(value) if !value.is_empty() => value,
            _ => {
                warn!("ADMIN_PASSWORD not set; the bootstrap admin uses the default password");
                DEFAULT_ADMIN_PASSWORD.to_owned()
            }
        });

        let pool_max_size = match env.string(POOL_MAX_SIZE_ENV) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        name: POOL_MAX_SIZE_ENV,
                        value: raw,
                        expected: "a positive integer",
                    });
                }
            },
            None => DEFAULT_POOL_MAX_SIZE,
        };

        Ok(Self {
            database_url,
            bind_addr,
            admin_password,
            pool_max_size,
            session: session_settings_from_env(env)?,
        })
    }

    /// Override the bind address, e.g. from the command line.
    #[must_use]
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from a `CARDS_`-prefixed environment variable, a
//! configuration file, or the command line.

use actix_web::http::header::HeaderName;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::middleware::DEFAULT_IDENTITY_HEADER;
use backend::outbound::persistence::DEFAULT_POOL_SIZE;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("identity header `{value}` is not a valid header name")]
    IdentityHeader { value: String },
}

/// Runtime configuration for the cards server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARDS")]
pub struct AppSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without it cards and users live in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Request header carrying the caller's user id.
    pub identity_header: Option<String>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Parsed identity header name, falling back to `x-user-id`.
    pub fn identity_header(&self) -> Result<HeaderName, SettingsError> {
        let raw = self
            .identity_header
            .as_deref()
            .unwrap_or(DEFAULT_IDENTITY_HEADER);
        HeaderName::from_bytes(raw.trim().as_bytes()).map_err(|_| SettingsError::IdentityHeader {
            value: raw.to_owned(),
        })
    }
}

//! Backend entry-point: loads settings, wires the card and user stores, and
//! serves the REST API with its OpenAPI docs.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use server::settings::AppSettings;
use server::{ServerConfig, build_http_state, connect_store, create_server};

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

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let identity_header = settings.identity_header()?;
    let store = connect_store(&settings)
        .await
        .wrap_err("failed to prepare the card store")?;

    let config = ServerConfig::new(settings.host(), settings.port(), build_http_state(store))
        .with_identity_header(identity_header);
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to bind HTTP server")?;

    info!(host = settings.host(), port = settings.port(), "cards API listening");
    server.await.wrap_err("HTTP server failed")
}

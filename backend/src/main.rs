//! Backend entry-point: wires REST endpoints and OpenAPI docs.

mod server;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use server::ServerConfig;

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Workspace membership backend")]
struct Cli {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: std::net::SocketAddr,

    /// File holding the session signing key material.
    #[arg(long, env = "SESSION_KEY_FILE", default_value = "/var/run/secrets/session_key")]
    session_key_file: String,

    /// Set the `Secure` flag on the session cookie.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    cookie_secure: bool,

    /// Allow an ephemeral session key when the key file is unreadable.
    /// Sessions then die with the process; development only.
    #[arg(
        long,
        env = "SESSION_ALLOW_EPHEMERAL",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    allow_ephemeral_key: bool,
}

fn load_session_key(cli: &Cli) -> std::io::Result<Key> {
    match std::fs::read(&cli.session_key_file) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(err) => {
            if cfg!(debug_assertions) || cli.allow_ephemeral_key {
                warn!(path = %cli.session_key_file, error = %err,
                    "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {}: {err}",
                    cli.session_key_file
                )))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let cli = Cli::parse();
    let key = load_session_key(&cli)?;
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(key, cli.cookie_secure, SameSite::Lax, cli.bind_addr);

    server::create_server(health_state, config)?.await
}

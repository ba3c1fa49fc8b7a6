//! form-server binary.
//!
//! Run:
//! ```bash
//! # pretty logs (default); PORT optional
//! cargo run -p form-server
//!
//! # JSON logs on a custom port
//! LOG_FORMAT=json PORT=8080 cargo run -p form-server
//! ```

use std::net::SocketAddr;

use form_server::{app, config, AppState};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&cfg);
    cfg.warn_if_insecure();

    let state = match AppState::new() {
        Ok(s) => s,
        Err(e) => {
            error!(err = %e, "failed to build validator");
            std::process::exit(1);
        }
    };
    let router = app(state, &cfg);

    let addr = SocketAddr::new(cfg.bind_addr, cfg.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, err = %e, "bind failed");
            std::process::exit(1);
        }
    };
    info!(%addr, "form-server listening");
    if let Err(e) = axum::serve(listener, router).await {
        error!(err = %e, "server error");
        std::process::exit(1);
    }
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stdout),
                )
                .init();
        }
    }
}

#![forbid(unsafe_code)]

use pousada_server::{build_router, AppState, ServerConfig};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_duration_secs(name: &str, default_secs: u64) -> Duration {
    Duration::from_secs(env_u64(name, default_secs))
}

fn env_list(name: &str) -> Option<Vec<String>> {
    let raw = env::var(name).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    Some(items)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn config_from_env() -> ServerConfig {
    let defaults = ServerConfig::default();
    ServerConfig {
        bind_addr: env::var("POUSADA_BIND").unwrap_or(defaults.bind_addr),
        db_path: env::var("POUSADA_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path),
        cache_ttl: env_duration_secs("POUSADA_CACHE_TTL_SECS", defaults.cache_ttl.as_secs()),
        cache_max_entries: env_usize("POUSADA_CACHE_MAX_ENTRIES", defaults.cache_max_entries),
        token_ttl: env_duration_secs("POUSADA_TOKEN_TTL_SECS", defaults.token_ttl.as_secs()),
        auth_secret: env::var("POUSADA_AUTH_SECRET")
            .map(String::into_bytes)
            .unwrap_or(defaults.auth_secret),
        cors_allowed_origins: env_list("POUSADA_CORS_ALLOWED_ORIGINS")
            .unwrap_or(defaults.cors_allowed_origins),
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("register SIGTERM");
        let mut sigint = signal(SignalKind::interrupt()).expect("register SIGINT");
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let config = config_from_env();
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config);
    state
        .db
        .init()
        .await
        .map_err(|e| format!("schema bootstrap failed: {e}"))?;

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("pousada-server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))
}

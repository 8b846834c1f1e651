//! Process-wide `tracing` subscriber setup, installed once before any other component
//! runs. Replaces the original's ad hoc `print`-style logger with structured,
//! level-filtered events every layer (decoder, pipeline, node/storage adapters) writes
//! through via `tracing::{info,warn,debug,error}!`.

pub fn init() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

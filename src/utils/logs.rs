use tracing_subscriber::EnvFilter;

// JSON lines to stdout, filtered by RUST_LOG-style directives
pub fn setup_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter)
        .unwrap_or_else(|_| EnvFilter::new(crate::core::domain::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // log collectors would show ANSI color codes verbatim.
        .with_ansi(false)
        .json()
        .init();
}

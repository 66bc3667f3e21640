use tracing_subscriber::EnvFilter;

/// Logs to stderr without timestamps; CloudWatch stamps ingestion time itself.
/// Stdout stays free for command output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber writing human-readable lines to stderr.
///
/// Honors `RUST_LOG`; defaults to `info`. Stdout stays reserved for the
/// transition log and summary so it can be piped.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Initializes the tracing/logging infrastructure for the bridge.
///
/// Structured logging via `tracing-subscriber`'s fmt layer, filtered by `RUST_LOG`
/// and falling back to `info` when the variable is unset.
///
/// # Environment Variables
///
/// - `RUST_LOG=debug` - Every received command and dirty-state change
/// - `RUST_LOG=interactive_bridge=warn` - Only rejected commands and faults
///
/// Calling it twice is harmless; the second install is ignored.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

use tracing_subscriber::EnvFilter;

/// Initialize stderr logging. `RUST_LOG` wins over `verbose`.
///
/// Records emitted through the `log` facade by `dl-core` are forwarded into
/// the subscriber.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "warn,dl_core=debug,dl_cli=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

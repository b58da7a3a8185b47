use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over the `debug` flag.
pub fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "abujafinder=debug"
    } else {
        "abujafinder=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

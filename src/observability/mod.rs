//! Structured logging setup using the tracing ecosystem.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. Calling this
/// more than once is a no-op (the second registration fails silently),
/// which keeps test binaries that share a process safe.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_reentrant() {
        init_tracing();
        init_tracing();
    }
}

//! Tracing initialisation.
//!
//! Output goes to stderr only. In hidden mode there is no console attached, so
//! events are simply dropped; the failure dialog stays the user-facing channel.

use tracing_subscriber::{prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

/// Initialize tracing. Call once at process startup; later calls are no-ops.
/// `RUST_LOG` takes precedence over `PYLAUNCH_LOG_LEVEL` / `PYLAUNCH_QUIET`.
pub fn init_tracing(cfg: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.effective_level()));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice_is_harmless() {
        let cfg = ObservabilityConfig {
            quiet: true,
            log_level: "pylaunch=info".to_string(),
            log_json: false,
        };
        init_tracing(&cfg);
        init_tracing(&cfg);
        tracing::info!("still alive");
    }
}

//! Tracing setup for the engine binary.
//!
//! The filter comes from `RUST_LOG` when set; otherwise the configured level
//! applies to this crate only, with dependencies held at `warn` so pipeline
//! stage events stay readable.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("configured log level '{value}' is not a valid tracing directive")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("tracing subscriber could not be installed: {0}")]
    Init(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => crate_scoped_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()?;
    Ok(())
}

fn crate_scoped_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(format!("warn,upzone={level}")).map_err(|source| TelemetryError::Filter {
        value: level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_scoped_filter_accepts_plain_levels() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(crate_scoped_filter(level).is_ok(), "{level} rejected");
        }
    }

    #[test]
    fn crate_scoped_filter_rejects_garbage() {
        let err = crate_scoped_filter("no/such==level").expect_err("must fail");
        assert!(matches!(err, TelemetryError::Filter { value, .. } if value == "no/such==level"));
    }
}

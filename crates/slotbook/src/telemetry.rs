use crate::config::TelemetryConfig;
use std::env;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    InvalidDirectives {
        directives: String,
        source: ParseError,
    },
    AlreadyInitialized(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidDirectives { directives, .. } => {
                write!(f, "log filter directives '{directives}' do not parse")
            }
            TelemetryError::AlreadyInitialized(err) => {
                write!(f, "tracing subscriber already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidDirectives { source, .. } => Some(source),
            TelemetryError::AlreadyInitialized(err) => Some(&**err),
        }
    }
}

/// Pick the filter directives for this process: `RUST_LOG` when set,
/// otherwise the configured level. Both sources are validated, so a typo in
/// either fails startup instead of silently logging nothing.
fn resolve_directives(config: &TelemetryConfig) -> String {
    env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| config.log_level.clone())
}

fn parse_directives(directives: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(directives).map_err(|source| TelemetryError::InvalidDirectives {
        directives: directives.to_string(),
        source,
    })
}

/// Install the global tracing subscriber for the scheduling service.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = parse_directives(&resolve_directives(config))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_directives_parse() {
        assert!(parse_directives("info").is_ok());
        assert!(parse_directives("slotbook=debug,axum=warn").is_ok());
    }

    #[test]
    fn malformed_directives_are_rejected_with_the_input() {
        let error = parse_directives("flob=flib=flub").expect_err("directives rejected");
        match &error {
            TelemetryError::InvalidDirectives { directives, .. } => {
                assert_eq!(directives, "flob=flib=flub");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(error.to_string().contains("flob=flib=flub"));
    }
}

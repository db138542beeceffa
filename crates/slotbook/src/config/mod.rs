use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Runtime stage the service is deployed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the scheduling service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scheduling: SchedulingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("SLOTBOOK_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("SLOTBOOK_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SLOTBOOK_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("SLOTBOOK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let max_ranges_per_day = match env::var("SLOTBOOK_MAX_RANGES_PER_DAY") {
            Ok(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidRangeLimit { value: raw })?,
            Err(_) => SchedulingConfig::DEFAULT_MAX_RANGES_PER_DAY,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scheduling: SchedulingConfig { max_ranges_per_day },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Dials for availability validation.
#[derive(Debug, Clone)]
pub struct SchedulingConfig {
    /// Upper bound on time ranges a professional may configure per weekday.
    pub max_ranges_per_day: usize,
}

impl SchedulingConfig {
    pub const DEFAULT_MAX_RANGES_PER_DAY: usize = 10;
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_ranges_per_day: Self::DEFAULT_MAX_RANGES_PER_DAY,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRangeLimit { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "SLOTBOOK_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "SLOTBOOK_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRangeLimit { value } => {
                write!(
                    f,
                    "SLOTBOOK_MAX_RANGES_PER_DAY must be a positive integer, got '{value}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidRangeLimit { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("SLOTBOOK_ENV");
        env::remove_var("SLOTBOOK_HOST");
        env::remove_var("SLOTBOOK_PORT");
        env::remove_var("SLOTBOOK_LOG_LEVEL");
        env::remove_var("SLOTBOOK_MAX_RANGES_PER_DAY");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(
            config.scheduling.max_ranges_per_day,
            SchedulingConfig::DEFAULT_MAX_RANGES_PER_DAY
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SLOTBOOK_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 8080));
    }

    #[test]
    fn rejects_zero_range_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SLOTBOOK_MAX_RANGES_PER_DAY", "0");
        let error = AppConfig::load().expect_err("zero limit rejected");
        assert!(matches!(error, ConfigError::InvalidRangeLimit { .. }));
    }
}

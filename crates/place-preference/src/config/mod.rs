use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
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

const DEFAULT_SUBMISSION_URL: &str = "http://127.0.0.1:3000/api/submit-to-sheets";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub submission: SubmissionConfig,
    pub directory: DirectoryConfig,
    pub sheet: SheetConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let endpoint =
            env::var("APP_SUBMISSION_URL").unwrap_or_else(|_| DEFAULT_SUBMISSION_URL.to_string());
        let timeout_secs = match env::var("APP_SUBMISSION_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout { value: raw }),
            },
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let directory_url = env::var("APP_DIRECTORY_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        let fixture_latency_ms = match env::var("APP_DIRECTORY_LATENCY_MS") {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidLatency { value: raw.clone() })?,
            ),
            Err(_) => None,
        };
        let sheet_path = env::var("APP_SHEET_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            submission: SubmissionConfig {
                endpoint,
                timeout_secs,
            },
            directory: DirectoryConfig {
                base_url: directory_url,
                fixture_latency_ms,
            },
            sheet: SheetConfig { path: sheet_path },
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

/// Where finished payloads are posted.
#[derive(Debug, Clone)]
pub struct SubmissionConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl SubmissionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Employee lookup backend; the built-in fixture directory is used when unset.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub base_url: Option<String>,
    /// Simulated lookup delay for the fixture directory.
    pub fixture_latency_ms: Option<u64>,
}

impl DirectoryConfig {
    pub fn fixture_latency(&self) -> Option<Duration> {
        self.fixture_latency_ms.map(Duration::from_millis)
    }
}

/// CSV file receiving accepted submissions; kept in memory when unset.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { value: String },
    InvalidLatency { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "APP_SUBMISSION_TIMEOUT_SECS must be a positive number of seconds (found '{value}')"
            ),
            ConfigError::InvalidLatency { value } => write!(
                f,
                "APP_DIRECTORY_LATENCY_MS must be a whole number of milliseconds (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout { .. }
            | ConfigError::InvalidLatency { .. } => None,
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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_SUBMISSION_URL",
            "APP_SUBMISSION_TIMEOUT_SECS",
            "APP_DIRECTORY_URL",
            "APP_DIRECTORY_LATENCY_MS",
            "APP_SHEET_PATH",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.submission.endpoint, DEFAULT_SUBMISSION_URL);
        assert_eq!(config.submission.timeout(), Duration::from_secs(30));
        assert!(config.directory.base_url.is_none());
        assert!(config.directory.fixture_latency().is_none());
        assert!(config.sheet.path.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_zero_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SUBMISSION_TIMEOUT_SECS", "0");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn reads_collaborator_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DIRECTORY_URL", "http://directory.internal:5000");
        env::set_var("APP_SHEET_PATH", "/tmp/preferences.csv");
        env::set_var("APP_SUBMISSION_TIMEOUT_SECS", "5");
        env::set_var("APP_DIRECTORY_LATENCY_MS", "800");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        assert_eq!(
            config.directory.base_url.as_deref(),
            Some("http://directory.internal:5000")
        );
        assert_eq!(
            config.sheet.path,
            Some(PathBuf::from("/tmp/preferences.csv"))
        );
        assert_eq!(config.submission.timeout_secs, 5);
        assert_eq!(
            config.directory.fixture_latency(),
            Some(Duration::from_millis(800))
        );
    }

    #[test]
    fn rejects_unparseable_latency() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DIRECTORY_LATENCY_MS", "slow");
        let result = AppConfig::load();
        reset_env();
        assert!(matches!(result, Err(ConfigError::InvalidLatency { .. })));
    }
}

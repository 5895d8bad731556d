use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::api::{ApiBase, ApiError, DEFAULT_DEV_API_BASE};

/// Distinguishes runtime behavior for different stages of the dashboard.
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

/// Top-level configuration for the dashboard client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub api: ApiConfig,
    pub views: ViewsConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let dev_api = env::var("APP_DEV_API_BASE")
            .unwrap_or_else(|_| DEFAULT_DEV_API_BASE.to_string());
        let dev_api = ApiBase::parse(&dev_api).map_err(|source| ConfigError::InvalidApiBase {
            variable: "APP_DEV_API_BASE",
            source,
        })?;

        let base = match (env::var("APP_API_BASE"), env::var("APP_PAGE_ORIGIN")) {
            (Ok(explicit), _) => {
                ApiBase::parse(&explicit).map_err(|source| ConfigError::InvalidApiBase {
                    variable: "APP_API_BASE",
                    source,
                })?
            }
            (Err(_), Ok(page)) => {
                let page = Url::parse(page.trim()).map_err(|_| ConfigError::InvalidPageOrigin)?;
                ApiBase::for_page(&page, &dev_api).map_err(|source| {
                    ConfigError::InvalidApiBase {
                        variable: "APP_PAGE_ORIGIN",
                        source,
                    }
                })?
            }
            (Err(_), Err(_)) => dev_api,
        };

        let health_timeout = env::var("APP_HEALTH_TIMEOUT_MS")
            .unwrap_or_else(|_| "3500".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidHealthTimeout)?;

        let views_root = env::var("APP_VIEWS_DIR").unwrap_or_else(|_| "ui".to_string());
        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            api: ApiConfig {
                base,
                health_timeout: Duration::from_millis(health_timeout),
            },
            views: ViewsConfig {
                root: PathBuf::from(views_root),
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where API calls go and how long the liveness check may take.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base: ApiBase,
    pub health_timeout: Duration,
}

/// Location of the static markup fragments on disk.
#[derive(Debug, Clone)]
pub struct ViewsConfig {
    pub root: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidApiBase {
        variable: &'static str,
        source: ApiError,
    },
    InvalidPageOrigin,
    InvalidHealthTimeout,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidApiBase { variable, source } => {
                write!(f, "{variable} must be an absolute http(s) origin ({source})")
            }
            ConfigError::InvalidPageOrigin => {
                write!(f, "APP_PAGE_ORIGIN must be an absolute URL")
            }
            ConfigError::InvalidHealthTimeout => {
                write!(f, "APP_HEALTH_TIMEOUT_MS must be a whole number of milliseconds")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidApiBase { source, .. } => Some(source),
            ConfigError::InvalidPageOrigin | ConfigError::InvalidHealthTimeout => None,
        }
    }
}

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::state::StateError;
use crate::telemetry::TelemetryError;
use crate::views::ViewError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Api(ApiError),
    View(ViewError),
    State(StateError),
    BackendDown(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Api(err) => write!(f, "api error: {}", err),
            AppError::View(err) => write!(f, "view error: {}", err),
            AppError::State(err) => write!(f, "state error: {}", err),
            AppError::BackendDown(reason) => write!(f, "backend down: {}", reason),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Api(err) => Some(err),
            AppError::View(err) => Some(err),
            AppError::State(err) => Some(err),
            AppError::BackendDown(_) => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ApiError> for AppError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<ViewError> for AppError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

impl From<StateError> for AppError {
    fn from(value: StateError) -> Self {
        Self::State(value)
    }
}

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::{ApiClient, RequestOptions};

pub const HEALTH_PATH: &str = "/api/health";
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_millis(3500);

pub const STATUS_OK: &str = "ok";
pub const STATUS_DOWN: &str = "backend down";

/// Anything that can show whether the backend is reachable.
pub trait StatusIndicator {
    fn set_status(&mut self, healthy: bool, label: &str);
}

/// In-memory indicator used by the console and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBadge {
    healthy: Option<bool>,
    label: String,
}

impl StatusBadge {
    /// `None` until the first check settles.
    pub fn healthy(&self) -> Option<bool> {
        self.healthy
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl StatusIndicator for StatusBadge {
    fn set_status(&mut self, healthy: bool, label: &str) {
        self.healthy = Some(healthy);
        self.label = label.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up { version: Option<String> },
    Down { reason: String },
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up { .. })
    }
}

#[derive(Debug, Clone)]
pub struct HealthMonitor {
    client: ApiClient,
    timeout: Duration,
}

impl HealthMonitor {
    pub fn new(client: ApiClient) -> Self {
        Self::with_timeout(client, DEFAULT_HEALTH_TIMEOUT)
    }

    pub fn with_timeout(client: ApiClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks the liveness endpoint and updates `indicator`. Failures are
    /// reported through the indicator and the returned status, never as errors.
    pub async fn check<I>(&self, indicator: &mut I) -> HealthStatus
    where
        I: StatusIndicator + ?Sized,
    {
        let token = CancellationToken::new();
        let timer = {
            let token = token.clone();
            let timeout = self.timeout;
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                token.cancel();
            })
        };

        let outcome = self
            .client
            .request(HEALTH_PATH, RequestOptions::get().with_cancel(token))
            .await;
        timer.abort();

        match outcome {
            Ok(body) => {
                let version = body.str_field("version").map(str::to_string);
                indicator.set_status(true, STATUS_OK);
                info!("HEALTH ok version={}", version.as_deref().unwrap_or("?"));
                HealthStatus::Up { version }
            }
            Err(err) => {
                indicator.set_status(false, STATUS_DOWN);
                warn!("HEALTH error: {err}");
                HealthStatus::Down {
                    reason: err.to_string(),
                }
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct LimiterConfig {
    pub max_requests: usize,
    pub window_seconds: f64,
}

impl LimiterConfig {
    pub fn new(max_requests: usize, window_seconds: f64) -> Self {
        LimiterConfig { max_requests, window_seconds }
    }

    /// Only valid after [`LimiterConfig::validate`].
    pub fn window(&self) -> Duration {
        Duration::from_secs_f64(self.window_seconds)
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if !self.window_seconds.is_finite() || self.window_seconds <= 0.0 {
            return Err(Error::ConfigError(format!(
                "{}: window_seconds must be a positive number, got {}",
                name, self.window_seconds
            )));
        }
        if self.window_seconds > u32::MAX as f64 {
            return Err(Error::ConfigError(format!(
                "{}: window_seconds {} is out of range",
                name, self.window_seconds
            )));
        }
        if self.max_requests == 0 {
            tracing::warn!("{}: max_requests is 0, every recorded request blocks the key", name);
        }
        Ok(())
    }
}

/// Budgets for the two trust levels: unauthenticated login attempts and
/// authenticated API traffic.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AdmissionConfig {
    pub login: LimiterConfig,
    pub api: LimiterConfig,
}

impl AdmissionConfig {
    pub fn validate(&self) -> Result<()> {
        self.login.validate("login")?;
        self.api.validate("api")
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        AdmissionConfig {
            login: LimiterConfig::new(5, 60.0),  // 5 attempts per minute per IP
            api: LimiterConfig::new(60, 60.0),   // 60 requests per minute per user+IP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AdmissionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.login.window(), Duration::from_secs(60));
    }

    #[test]
    fn rejects_non_positive_windows() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = LimiterConfig::new(5, bad);
            assert!(matches!(config.validate("login"), Err(Error::ConfigError(_))));
        }
    }

    #[test]
    fn zero_budget_is_allowed() {
        assert!(LimiterConfig::new(0, 60.0).validate("api").is_ok());
    }
}

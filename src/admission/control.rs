use std::net::IpAddr;
use std::sync::Arc;
use crate::admission::rate_limiter::{Admission, RateLimiter};
use crate::config::admission::AdmissionConfig;
use crate::error::{Error, Result};
use crate::interfaces::clock::Clock;
use crate::observability::metrics::{
    ADMISSIONS_GRANTED, ADMISSIONS_THROTTLED, LOGIN_FAILURES, TRACKED_KEYS,
};
use crate::observability::tracing::trace_admission;
use crate::types::ids::UserId;
use crate::types::timestamp::SystemClock;

pub const LOGIN_LIMITER: &str = "login";
pub const API_LIMITER: &str = "api";

/// Outcome of a failed credential check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginFailure {
    /// The client may try again this many more times in the current window.
    Retry { remaining: usize },
    /// The failure used up the budget.
    LockedOut { retry_after_secs: u64 },
}

/// Owns the process-wide limiters. Build one at startup and share it with
/// request handlers behind an `Arc`.
pub struct AdmissionControl {
    login: RateLimiter,
    api: RateLimiter,
}

pub fn login_key(ip: IpAddr) -> String {
    ip.to_string()
}

pub fn api_key(user_id: UserId, ip: IpAddr) -> String {
    format!("{}:{}", user_id, ip)
}

impl AdmissionControl {
    pub fn new(config: &AdmissionConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AdmissionConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            "Admission control: login {} per {}s, api {} per {}s",
            config.login.max_requests,
            config.login.window_seconds,
            config.api.max_requests,
            config.api.window_seconds
        );

        Ok(AdmissionControl {
            login: RateLimiter::with_clock(
                LOGIN_LIMITER,
                config.login.max_requests,
                config.login.window(),
                clock.clone(),
            ),
            api: RateLimiter::with_clock(
                API_LIMITER,
                config.api.max_requests,
                config.api.window(),
                clock,
            ),
        })
    }

    pub fn login_limiter(&self) -> &RateLimiter {
        &self.login
    }

    pub fn api_limiter(&self) -> &RateLimiter {
        &self.api
    }

    /// Reject a login attempt up front while the client is locked out.
    pub fn guard_login(&self, ip: IpAddr) -> Result<()> {
        let key = login_key(ip);
        let _span = trace_admission(LOGIN_LIMITER, &key).entered();

        let state = self.login.check(&key);
        if state.allowed {
            return Ok(());
        }

        ADMISSIONS_THROTTLED.with_label_values(&[LOGIN_LIMITER]).inc();
        tracing::warn!("Login blocked for {}", key);
        Err(Error::TooManyAttempts {
            retry_after_secs: state.retry_after_secs(),
        })
    }

    /// Count a failed credential check against the client.
    pub fn login_failed(&self, ip: IpAddr) -> LoginFailure {
        let key = login_key(ip);
        let _span = trace_admission(LOGIN_LIMITER, &key).entered();

        LOGIN_FAILURES.inc();
        let state = self.login.record_and_check(&key);
        self.update_tracked_keys();

        if state.remaining > 0 {
            LoginFailure::Retry { remaining: state.remaining }
        } else {
            tracing::warn!("Client {} locked out after failed logins", key);
            LoginFailure::LockedOut {
                retry_after_secs: state.retry_after_secs(),
            }
        }
    }

    /// A successful login wipes the client's failure history.
    pub fn login_succeeded(&self, ip: IpAddr) {
        let key = login_key(ip);
        self.login.clear_requests(&key);
        self.update_tracked_keys();
        tracing::info!("Login penalty reset for {}", key);
    }

    /// Admit one authenticated request, or say how long to wait.
    pub fn admit_api(&self, user_id: UserId, ip: IpAddr) -> Result<Admission> {
        let key = api_key(user_id, ip);
        let _span = trace_admission(API_LIMITER, &key).entered();

        let admission = self.api.acquire(&key);
        self.update_tracked_keys();

        if admission.allowed {
            ADMISSIONS_GRANTED.with_label_values(&[API_LIMITER]).inc();
            Ok(admission)
        } else {
            ADMISSIONS_THROTTLED.with_label_values(&[API_LIMITER]).inc();
            Err(Error::RateLimited {
                retry_after_secs: admission.retry_after_secs(),
                key,
            })
        }
    }

    fn update_tracked_keys(&self) {
        TRACKED_KEYS
            .with_label_values(&[LOGIN_LIMITER])
            .set(self.login.tracked_keys() as i64);
        TRACKED_KEYS
            .with_label_values(&[API_LIMITER])
            .set(self.api.tracked_keys() as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn keys_combine_user_and_address() {
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7));
        assert_eq!(login_key(ip), "10.0.0.7");
        assert_eq!(api_key(UserId(42), ip), "42:10.0.0.7");
    }

    #[test]
    fn rejects_invalid_config() {
        let mut config = AdmissionConfig::default();
        config.api.window_seconds = 0.0;
        assert!(matches!(AdmissionControl::new(&config), Err(Error::ConfigError(_))));
    }
}

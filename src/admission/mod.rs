pub mod control;
pub mod rate_limiter;

pub use control::{AdmissionControl, LoginFailure, api_key, login_key};
pub use rate_limiter::{Admission, RateLimiter};

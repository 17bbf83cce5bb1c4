pub mod admission;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod observability;
pub mod scheduling;
pub mod types;

pub use admission::{Admission, AdmissionControl, LoginFailure, RateLimiter};
pub use error::{Error, Result};
pub use scheduling::{Page, PriorityScheduler, TaskPriorityQueue, TaskRecord};

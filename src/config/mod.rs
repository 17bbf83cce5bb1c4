pub mod admission;
pub mod loader;
pub mod scheduling;

pub use admission::{AdmissionConfig, LimiterConfig};
pub use loader::AppConfig;
pub use scheduling::SchedulingConfig;

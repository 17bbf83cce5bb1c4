pub mod ids;
pub mod priority;
pub mod timestamp;

pub mod clock;
pub mod schedulable;

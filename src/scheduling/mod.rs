pub mod key;
pub mod pagination;
pub mod priority_queue;
pub mod scheduler;
pub mod task;

pub use key::{Due, ScheduleKey};
pub use pagination::Page;
pub use priority_queue::TaskPriorityQueue;
pub use scheduler::PriorityScheduler;
pub use task::TaskRecord;

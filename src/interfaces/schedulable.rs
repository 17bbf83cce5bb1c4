use chrono::{NaiveDate, NaiveTime};
use crate::types::ids::TaskId;
use crate::types::priority::PriorityTier;

/// The fields the scheduler ranks by. Implementors are never mutated.
pub trait Schedulable {
    /// `None` marks an item with no identity; the scheduler rejects it.
    fn task_id(&self) -> Option<TaskId>;
    fn priority(&self) -> PriorityTier;
    fn due_date(&self) -> Option<NaiveDate>;
    fn due_time(&self) -> Option<NaiveTime>;
    fn is_important(&self) -> bool;
    fn is_completed(&self) -> bool;
}

impl<T: Schedulable + ?Sized> Schedulable for &T {
    fn task_id(&self) -> Option<TaskId> {
        (**self).task_id()
    }

    fn priority(&self) -> PriorityTier {
        (**self).priority()
    }

    fn due_date(&self) -> Option<NaiveDate> {
        (**self).due_date()
    }

    fn due_time(&self) -> Option<NaiveTime> {
        (**self).due_time()
    }

    fn is_important(&self) -> bool {
        (**self).is_important()
    }

    fn is_completed(&self) -> bool {
        (**self).is_completed()
    }
}

use chrono::NaiveDateTime;
use crate::error::{Error, Result};
use crate::interfaces::schedulable::Schedulable;
use crate::types::ids::TaskId;
use crate::types::timestamp::due_instant;

/// Deadline component of the key. `Never` sorts after every real instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Due {
    At(NaiveDateTime),
    Never,
}

/// Composite ranking of one item; smaller sorts first.
///
/// Field order is the comparison order: tier rank, deadline, importance,
/// completion, then id. The derived `Ord` compares fields lexicographically,
/// and the id makes the order strict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleKey {
    pub tier: u8,
    pub due: Due,
    pub importance: u8,
    pub completion: u8,
    pub id: TaskId,
}

impl ScheduleKey {
    pub fn of<T: Schedulable + ?Sized>(item: &T) -> Result<Self> {
        let id = item.task_id().ok_or(Error::MissingTaskId)?;
        let due = match item.due_date() {
            Some(date) => Due::At(due_instant(date, item.due_time())),
            None => Due::Never,
        };

        Ok(ScheduleKey {
            tier: item.priority().rank(),
            due,
            importance: if item.is_important() { 0 } else { 1 },
            completion: if item.is_completed() { 1 } else { 0 },
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> Due {
        Due::At(NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(0, 0, 0).unwrap())
    }

    #[test]
    fn missing_deadline_sorts_after_any_deadline() {
        assert!(at(31) < Due::Never);
        assert!(at(1) < at(2));
    }

    #[test]
    fn tier_dominates_later_fields() {
        let urgent_late = ScheduleKey { tier: 0, due: Due::Never, importance: 1, completion: 1, id: TaskId(9) };
        let low_early = ScheduleKey { tier: 3, due: at(1), importance: 0, completion: 0, id: TaskId(1) };
        assert!(urgent_late < low_early);
    }

    #[test]
    fn id_breaks_full_ties() {
        let a = ScheduleKey { tier: 2, due: at(5), importance: 1, completion: 0, id: TaskId(1) };
        let b = ScheduleKey { id: TaskId(2), ..a };
        assert!(a < b);
        assert_ne!(a, b);
    }
}

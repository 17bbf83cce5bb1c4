use chrono::{Duration, NaiveDate};
use std::time::Instant;
use crate::error::Result;
use crate::interfaces::schedulable::Schedulable;
use crate::observability::metrics::SCHEDULING_LATENCY;
use crate::observability::tracing::trace_scheduling;
use crate::scheduling::key::ScheduleKey;

/// Orders work items most-urgent first. Holds no state; every call derives
/// keys from the items it is given.
pub struct PriorityScheduler;

impl PriorityScheduler {
    /// Items in ascending [`ScheduleKey`] order, cut to the first `limit`.
    ///
    /// The result depends only on item content, never on input order. A
    /// limited call returns exactly the prefix of the unlimited order.
    ///
    /// Fails with `MissingTaskId` if any item lacks an id. Ids are expected
    /// to be unique; that is not checked.
    pub fn order<T: Schedulable>(items: &[T], limit: Option<usize>) -> Result<Vec<&T>> {
        let _span = trace_scheduling(items.len()).entered();
        let started = Instant::now();

        let mut keyed = items
            .iter()
            .map(|item| ScheduleKey::of(item).map(|key| (key, item)))
            .collect::<Result<Vec<_>>>()?;

        match limit {
            Some(k) if k < keyed.len() => {
                if k > 0 {
                    // Partition so the k smallest keys come first, then sort only those
                    keyed.select_nth_unstable_by(k - 1, |a, b| a.0.cmp(&b.0));
                }
                keyed.truncate(k);
                keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0));
            }
            _ => keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0)),
        }

        SCHEDULING_LATENCY.observe(started.elapsed().as_secs_f64());
        Ok(keyed.into_iter().map(|(_, item)| item).collect())
    }

    /// Incomplete items only, in priority order.
    pub fn pending<T: Schedulable>(items: &[T], limit: Option<usize>) -> Result<Vec<&T>> {
        let open: Vec<&T> = items.iter().filter(|item| !item.is_completed()).collect();
        Ok(Self::order(&open, limit)?.into_iter().copied().collect())
    }

    /// Incomplete items due between `today` and `today + days` inclusive,
    /// in priority order.
    pub fn upcoming<T: Schedulable>(
        items: &[T],
        today: NaiveDate,
        days: u32,
        limit: Option<usize>,
    ) -> Result<Vec<&T>> {
        let horizon = today
            .checked_add_signed(Duration::days(i64::from(days)))
            .unwrap_or(NaiveDate::MAX);

        let due_soon: Vec<&T> = items
            .iter()
            .filter(|item| !item.is_completed())
            .filter(|item| matches!(item.due_date(), Some(d) if d >= today && d <= horizon))
            .collect();
        Ok(Self::order(&due_soon, limit)?.into_iter().copied().collect())
    }
}

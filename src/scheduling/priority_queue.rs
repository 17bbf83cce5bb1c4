use std::cmp::Ordering;
use std::collections::BinaryHeap;
use crate::error::Result;
use crate::interfaces::schedulable::Schedulable;
use crate::scheduling::key::ScheduleKey;

/// Incrementally built priority queue of tasks. Pops in the same order
/// [`PriorityScheduler::order`](crate::scheduling::PriorityScheduler::order)
/// produces.
pub struct TaskPriorityQueue<T> {
    heap: BinaryHeap<PriorityTask<T>>,
}

impl<T: Schedulable> TaskPriorityQueue<T> {
    pub fn new() -> Self {
        TaskPriorityQueue {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, task: T) -> Result<()> {
        let key = ScheduleKey::of(&task)?;
        self.heap.push(PriorityTask { key, task });
        Ok(())
    }

    /// All or nothing: if any task lacks an id, none are queued.
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, tasks: I) -> Result<()> {
        let keyed = tasks
            .into_iter()
            .map(|task| ScheduleKey::of(&task).map(|key| PriorityTask { key, task }))
            .collect::<Result<Vec<_>>>()?;
        self.heap.extend(keyed);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|p| p.task)
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|p| &p.task)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Highest priority first, without draining the queue.
    pub fn priority_list(&self, limit: Option<usize>) -> Vec<&T> {
        let mut entries: Vec<&PriorityTask<T>> = self.heap.iter().collect();
        entries.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries.into_iter().map(|p| &p.task).collect()
    }
}

impl<T: Schedulable> Default for TaskPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct PriorityTask<T> {
    key: ScheduleKey,
    task: T,
}

impl<T> PartialEq for PriorityTask<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for PriorityTask<T> {}

impl<T> PartialOrd for PriorityTask<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for PriorityTask<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smaller key = higher priority (reverse order for the max-heap)
        other.key.cmp(&self.key)
    }
}

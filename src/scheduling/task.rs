use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use crate::interfaces::schedulable::Schedulable;
use crate::types::ids::TaskId;
use crate::types::priority::PriorityTier;

/// Plain task record as handed over by the persistence layer.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub priority: PriorityTier,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_time: Option<NaiveTime>,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub is_completed: bool,
}

impl TaskRecord {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        TaskRecord {
            id: Some(TaskId(id)),
            title: title.into(),
            priority: PriorityTier::default(),
            due_date: None,
            due_time: None,
            important: false,
            is_completed: false,
        }
    }

    pub fn with_priority(mut self, priority: PriorityTier) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due(mut self, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        self.due_date = Some(date);
        self.due_time = time;
        self
    }

    pub fn with_important(mut self, important: bool) -> Self {
        self.important = important;
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.is_completed = completed;
        self
    }
}

impl Schedulable for TaskRecord {
    fn task_id(&self) -> Option<TaskId> {
        self.id
    }

    fn priority(&self) -> PriorityTier {
        self.priority
    }

    fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    fn due_time(&self) -> Option<NaiveTime> {
        self.due_time
    }

    fn is_important(&self) -> bool {
        self.important
    }

    fn is_completed(&self) -> bool {
        self.is_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_records() {
        let task: TaskRecord = serde_json::from_str(
            r#"{"id": 7, "priority": "weird", "due_date": "2024-03-01", "due_time": "08:30:00"}"#,
        )
        .unwrap();

        assert_eq!(task.id, Some(TaskId(7)));
        assert_eq!(task.priority, PriorityTier::Medium);
        assert_eq!(task.due_time, NaiveTime::from_hms_opt(8, 30, 0));
        assert!(!task.important);
        assert!(!task.is_completed);
    }

    #[test]
    fn missing_id_deserializes_as_none() {
        let task: TaskRecord = serde_json::from_str(r#"{"title": "orphan"}"#).unwrap();
        assert_eq!(task.id, None);
    }
}

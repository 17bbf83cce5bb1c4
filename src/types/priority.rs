use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordinal urgency class of a task. Lower rank sorts first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PriorityTier {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl PriorityTier {
    pub fn rank(self) -> u8 {
        match self {
            PriorityTier::Urgent => 0,
            PriorityTier::High => 1,
            PriorityTier::Medium => 2,
            PriorityTier::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PriorityTier::Urgent => "urgent",
            PriorityTier::High => "high",
            PriorityTier::Medium => "medium",
            PriorityTier::Low => "low",
        }
    }

    /// Never fails: anything unrecognised (including the empty string) is `Medium`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "urgent" => PriorityTier::Urgent,
            "high" => PriorityTier::High,
            "low" => PriorityTier::Low,
            _ => PriorityTier::Medium,
        }
    }
}

impl From<&str> for PriorityTier {
    fn from(raw: &str) -> Self {
        PriorityTier::parse_lenient(raw)
    }
}

impl From<Option<&str>> for PriorityTier {
    fn from(raw: Option<&str>) -> Self {
        raw.map(PriorityTier::parse_lenient).unwrap_or_default()
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PriorityTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PriorityTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(PriorityTier::from(raw.as_deref()))
    }
}

use crate::error::CoreError;
use crate::id::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RFC 1123 layout used for `createdAt`, e.g. `Mon, 02 Jan 2006 15:04:05 UTC`.
pub const CREATED_AT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S UTC";

/// Lifecycle state of a task.
///
/// Stored on disk as an integer: 0 = active, 1 = done, 2 = inactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Active,
    Done,
    Inactive,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Done => "done",
            TaskStatus::Inactive => "inactive",
        }
    }

    fn code(self) -> u8 {
        match self {
            TaskStatus::Active => 0,
            TaskStatus::Done => 1,
            TaskStatus::Inactive => 2,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TaskStatus::Active),
            1 => Some(TaskStatus::Done),
            2 => Some(TaskStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TaskStatus::Active),
            "done" => Ok(TaskStatus::Done),
            "inactive" => Ok(TaskStatus::Inactive),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        TaskStatus::from_code(code).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown status code {} (expected 0, 1 or 2)", code))
        })
    }
}

/// One persisted task record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "task")]
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub status: TaskStatus,
}

impl Task {
    /// Build a fresh active task stamped with `now`.
    pub fn new(id: TaskId, description: &str, now: DateTime<Utc>) -> Result<Self, CoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CoreError::EmptyDescription);
        }
        Ok(Self {
            id,
            description: description.to_string(),
            created_at: now.format(CREATED_AT_FORMAT).to_string(),
            status: TaskStatus::Active,
        })
    }
}

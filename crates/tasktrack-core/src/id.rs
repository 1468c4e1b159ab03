use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Numeric task identifier. Always positive; `0` is never allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TaskId(u32);

impl TaskId {
    /// The smallest id the pool hands out.
    pub const FIRST: TaskId = TaskId(1);

    /// Wrap a raw integer, rejecting zero.
    pub fn new(raw: u32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Parse user input such as `"12"` into a TaskId.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let trimmed = input.trim();
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| CoreError::InvalidTaskId(trimmed.to_string()))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The id following this one, or `None` on overflow.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// File name of the task record, e.g. `7.json`.
    pub fn file_name(self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u32> for TaskId {
    type Error = CoreError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| CoreError::InvalidTaskId(raw.to_string()))
    }
}

impl From<TaskId> for u32 {
    fn from(id: TaskId) -> u32 {
        id.0
    }
}

impl FromStr for TaskId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

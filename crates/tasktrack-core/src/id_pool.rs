//! In-memory set of task ids that currently have a record on disk.
//!
//! The pool is persisted as a sorted JSON array (`[1,2,5]`). Older storage
//! roots wrote it as an object keyed by stringified ids (`{"1":null}`); that
//! form is still accepted on read.

use crate::error::CoreError;
use crate::id::TaskId;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdPool {
    ids: BTreeSet<TaskId>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PoolRepr {
    List(Vec<TaskId>),
    Legacy(BTreeMap<String, serde_json::Value>),
}

impl IdPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest positive id not in the pool.
    ///
    /// Linear in the pool size; gaps left by missing records are reused.
    pub fn allocate(&self) -> TaskId {
        let mut candidate = TaskId::FIRST;
        for id in &self.ids {
            if *id != candidate {
                break;
            }
            match candidate.next() {
                Some(next) => candidate = next,
                None => break,
            }
        }
        candidate
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: TaskId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: TaskId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = TaskId> + '_ {
        self.ids.iter().copied()
    }

    /// Decode pool file content. Blank content and `null` yield an empty pool.
    pub fn from_json(data: &str) -> Result<Self, CoreError> {
        if data.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_str::<IdPool>(data)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<TaskId> for IdPool {
    fn from_iter<I: IntoIterator<Item = TaskId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'de> Deserialize<'de> for IdPool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = Option::<PoolRepr>::deserialize(deserializer)?;
        let ids = match repr {
            None => BTreeSet::new(),
            Some(PoolRepr::List(ids)) => ids.into_iter().collect(),
            Some(PoolRepr::Legacy(map)) => map
                .keys()
                .map(|key| {
                    TaskId::parse(key).map_err(|_| {
                        <D::Error as serde::de::Error>::custom(CoreError::InvalidPoolEntry(
                            key.clone(),
                        ))
                    })
                })
                .collect::<Result<_, D::Error>>()?,
        };
        Ok(Self { ids })
    }
}

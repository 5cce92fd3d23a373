use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CounterId(pub u32);

impl From<u32> for CounterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CounterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "counter_{}", self.0)
    }
}

/// A named monotonic sequence. `value` is the last number handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub id: CounterId,
    pub name: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterCreate {
    pub name: String,
    /// Starting point; the first `Next` returns `start + 1`.
    pub start: u64,
}

impl CounterCreate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterUpdate {
    pub name: Option<String>,
}

//! Bounded in-memory log of notable events, shown to operators on the status page.
//!
//! [`StatusLogLayer`] plugs into the `tracing` pipeline and copies every WARN and ERROR event
//! (and INFO when asked) into a shared [`StatusLog`]. [`StatusLog::install_panic_hook`] adds
//! panics, including those that kill an actor task. The log can be saved to JSON and loaded
//! back so entries survive a restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::VecDeque;
use std::fmt::{Debug, Write as _};
use std::panic;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEntry {
    pub level: StatusLevel,
    pub message: String,
    pub target: String,
    pub at: DateTime<Utc>,
}

/// Shared handle; clones see the same entries. Oldest entries are dropped past `capacity`.
#[derive(Debug, Clone)]
pub struct StatusLog {
    entries: Arc<Mutex<VecDeque<StatusEntry>>>,
    capacity: usize,
}

impl StatusLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    // A panic while holding the lock leaves the deque itself intact.
    fn lock(&self) -> MutexGuard<'_, VecDeque<StatusEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, level: StatusLevel, message: impl Into<String>, target: impl Into<String>) {
        let entry = StatusEntry {
            level,
            message: message.into(),
            target: target.into(),
            at: Utc::now(),
        };
        let mut entries = self.lock();
        while entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Oldest first.
    pub fn entries(&self) -> Vec<StatusEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.entries())
    }

    /// Replaces the current entries with a saved snapshot, keeping the newest `capacity`.
    /// Returns how many entries were kept.
    pub fn restore(&self, json: &str) -> serde_json::Result<usize> {
        let saved: Vec<StatusEntry> = serde_json::from_str(json)?;
        let skip = saved.len().saturating_sub(self.capacity);
        let mut entries = self.lock();
        entries.clear();
        entries.extend(saved.into_iter().skip(skip));
        Ok(entries.len())
    }

    /// Records every panic as an error entry, then runs the previously installed hook.
    pub fn install_panic_hook(&self) {
        let log = self.clone();
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let message = panic_message(info.payload());
            let message = match info.location() {
                Some(at) => format!("Panic: {message} at {}:{}", at.file(), at.line()),
                None => format!("Panic: {message}"),
            };
            log.push(StatusLevel::Error, message, "panic");
            previous(info);
        }));
    }

    pub fn layer(&self, capture_info: bool) -> StatusLogLayer {
        StatusLogLayer {
            log: self.clone(),
            capture_info,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// `tracing` layer feeding a [`StatusLog`].
pub struct StatusLogLayer {
    log: StatusLog,
    capture_info: bool,
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn field(&mut self, name: &str, value: &dyn std::fmt::Display) {
        let _ = write!(self.fields, " {name}={value}");
    }

    fn finish(self) -> String {
        self.message + &self.fields
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.field(field.name(), &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.field(field.name(), &format_args!("{value:?}"));
        }
    }
}

impl<S: Subscriber> Layer<S> for StatusLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = match *metadata.level() {
            Level::ERROR => StatusLevel::Error,
            Level::WARN => StatusLevel::Warning,
            Level::INFO if self.capture_info => StatusLevel::Info,
            _ => return,
        };
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.log.push(level, visitor.finish(), metadata.target());
    }
}

//! Persisting the document and the debounced "saved" indicator.

use std::collections::HashMap;

use crate::platform::{DocumentStore, PlatformError};
use crate::timer::{DeferredQueue, Millis, TimerState};

/// Storage key for the header markup.
pub const HEADER_KEY: &str = "header";
/// Storage key for the content markup.
pub const CONTENT_KEY: &str = "content";

/// Header and content markup as stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersistedDocument {
    pub header: Option<String>,
    pub content: Option<String>,
}

impl PersistedDocument {
    /// Fill each missing field from its default independently.
    pub fn or_defaults(self, title: &str, content: &str) -> (String, String) {
        (
            self.header.unwrap_or_else(|| title.to_string()),
            self.content.unwrap_or_else(|| content.to_string()),
        )
    }
}

/// Read both fields. An empty stored string counts as missing.
pub fn load_document<S: DocumentStore + ?Sized>(store: &S) -> PersistedDocument {
    let read = |key: &str| store.get(key).filter(|value| !value.is_empty());
    PersistedDocument {
        header: read(HEADER_KEY),
        content: read(CONTENT_KEY),
    }
}

/// Write header and content markup verbatim.
pub fn save_document<S: DocumentStore + ?Sized>(
    store: &mut S,
    header: &str,
    content: &str,
) -> Result<(), PlatformError> {
    store.set(HEADER_KEY, header)?;
    store.set(CONTENT_KEY, content)?;
    Ok(())
}

/// In-memory [`DocumentStore`] for tests and hosts without local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl DocumentStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PlatformError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What the indicator should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorChange {
    Show,
    Hide,
}

/// Debounced "saved" flash.
///
/// Every save replaces the pending show timer, so a burst of saves flashes
/// once, `delay` ms after the last one. Each flash schedules its own hide
/// `visible` ms later; hides are not cancelled by later flashes.
#[derive(Debug, Clone)]
pub struct SaveIndicator {
    show: TimerState,
    hides: DeferredQueue,
    delay: Millis,
    visible: Millis,
    flashes: usize,
}

impl SaveIndicator {
    pub fn new(delay: Millis, visible: Millis) -> Self {
        Self {
            show: TimerState::Idle,
            hides: DeferredQueue::default(),
            delay,
            visible,
            flashes: 0,
        }
    }

    /// Note a save at `now`, restarting the quiet period.
    pub fn saved(&mut self, now: Millis) {
        self.show.schedule(now, self.delay);
    }

    /// Run due timers. Changes are returned in firing order.
    pub fn tick(&mut self, now: Millis) -> Vec<IndicatorChange> {
        let mut changes = Vec::new();

        // A hide due before the show must be applied first.
        let show_at = self.show.deadline().filter(|d| *d <= now);
        if let Some(show_at) = show_at {
            for _ in self.hides.take_due(show_at) {
                changes.push(IndicatorChange::Hide);
            }
        }

        if let Some(deadline) = self.show.poll(now) {
            self.flashes += 1;
            self.hides.push(deadline, self.visible);
            changes.push(IndicatorChange::Show);
        }

        for _ in self.hides.take_due(now) {
            changes.push(IndicatorChange::Hide);
        }

        changes
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        crate::timer::earliest([self.show.deadline(), self.hides.next_deadline()])
    }

    /// Number of times the indicator has been shown.
    pub fn flashes(&self) -> usize {
        self.flashes
    }

    pub fn clear(&mut self) {
        self.show.cancel();
        self.hides.clear();
    }
}

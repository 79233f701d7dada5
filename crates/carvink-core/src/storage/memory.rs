//! In-memory persist sink.

use super::{PersistPayload, PersistSink, StorageResult};

/// Collects persisted payloads in memory, for tests and embedding hosts.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<(String, PersistPayload)>,
}

impl MemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event pushed so far, oldest first.
    pub fn events(&self) -> &[(String, PersistPayload)] {
        &self.events
    }

    pub fn last(&self) -> Option<&PersistPayload> {
        self.events.last().map(|(_, payload)| payload)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl PersistSink for MemorySink {
    fn push(&mut self, event_name: &str, payload: &PersistPayload) -> StorageResult<()> {
        self.events.push((event_name.to_string(), payload.clone()));
        Ok(())
    }
}

// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observer that records every writer event in order.

use std::sync::{Arc, Mutex};

use echolalia_core::{WriterEvent, WriterObserver};

/// Captures events so tests can assert on what the writer reported.
///
/// Clones share the same buffer, so keep one clone and hand the other to the writer.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<WriterEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far.
    pub fn events(&self) -> Vec<WriterEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Names of databases reported as deleted, in order.
    pub fn deleted(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                WriterEvent::DatabaseDeleted { db_name } => Some(db_name),
                _ => None,
            })
            .collect()
    }
}

impl WriterObserver for RecordingObserver {
    fn on_event(&self, event: &WriterEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

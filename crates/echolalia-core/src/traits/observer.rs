// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Observer trait for writer progress events.

use tracing::{debug, info};

use crate::types::WriterEvent;

/// Receives progress events from the writer.
///
/// The writer holds an `Arc<dyn WriterObserver>`, so implementations must be
/// shareable across threads even though the writer itself issues calls sequentially.
pub trait WriterObserver: Send + Sync {
    /// Called once per event, in the order the writer performs the work.
    fn on_event(&self, event: &WriterEvent);
}

/// Default observer that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl WriterObserver for TracingObserver {
    fn on_event(&self, event: &WriterEvent) {
        match event {
            WriterEvent::DatabaseCreated { db_name } => {
                info!(db = %db_name, "created database");
            }
            WriterEvent::PopulatingDatabase { db_name } => {
                info!(db = %db_name, "populating database");
            }
            WriterEvent::DocsInserted { db_name, count } => {
                debug!(db = %db_name, count, "added docs to database");
            }
            WriterEvent::SkippedSystemDatabase { db_name } => {
                info!(db = %db_name, "skipping system database");
            }
            WriterEvent::SkippedWhitelistedDatabase { db_name } => {
                info!(db = %db_name, "skipping whitelisted database");
            }
            WriterEvent::DatabaseDeleted { db_name } => {
                info!(db = %db_name, "deleted database");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn tracing_observer_logs_skips() {
        TracingObserver.on_event(&WriterEvent::SkippedSystemDatabase {
            db_name: "_users".into(),
        });
        assert!(logs_contain("skipping system database"));
        assert!(logs_contain("_users"));
    }

    #[test]
    #[traced_test]
    fn tracing_observer_logs_inserts_at_debug() {
        TracingObserver.on_event(&WriterEvent::DocsInserted {
            db_name: "mydb".into(),
            count: 7,
        });
        assert!(logs_contain("DEBUG"));
        assert!(logs_contain("added docs to database"));
    }
}

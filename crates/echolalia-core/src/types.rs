// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared types passed between the CLI and the writer.

/// An opaque JSON document. The writer forwards it to CouchDB untouched.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Returns true for names CouchDB reserves for internal databases (`_users`, `_replicator`, ...).
pub fn is_system_database(name: &str) -> bool {
    name.starts_with('_')
}

/// Mode selection and targets for a single writer run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Sweep all non-system, non-whitelisted databases instead of populating one.
    pub clear: bool,

    /// Extra database names to keep during a sweep.
    pub whitelist: Option<Vec<String>>,

    /// Database to create and populate when not clearing.
    pub name: String,
}

/// Something the writer did that is worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterEvent {
    DatabaseCreated { db_name: String },
    PopulatingDatabase { db_name: String },
    DocsInserted { db_name: String, count: usize },
    SkippedSystemDatabase { db_name: String },
    SkippedWhitelistedDatabase { db_name: String },
    DatabaseDeleted { db_name: String },
}

impl WriterEvent {
    /// The database the event refers to.
    pub fn db_name(&self) -> &str {
        match self {
            Self::DatabaseCreated { db_name }
            | Self::PopulatingDatabase { db_name }
            | Self::DocsInserted { db_name, .. }
            | Self::SkippedSystemDatabase { db_name }
            | Self::SkippedWhitelistedDatabase { db_name }
            | Self::DatabaseDeleted { db_name } => db_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_database_detection() {
        assert!(is_system_database("_users"));
        assert!(is_system_database("_replicator"));
        assert!(!is_system_database("app_1"));
        assert!(!is_system_database(""));
    }

    #[test]
    fn event_db_name() {
        let event = WriterEvent::DocsInserted {
            db_name: "mydb".into(),
            count: 3,
        };
        assert_eq!(event.db_name(), "mydb");
    }
}

// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Echolalia CouchDB writer.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Echolalia configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EcholaliaConfig {
    /// CouchDB connection and write settings.
    #[serde(default)]
    pub couchdb: CouchDbConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The `[couchdb]` section.
///
/// Every key is optional at the parsing layer; `host` and `port` are
/// enforced by validation and again when the writer is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CouchDbConfig {
    /// Server host name or address.
    #[serde(default)]
    pub host: Option<String>,

    /// Server port.
    #[serde(default)]
    pub port: Option<u16>,

    /// Basic auth user name. Only used together with `password`.
    #[serde(default)]
    pub user: Option<String>,

    /// Basic auth password. Only used together with `user`.
    #[serde(default)]
    pub password: Option<String>,

    /// Comma-separated database names that a sweep must keep.
    #[serde(default)]
    pub whitelist: Option<String>,

    /// Documents per `_bulk_docs` request. Must be at least 1; defaults to 10.
    #[serde(default)]
    pub bulk_size: Option<i64>,
}

/// Default number of documents per bulk request.
pub const DEFAULT_BULK_SIZE: usize = 10;

impl CouchDbConfig {
    /// Split the comma-separated whitelist into trimmed names, preserving order.
    pub fn whitelist_entries(&self) -> Vec<String> {
        match &self.whitelist {
            Some(raw) => raw.split(',').map(|n| n.trim().to_string()).collect(),
            None => Vec::new(),
        }
    }
}

/// The `[logging]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

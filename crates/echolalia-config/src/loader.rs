// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./echolalia.toml` > `~/.config/echolalia/echolalia.toml` > `/etc/echolalia/echolalia.toml`
//! with environment variable overrides via `ECHOLALIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::EcholaliaConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/echolalia/echolalia.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "echolalia.toml";

/// The per-user configuration file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("echolalia/echolalia.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/echolalia/echolalia.toml` (system-wide)
/// 3. `~/.config/echolalia/echolalia.toml` (user XDG config)
/// 4. `./echolalia.toml` (local directory)
/// 5. `ECHOLALIA_*` environment variables
pub fn load_config() -> Result<EcholaliaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<EcholaliaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcholaliaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<EcholaliaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(EcholaliaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for XDG config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(EcholaliaConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` so that
/// `ECHOLALIA_COUCHDB_BULK_SIZE` maps to `couchdb.bulk_size`, not `couchdb.bulk.size`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("ECHOLALIA_").map(|key| {
        // `key` is lowercased with the prefix stripped, e.g. "couchdb_bulk_size".
        map_env_key(key.as_str()).into()
    })
}

/// Map a lowercased, prefix-stripped env key to its dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    key.replacen("couchdb_", "couchdb.", 1)
        .replacen("logging_", "logging.", 1)
}

// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection settings derived from the `[couchdb]` config section.

use std::num::NonZeroUsize;

use echolalia_config::{CouchDbConfig, DEFAULT_BULK_SIZE};
use echolalia_core::EcholaliaError;
use secrecy::SecretString;
use tracing::warn;

/// Basic auth credentials. Only built when both user and password are configured.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

/// Immutable connection settings for one CouchDB server.
#[derive(Debug)]
pub struct CouchSettings {
    pub host: String,
    pub port: u16,
    pub credentials: Option<Credentials>,
    pub whitelist: Vec<String>,
    pub bulk_size: NonZeroUsize,
}

impl CouchSettings {
    /// Derive settings from config, rejecting missing host/port and non-positive bulk sizes.
    pub fn from_config(config: &CouchDbConfig) -> Result<Self, EcholaliaError> {
        let host = config
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| EcholaliaError::Config("couchdb.host is required".into()))?
            .to_string();
        let port = config
            .port
            .ok_or_else(|| EcholaliaError::Config("couchdb.port is required".into()))?;

        let credentials = match (&config.user, &config.password) {
            (Some(user), Some(password)) => Some(Credentials {
                username: user.clone(),
                password: SecretString::from(password.clone()),
            }),
            (None, None) => None,
            _ => {
                warn!("only one of couchdb.user and couchdb.password is set, sending no credentials");
                None
            }
        };

        let bulk_size = match config.bulk_size {
            None => NonZeroUsize::new(DEFAULT_BULK_SIZE),
            Some(size) if size < 1 => None,
            Some(size) => usize::try_from(size).ok().and_then(NonZeroUsize::new),
        }
        .ok_or_else(|| EcholaliaError::Config("bulk_size has to exceed 0".into()))?;

        Ok(Self {
            host,
            port,
            credentials,
            whitelist: config.whitelist_entries(),
            bulk_size,
        })
    }

    /// `http://{host}:{port}`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Echolalia CouchDB writer.

use thiserror::Error;

/// The primary error type returned by writer operations.
#[derive(Debug, Error)]
pub enum EcholaliaError {
    /// Configuration errors (missing host/port, invalid bulk size).
    #[error("configuration error: {0}")]
    Config(String),

    /// CouchDB answered with a status other than the one the operation expects.
    ///
    /// `body` holds the parsed JSON response. Non-JSON bodies are kept as a JSON string.
    #[error("CouchDB returned {status}: {body}")]
    RemoteRequest {
        status: u16,
        body: serde_json::Value,
    },

    /// The HTTP exchange itself failed (connection refused, body read failure).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input documents could not be read or parsed.
    #[error("document error: {message}")]
    Documents {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EcholaliaError {
    /// Returns the server's JSON payload for remote request failures.
    pub fn remote_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::RemoteRequest { body, .. } => Some(body),
            _ => None,
        }
    }
}

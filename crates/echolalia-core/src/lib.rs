// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Echolalia CouchDB writer.
//!
//! Holds the error type, the observer capability used for progress logging,
//! and the types shared between the CLI and the writer.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::EcholaliaError;
pub use traits::{TracingObserver, WriterObserver};
pub use types::{Document, RunArgs, WriterEvent, is_system_database};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echolalia_error_has_all_variants() {
        let config = EcholaliaError::Config("bulk_size has to exceed 0".into());
        assert_eq!(
            config.to_string(),
            "configuration error: bulk_size has to exceed 0"
        );

        let remote = EcholaliaError::RemoteRequest {
            status: 412,
            body: serde_json::json!({"error": "file_exists"}),
        };
        assert!(remote.to_string().contains("412"));
        assert_eq!(
            remote.remote_body(),
            Some(&serde_json::json!({"error": "file_exists"}))
        );

        let _transport = EcholaliaError::Transport {
            message: "connection refused".into(),
            source: Some(Box::new(std::io::Error::other("test"))),
        };
        let documents = EcholaliaError::Documents {
            message: "line 2 is not an object".into(),
            source: None,
        };
        assert!(documents.remote_body().is_none());
    }
}

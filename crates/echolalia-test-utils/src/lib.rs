// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Echolalia integration tests.
//!
//! # Components
//!
//! - [`RecordingObserver`] - captures writer events for assertions
//! - [`mock_couch`] - wiremock helpers that point a writer at a mock CouchDB

pub mod mock_couch;
pub mod recording_observer;

pub use mock_couch::{bulk_docs_payloads, couch_config, document, documents, requests_with_method};
pub use recording_observer::RecordingObserver;

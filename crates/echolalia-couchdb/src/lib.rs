// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CouchDB writer for Echolalia.
//!
//! Creates a database and fills it through `_bulk_docs` in fixed-size
//! batches, or clears a server of every database that is neither a system
//! database nor whitelisted.

pub mod client;
pub mod settings;
pub mod writer;

pub use client::{CouchClient, CouchResponse};
pub use settings::{CouchSettings, Credentials};
pub use writer::Writer;

// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits injected into the writer.

pub mod observer;

pub use observer::{TracingObserver, WriterObserver};

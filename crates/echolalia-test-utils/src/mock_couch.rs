// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for running the writer against a wiremock CouchDB.

use echolalia_config::CouchDbConfig;
use echolalia_core::Document;
use wiremock::MockServer;
use wiremock::http::Method;

/// A `[couchdb]` config pointing at `server` with the given bulk size.
pub fn couch_config(server: &MockServer, bulk_size: Option<i64>) -> CouchDbConfig {
    CouchDbConfig {
        host: Some(server.address().ip().to_string()),
        port: Some(server.address().port()),
        bulk_size,
        ..Default::default()
    }
}

/// Build a document from a JSON object literal.
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
pub fn document(value: serde_json::Value) -> Document {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("test document must be a JSON object, got {other}"),
    }
}

/// `n` documents of the form `{"seq": i}`.
pub fn documents(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| document(serde_json::json!({ "seq": i })))
        .collect()
}

/// Request paths received with `method`, in arrival order.
pub async fn requests_with_method(server: &MockServer, method: Method) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method == method)
        .map(|r| r.url.path().to_string())
        .collect()
}

/// The `docs` arrays of every `_bulk_docs` POST, in arrival order.
pub async fn bulk_docs_payloads(server: &MockServer) -> Vec<Vec<Document>> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method == Method::POST && r.url.path().ends_with("/_bulk_docs"))
        .map(|r| {
            let body: serde_json::Value =
                serde_json::from_slice(&r.body).expect("bulk_docs body should be JSON");
            let docs: Vec<Document> = serde_json::from_value(body["docs"].clone())
                .expect("body should carry a docs array");
            docs
        })
        .collect()
}

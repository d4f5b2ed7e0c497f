// SPDX-FileCopyrightText: 2026 Echolalia Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The CouchDB writer: create a database and fill it in batches, or sweep
//! every non-system, non-whitelisted database.
//!
//! All calls are awaited one after another. Create and insert failures abort
//! with [`EcholaliaError::RemoteRequest`]; delete failures during a sweep are
//! skipped so the remaining databases are still attempted.

use std::num::NonZeroUsize;
use std::slice::Chunks;
use std::sync::Arc;

use echolalia_config::CouchDbConfig;
use echolalia_core::{
    Document, EcholaliaError, RunArgs, TracingObserver, WriterEvent, WriterObserver,
    is_system_database,
};
use reqwest::StatusCode;
use serde::Serialize;

use crate::client::CouchClient;
use crate::settings::CouchSettings;

#[derive(Serialize)]
struct BulkDocsRequest<'a> {
    docs: &'a [Document],
}

/// Writes documents to, and removes databases from, one CouchDB server.
pub struct Writer {
    client: CouchClient,
    whitelist: Vec<String>,
    bulk_size: NonZeroUsize,
    observer: Arc<dyn WriterObserver>,
}

impl std::fmt::Debug for Writer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writer")
            .field("base_url", &self.client.base_url())
            .field("whitelist", &self.whitelist)
            .field("bulk_size", &self.bulk_size)
            .finish_non_exhaustive()
    }
}

impl Writer {
    /// Build a writer from the `[couchdb]` config section, logging through `tracing`.
    pub fn new(config: &CouchDbConfig) -> Result<Self, EcholaliaError> {
        Self::from_settings(CouchSettings::from_config(config)?)
    }

    pub fn from_settings(settings: CouchSettings) -> Result<Self, EcholaliaError> {
        Ok(Self {
            client: CouchClient::new(settings.base_url(), settings.credentials)?,
            whitelist: settings.whitelist,
            bulk_size: settings.bulk_size,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the event observer.
    pub fn with_observer(mut self, observer: Arc<dyn WriterObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    pub fn bulk_size(&self) -> usize {
        self.bulk_size.get()
    }

    /// Append names that the next sweep must keep.
    pub fn extend_whitelist<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.whitelist.extend(names);
    }

    /// Split `docs` into the contiguous batches `create_docs` sends.
    pub fn chunks<'a>(&self, docs: &'a [Document]) -> Chunks<'a, Document> {
        docs.chunks(self.bulk_size.get())
    }

    /// `PUT /{db_name}`; succeeds only on 201 Created.
    pub async fn create_db(&self, db_name: &str) -> Result<String, EcholaliaError> {
        self.client
            .put(db_name)
            .await?
            .expect_status(StatusCode::CREATED)?;
        self.emit(WriterEvent::DatabaseCreated {
            db_name: db_name.to_string(),
        });
        Ok(db_name.to_string())
    }

    /// `POST /{db_name}/_bulk_docs` with `{"docs": docs}`; succeeds only on 201 Created.
    pub async fn bulk_insert(&self, db_name: &str, docs: &[Document]) -> Result<(), EcholaliaError> {
        self.client
            .post_json(&format!("{db_name}/_bulk_docs"), &BulkDocsRequest { docs })
            .await?
            .expect_status(StatusCode::CREATED)?;
        self.emit(WriterEvent::DocsInserted {
            db_name: db_name.to_string(),
            count: docs.len(),
        });
        Ok(())
    }

    /// Insert `docs` in `bulk_size` batches, in order.
    ///
    /// The first failing batch aborts the rest; earlier batches stay inserted.
    pub async fn create_docs(&self, db_name: &str, docs: &[Document]) -> Result<bool, EcholaliaError> {
        self.emit(WriterEvent::PopulatingDatabase {
            db_name: db_name.to_string(),
        });
        for chunk in self.chunks(docs) {
            self.bulk_insert(db_name, chunk).await?;
        }
        Ok(true)
    }

    /// Delete every database except system (`_`-prefixed) and whitelisted ones.
    ///
    /// Deletes answered with anything but 200 are ignored.
    pub async fn remove_all_dbs(&self) -> Result<(), EcholaliaError> {
        let response = self.client.get("_all_dbs").await?;
        if !response.status.is_success() {
            return Err(response.into_error());
        }
        let names: Vec<String> =
            serde_json::from_value(response.body).map_err(|e| EcholaliaError::Transport {
                message: format!("failed to parse _all_dbs response: {e}"),
                source: Some(Box::new(e)),
            })?;

        for db_name in names {
            if is_system_database(&db_name) {
                self.emit(WriterEvent::SkippedSystemDatabase { db_name });
                continue;
            }
            if self.whitelist.contains(&db_name) {
                self.emit(WriterEvent::SkippedWhitelistedDatabase { db_name });
                continue;
            }
            let response = self.client.delete(&db_name).await?;
            if response.status == StatusCode::OK {
                self.emit(WriterEvent::DatabaseDeleted { db_name });
            }
        }
        Ok(())
    }

    /// Either sweep (`args.clear`) or create `args.name` and fill it with `docs`.
    ///
    /// In sweep mode `args.whitelist` is merged into the writer's whitelist first.
    pub async fn run(&mut self, args: &RunArgs, docs: &[Document]) -> Result<(), EcholaliaError> {
        if args.clear {
            if let Some(extra) = &args.whitelist {
                self.extend_whitelist(extra.iter().cloned());
            }
            self.remove_all_dbs().await
        } else {
            self.create_db(&args.name).await?;
            self.create_docs(&args.name, docs).await?;
            Ok(())
        }
    }

    fn emit(&self, event: WriterEvent) {
        self.observer.on_event(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn writer(bulk_size: i64) -> Writer {
        Writer::new(&CouchDbConfig {
            host: Some("localhost".into()),
            port: Some(5984),
            bulk_size: Some(bulk_size),
            ..Default::default()
        })
        .unwrap()
    }

    fn docs(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| match json!({ "i": i }) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn constructs_with_defaults() {
        let w = Writer::new(&CouchDbConfig {
            host: Some("localhost".into()),
            port: Some(5984),
            whitelist: Some("keep".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(w.base_url(), "http://localhost:5984");
        assert_eq!(w.bulk_size(), 10);
        assert_eq!(w.whitelist(), ["keep"]);
    }

    #[test]
    fn zero_bulk_size_fails_construction() {
        let err = Writer::new(&CouchDbConfig {
            host: Some("localhost".into()),
            port: Some(5984),
            bulk_size: Some(0),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "configuration error: bulk_size has to exceed 0");
    }

    #[test]
    fn extend_whitelist_appends_in_order() {
        let mut w = writer(1);
        w.extend_whitelist(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(w.whitelist(), ["b", "a"]);
    }

    #[test]
    fn zero_docs_make_zero_chunks() {
        assert_eq!(writer(3).chunks(&[]).count(), 0);
    }

    #[test]
    fn three_docs_in_pairs() {
        let all = docs(3);
        let w = writer(2);
        let sizes: Vec<usize> = w.chunks(&all).map(<[Document]>::len).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    proptest! {
        #[test]
        fn chunks_cover_docs_in_order(n in 1i64..20, len in 0usize..100) {
            let all = docs(len);
            let w = writer(n);
            let chunks: Vec<&[Document]> = w.chunks(&all).collect();
            let n = n as usize;

            prop_assert_eq!(chunks.len(), len.div_ceil(n));
            if let Some((last, full)) = chunks.split_last() {
                prop_assert!(full.iter().all(|c| c.len() == n));
                prop_assert_eq!(last.len(), if len % n == 0 { n } else { len % n });
            }
            let flattened: Vec<Document> = chunks.concat();
            prop_assert_eq!(flattened, all);
        }
    }
}

//! In-memory store used by unit tests.
//!
//! Supports equality filters plus `$set` / `$unset` updates, which is enough
//! to exercise the session and the tools without a MongoDB server. Every
//! store call is counted so tests can assert the driver was never reached.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};

use super::store::{
    DocumentStore, FindQuery, StoreConnector, StoreError, StoreResult, UpdateOutcome,
};

/// Scheme accepted by [`MemoryConnector`].
pub const MEMORY_URI: &str = "memory://localhost";

type Collections = Arc<Mutex<HashMap<String, Vec<Document>>>>;

#[derive(Default)]
struct Counters {
    store_calls: AtomicUsize,
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// Connector handing out stores that share one in-memory dataset.
#[derive(Default)]
pub struct MemoryConnector {
    collections: Collections,
    counters: Arc<Counters>,
}

impl MemoryConnector {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of document operations executed by any store.
    pub fn store_calls(&self) -> usize {
        self.counters.store_calls.load(Ordering::SeqCst)
    }

    pub fn opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Snapshot of a collection's contents.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl StoreConnector for MemoryConnector {
    async fn open(
        &self,
        connection_string: &str,
        database_name: &str,
    ) -> StoreResult<Arc<dyn DocumentStore>> {
        if !connection_string.starts_with("memory://") {
            return Err(StoreError::rejected(format!(
                "unsupported connection string: {}",
                connection_string
            )));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(MemoryStore {
            database_name: database_name.to_string(),
            collections: self.collections.clone(),
            counters: self.counters.clone(),
        }))
    }
}

struct MemoryStore {
    database_name: String,
    collections: Collections,
    counters: Arc<Counters>,
}

impl MemoryStore {
    fn record_call(&self) {
        self.counters.store_calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn validate_filter(filter: &Document) -> StoreResult<()> {
    for (key, expected) in filter {
        if key.starts_with('$') {
            return Err(StoreError::rejected(format!(
                "unknown top level operator: {}",
                key
            )));
        }
        if let Bson::Document(inner) = expected {
            if let Some(op) = inner.keys().find(|k| k.starts_with('$')) {
                return Err(StoreError::rejected(format!("unknown operator: {}", op)));
            }
        }
    }
    Ok(())
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn validate_update(update: &Document) -> StoreResult<()> {
    if update.is_empty() {
        return Err(StoreError::rejected("update document must not be empty"));
    }
    for (op, fields) in update {
        match op.as_str() {
            "$set" | "$unset" => {
                if !matches!(fields, Bson::Document(_)) {
                    return Err(StoreError::rejected(format!(
                        "modifiers for {} must be a document",
                        op
                    )));
                }
            }
            other if other.starts_with('$') => {
                return Err(StoreError::rejected(format!("unknown modifier: {}", other)));
            }
            _ => {
                return Err(StoreError::rejected(
                    "update document requires atomic operators",
                ));
            }
        }
    }
    Ok(())
}

/// Apply a validated update; returns whether the document changed.
fn apply_update(document: &mut Document, update: &Document) -> bool {
    let before = document.clone();
    for (op, fields) in update {
        let Bson::Document(fields) = fields else {
            continue;
        };
        for (field, value) in fields {
            if op == "$set" {
                document.insert(field.clone(), value.clone());
            } else {
                document.remove(field);
            }
        }
    }
    *document != before
}

fn with_id_first(id: Bson, document: Document) -> Document {
    let mut out = Document::new();
    out.insert("_id", id);
    for (key, value) in document {
        if key != "_id" {
            out.insert(key, value);
        }
    }
    out
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn database_name(&self) -> &str {
        &self.database_name
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Bson> {
        self.record_call();
        let id = document
            .get("_id")
            .cloned()
            .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));
        let document = with_id_first(id.clone(), document);

        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|d| d.get("_id") == Some(&id)) {
            return Err(StoreError::rejected("E11000 duplicate key error"));
        }
        docs.push(document);
        Ok(id)
    }

    async fn find(&self, collection: &str, query: FindQuery) -> StoreResult<Vec<Document>> {
        self.record_call();
        validate_filter(&query.filter)?;

        let collections = self.collections.lock().unwrap();
        let limit = query.limit.map_or(usize::MAX, |l| l as usize);
        Ok(collections
            .get(collection)
            .into_iter()
            .flatten()
            .filter(|document| matches(document, &query.filter))
            .cloned()
            .skip(query.skip as usize)
            .take(limit)
            .collect())
    }

    async fn update_many(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> StoreResult<UpdateOutcome> {
        self.record_call();
        validate_filter(&filter)?;
        validate_update(&update)?;

        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();

        let mut matched_count = 0;
        let mut modified_count = 0;
        for document in docs.iter_mut() {
            if matches(document, &filter) {
                matched_count += 1;
                if apply_update(document, &update) {
                    modified_count += 1;
                }
            }
        }

        let mut upserted_id = None;
        if matched_count == 0 && upsert {
            let id = filter
                .get("_id")
                .cloned()
                .unwrap_or_else(|| Bson::ObjectId(ObjectId::new()));
            let mut document = with_id_first(id.clone(), filter);
            apply_update(&mut document, &update);
            docs.push(document);
            upserted_id = Some(id);
        }

        Ok(UpdateOutcome {
            matched_count,
            modified_count,
            upserted_id,
        })
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> StoreResult<u64> {
        self.record_call();
        validate_filter(&filter)?;

        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|document| !matches(document, &filter));
        Ok((before - docs.len()) as u64)
    }

    async fn close(&self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}

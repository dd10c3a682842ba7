//! Document store abstraction.
//!
//! The session and the CRUD tools never talk to the driver directly; they go
//! through these two traits. [`super::driver`] implements them on top of the
//! official `mongodb` crate.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{Bson, Document};
use thiserror::Error;

/// Errors raised by a store implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Error reported by the MongoDB driver.
    #[error("{0}")]
    Driver(#[from] mongodb::error::Error),

    /// The store refused the request before executing it.
    #[error("{0}")]
    Rejected(String),
}

impl StoreError {
    /// Create a new "rejected" error.
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Query options for [`DocumentStore::find`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    /// Filter document; empty matches everything.
    pub filter: Document,
    /// Number of documents to skip before returning results.
    pub skip: u64,
    /// Maximum number of documents to return. `None` is unbounded.
    pub limit: Option<u64>,
}

/// Outcome of an `update_many` call.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    /// Identifier of the document inserted by an upsert, if any.
    pub upserted_id: Option<Bson>,
}

/// An open handle to one database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the database this handle operates on.
    fn database_name(&self) -> &str;

    /// Insert one document and return its identifier.
    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Bson>;

    /// Return the documents matching `query`, in natural order.
    async fn find(&self, collection: &str, query: FindQuery) -> StoreResult<Vec<Document>>;

    /// Apply `update` to every document matching `filter`.
    async fn update_many(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> StoreResult<UpdateOutcome>;

    /// Delete every document matching `filter` and return how many were removed.
    async fn delete_many(&self, collection: &str, filter: Document) -> StoreResult<u64>;

    /// Release the underlying connection.
    async fn close(&self);
}

/// Opens [`DocumentStore`] handles.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    /// Open a handle on `database_name` and verify the server is reachable.
    async fn open(
        &self,
        connection_string: &str,
        database_name: &str,
    ) -> StoreResult<Arc<dyn DocumentStore>>;
}

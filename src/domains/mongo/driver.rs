//! MongoDB-backed store implementation.

use std::sync::Arc;

use async_trait::async_trait;
use bson::{Bson, Document, doc};
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    options::{ClientOptions, FindOptions},
};
use tracing::{debug, instrument};

use super::store::{DocumentStore, FindQuery, StoreConnector, StoreResult, UpdateOutcome};

/// Opens connections with the official MongoDB driver.
#[derive(Debug, Clone, Default)]
pub struct MongoConnector {
    /// Application name reported to the server in the connection handshake.
    app_name: Option<String>,
}

impl MongoConnector {
    /// Create a connector, optionally reporting `app_name` to the server.
    pub fn new(app_name: Option<String>) -> Self {
        Self { app_name }
    }
}

#[async_trait]
impl StoreConnector for MongoConnector {
    #[instrument(skip_all, fields(database = %database_name))]
    async fn open(
        &self,
        connection_string: &str,
        database_name: &str,
    ) -> StoreResult<Arc<dyn DocumentStore>> {
        let mut options = ClientOptions::parse(connection_string).await?;
        if let Some(app_name) = &self.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options)?;

        // Client creation is lazy; ping so a bad address fails here.
        if let Err(e) = client.database("admin").run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(e.into());
        }
        debug!("ping succeeded");

        Ok(Arc::new(MongoStore {
            database: client.database(database_name),
            client,
        }))
    }
}

/// A live client bound to one database.
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

/// Driver options for a query: no skip when it is zero, and a positive
/// limit (a negative one would mean a single batch to the server).
fn find_options(query: &FindQuery) -> FindOptions {
    let mut options = FindOptions::default();
    options.skip = (query.skip > 0).then_some(query.skip);
    options.limit = query
        .limit
        .map(|limit| i64::try_from(limit).unwrap_or(i64::MAX));
    options
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn database_name(&self) -> &str {
        self.database.name()
    }

    async fn insert_one(&self, collection: &str, document: Document) -> StoreResult<Bson> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn find(&self, collection: &str, query: FindQuery) -> StoreResult<Vec<Document>> {
        let options = find_options(&query);
        let collection = self.collection(collection);
        let cursor = collection.find(query.filter).with_options(options).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn update_many(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
        upsert: bool,
    ) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection(collection)
            .update_many(filter, update)
            .upsert(upsert)
            .await?;

        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id,
        })
    }

    async fn delete_many(&self, collection: &str, filter: Document) -> StoreResult<u64> {
        let result = self.collection(collection).delete_many(filter).await?;
        Ok(result.deleted_count)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(skip: u64, limit: Option<u64>) -> FindQuery {
        FindQuery {
            filter: doc! { "status": "open" },
            skip,
            limit,
        }
    }

    #[test]
    fn test_find_options_unbounded() {
        let options = find_options(&query(0, None));
        assert_eq!(options.skip, None);
        assert_eq!(options.limit, None);
    }

    #[test]
    fn test_find_options_skip_and_limit() {
        let options = find_options(&query(20, Some(10)));
        assert_eq!(options.skip, Some(20));
        assert_eq!(options.limit, Some(10));
    }

    #[test]
    fn test_find_options_limit_saturates() {
        let options = find_options(&query(0, Some(u64::MAX)));
        assert_eq!(options.limit, Some(i64::MAX));
    }

    #[tokio::test]
    async fn test_find_builds_without_server() {
        // Client construction is lazy, so building the action needs no server.
        let client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let store = MongoStore {
            database: client.database("testdb"),
            client,
        };
        let q = query(5, Some(2));
        let options = find_options(&q);
        let collection = store.collection("tickets");
        let _action = collection.find(q.filter).with_options(options);
        assert_eq!(store.database_name(), "testdb");
    }

    #[tokio::test]
    async fn test_open_rejects_malformed_uri() {
        let connector = MongoConnector::default();
        let result = connector.open("not-a-mongodb-uri", "testdb").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_open_rejects_unknown_scheme() {
        let connector = MongoConnector::new(Some("mongo-mcp-test".to_string()));
        let err = match connector.open("http://localhost:27017", "testdb").await {
            Ok(_) => panic!("expected connection string parse error"),
            Err(e) => e,
        };
        assert!(!err.to_string().is_empty());
    }
}

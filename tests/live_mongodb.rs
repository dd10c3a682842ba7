//! Round trips against a real MongoDB deployment.
//!
//! Ignored by default. Run with a disposable server:
//!
//! ```text
//! MONGODB_TEST_URI=mongodb://localhost:27017 cargo test --test live_mongodb -- --ignored
//! ```

use mongo_mcp_server::domains::{
    mongo::MongoSession,
    tools::definitions::{
        ConnectParams, ConnectTool, CreateParams, CreateTool, DeleteParams, DeleteTool,
        DisconnectParams, DisconnectTool, ReadParams, ReadTool, UpdateParams, UpdateTool,
    },
};
use rmcp::model::{CallToolResult, RawContent};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

const DATABASE: &str = "mongo_mcp_server_test";

fn test_uri() -> String {
    std::env::var("MONGODB_TEST_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}

fn params<P: DeserializeOwned>(value: Value) -> P {
    serde_json::from_value(value).unwrap()
}

fn text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

/// Connect a fresh session and empty `collection`.
async fn connected(collection: &str) -> MongoSession {
    let session = MongoSession::mongodb(Some("mongo-mcp-server-tests".to_string()));
    let result = ConnectTool::execute(
        &params::<ConnectParams>(json!({
            "connection_string": test_uri(),
            "database_name": DATABASE
        })),
        &session,
    )
    .await;
    assert_eq!(text(&result), format!("connected to {}", DATABASE));

    DeleteTool::execute(
        &params::<DeleteParams>(json!({ "collection": collection, "filter": {} })),
        &session,
    )
    .await;
    session
}

async fn read_all(session: &MongoSession, collection: &str) -> Value {
    let result = ReadTool::execute(
        &params::<ReadParams>(json!({ "collection": collection })),
        session,
    )
    .await;
    assert_ne!(result.is_error, Some(true), "{}", text(&result));
    result.structured_content.unwrap()
}

#[tokio::test]
#[ignore = "requires MONGODB_TEST_URI"]
async fn create_then_read_round_trip() {
    let session = connected("people").await;

    let created = CreateTool::execute(
        &params::<CreateParams>(json!({
            "collection": "people",
            "document": { "name": "Ada", "age": 36 }
        })),
        &session,
    )
    .await;
    assert!(text(&created).starts_with("created, id="));
    let id = created.structured_content.unwrap()["inserted_id"].clone();

    let read = read_all(&session, "people").await;
    assert_eq!(read["count"], 1);
    assert_eq!(read["documents"][0]["_id"], id);
    assert_eq!(read["documents"][0]["name"], "Ada");

    DisconnectTool::execute(&DisconnectParams::default(), &session).await;
}

#[tokio::test]
#[ignore = "requires MONGODB_TEST_URI"]
async fn update_with_upsert_inserts_one_document() {
    let session = connected("counters").await;

    let result = UpdateTool::execute(
        &params::<UpdateParams>(json!({
            "collection": "counters",
            "filter": { "name": "visits" },
            "update": { "$set": { "value": 1 } },
            "upsert": true
        })),
        &session,
    )
    .await;
    assert!(text(&result).starts_with("matched=0, modified=0, upserted="));

    let read = read_all(&session, "counters").await;
    assert_eq!(read["count"], 1);
    assert_eq!(read["documents"][0]["value"], 1);

    DisconnectTool::execute(&DisconnectParams::default(), &session).await;
}

#[tokio::test]
#[ignore = "requires MONGODB_TEST_URI"]
async fn delete_removes_every_match() {
    let session = connected("tasks").await;

    for done in [true, true, false] {
        CreateTool::execute(
            &params::<CreateParams>(json!({
                "collection": "tasks",
                "document": { "done": done }
            })),
            &session,
        )
        .await;
    }

    let result = DeleteTool::execute(
        &params::<DeleteParams>(json!({ "collection": "tasks", "filter": { "done": true } })),
        &session,
    )
    .await;
    assert_eq!(text(&result), "deleted 2");
    assert_eq!(read_all(&session, "tasks").await["count"], 1);

    DisconnectTool::execute(&DisconnectParams::default(), &session).await;
}

#[tokio::test]
#[ignore = "requires MONGODB_TEST_URI"]
async fn nested_object_ids_are_strings() {
    let session = connected("orders").await;

    CreateTool::execute(
        &params::<CreateParams>(json!({
            "collection": "orders",
            "document": {
                "lines": [
                    { "product": { "$oid": "65a1b2c3d4e5f60718293a4b" }, "qty": 2 }
                ]
            }
        })),
        &session,
    )
    .await;

    let read = read_all(&session, "orders").await;
    let line = &read["documents"][0]["lines"][0];
    assert_eq!(line["product"], "65a1b2c3d4e5f60718293a4b");
    assert!(read["documents"][0]["_id"].is_string());

    DisconnectTool::execute(&DisconnectParams::default(), &session).await;
}

#[tokio::test]
#[ignore = "requires MONGODB_TEST_URI"]
async fn unreachable_server_reports_connection_failure() {
    let session = MongoSession::mongodb(None);
    let result = ConnectTool::execute(
        &params::<ConnectParams>(json!({
            "connection_string": "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=500",
            "database_name": DATABASE
        })),
        &session,
    )
    .await;

    assert_eq!(result.is_error, Some(true));
    assert!(text(&result).starts_with("connection failed: "));
    assert!(!session.is_connected().await);
}

//! Helpers shared by the MongoDB tool definitions.

use bson::Document;
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domains::mongo::{Operation, SessionError, serialize::document_from_json};

/// Deserialize tool arguments into a parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: JsonObject) -> Result<P, McpError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
}

/// Create an error result from a session error.
pub fn error_result(err: &SessionError) -> CallToolResult {
    warn!("{}", err);
    CallToolResult::error(vec![Content::text(err.to_string())])
}

/// Create a success result with a text summary and structured content.
pub fn structured_result<T: Serialize>(summary: String, structured: &T) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(summary)],
        structured_content: serde_json::to_value(structured).ok(),
        is_error: Some(false),
        meta: None,
    }
}

/// Serialize a tool result for the HTTP transport.
#[cfg(feature = "http")]
pub fn http_response(result: &CallToolResult) -> Result<Value, String> {
    serde_json::to_value(result).map_err(|e| e.to_string())
}

/// Reject empty collection names before they reach the driver.
pub fn check_collection(operation: Operation, collection: &str) -> Result<(), SessionError> {
    if collection.trim().is_empty() {
        return Err(SessionError::operation_failed(
            operation,
            "collection name must not be empty",
        ));
    }
    Ok(())
}

/// Convert a request object into a BSON document for `operation`.
pub fn to_document(operation: Operation, object: &Map<String, Value>) -> Result<Document, SessionError> {
    document_from_json(object.clone()).map_err(|e| SessionError::operation_failed(operation, e))
}

#[cfg(test)]
pub(crate) fn result_text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[cfg(test)]
pub(crate) fn json_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("Expected a JSON object"),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::domains::mongo::MongoSession;
    use crate::domains::mongo::testing::{MEMORY_URI, MemoryConnector};

    /// A session connected to a fresh in-memory database.
    pub async fn connected_session() -> (Arc<MemoryConnector>, Arc<MongoSession>) {
        let connector = MemoryConnector::new();
        let session = Arc::new(MongoSession::new(connector.clone()));
        session.connect(MEMORY_URI, "testdb").await.unwrap();
        (connector, session)
    }

    /// A session that was never connected.
    pub fn disconnected_session() -> (Arc<MemoryConnector>, Arc<MongoSession>) {
        let connector = MemoryConnector::new();
        let session = Arc::new(MongoSession::new(connector.clone()));
        (connector, session)
    }
}

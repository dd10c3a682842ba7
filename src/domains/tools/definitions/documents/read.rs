//! Read tool definition.
//!
//! Finds documents in a collection and returns them as JSON.

use bson::Document;
use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{check_collection, error_result, parse_params, to_document};
use crate::domains::mongo::{
    FindQuery, MongoSession, Operation, SessionError, serialize::document_to_json,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the read tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadParams {
    /// Collection to query.
    #[serde(alias = "collection_name")]
    pub collection: String,

    /// Query filter. Omit to match every document.
    #[serde(default)]
    pub filter: Option<Map<String, Value>>,

    /// Maximum number of documents to return. Omit or 0 for no limit.
    #[serde(default)]
    pub limit: Option<u64>,

    /// Number of matching documents to skip (applied before limit).
    #[serde(default)]
    pub skip: Option<u64>,
}

impl ReadParams {
    fn to_query(&self) -> Result<FindQuery, SessionError> {
        let filter = match &self.filter {
            Some(filter) => to_document(Operation::Read, filter)?,
            None => Document::new(),
        };

        Ok(FindQuery {
            filter,
            skip: self.skip.unwrap_or(0),
            limit: self.limit.filter(|&limit| limit > 0),
        })
    }
}

// ============================================================================
// Output Structure (JSON format for AI agents)
// ============================================================================

/// Documents returned by a read
#[derive(Debug, Serialize, JsonSchema)]
struct ReadResult {
    /// Collection that was queried
    collection: String,
    /// Number of documents returned
    count: usize,
    /// Matching documents, identifiers rendered as strings
    documents: Vec<Value>,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Read tool - queries documents.
pub struct ReadTool;

impl ReadTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "read";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Read documents from a collection. Optional filter (MongoDB query document), skip and limit. Returns JSON with the collection name, the number of documents and the documents themselves; ObjectIds are rendered as hex strings.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(collection = %params.collection))]
    pub async fn execute(params: &ReadParams, session: &MongoSession) -> CallToolResult {
        info!("Read tool called on '{}'", params.collection);

        let result = match Self::find(params, session).await {
            Ok(result) => result,
            Err(e) => return error_result(&e),
        };

        info!(
            "Read {} documents from '{}'",
            result.count, params.collection
        );

        let structured = match serde_json::to_value(&result) {
            Ok(value) => value,
            Err(e) => {
                return error_result(&SessionError::operation_failed(
                    Operation::Read,
                    e.to_string(),
                ));
            }
        };
        let text = serde_json::to_string_pretty(&structured).unwrap_or_default();

        CallToolResult {
            content: vec![Content::text(text)],
            structured_content: Some(structured),
            is_error: Some(false),
            meta: None,
        }
    }

    async fn find(params: &ReadParams, session: &MongoSession) -> Result<ReadResult, SessionError> {
        let store = session.store().await?;
        check_collection(Operation::Read, &params.collection)?;
        let query = params.to_query()?;

        let documents = store
            .find(&params.collection, query)
            .await
            .map_err(|e| SessionError::operation_failed(Operation::Read, e.to_string()))?;

        let documents: Vec<Value> = documents.into_iter().map(document_to_json).collect();
        Ok(ReadResult {
            collection: params.collection.clone(),
            count: documents.len(),
            documents,
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        session: Arc<MongoSession>,
    ) -> Result<serde_json::Value, String> {
        let params: ReadParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let result = Self::execute(&params, &session).await;
        super::super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ReadParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ReadResult>().into()),
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(session: Arc<MongoSession>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let session = session.clone();
            async move {
                let params: ReadParams = parse_params(args)?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

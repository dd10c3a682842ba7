//! Update tool definition.
//!
//! Applies an update to every document matching a filter.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{
    check_collection, error_result, parse_params, structured_result, to_document,
};
use crate::domains::mongo::{MongoSession, Operation, SessionError, serialize::id_to_string};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the update tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateParams {
    /// Collection to update.
    #[serde(alias = "collection_name")]
    pub collection: String,

    /// Filter selecting the documents to update. `{}` matches every document.
    pub filter: Map<String, Value>,

    /// Update document using operators, e.g. `{"$set": {"age": 26}}`.
    pub update: Map<String, Value>,

    /// Insert a new document when nothing matches the filter.
    #[serde(default)]
    pub upsert: bool,
}

// ============================================================================
// Output Structure (JSON format for AI agents)
// ============================================================================

/// Counts reported by an update
#[derive(Debug, Serialize, JsonSchema)]
struct UpdateResult {
    /// Collection that was updated
    collection: String,
    /// Documents matching the filter
    matched_count: u64,
    /// Documents actually changed
    modified_count: u64,
    /// Identifier of the document created by an upsert
    #[serde(skip_serializing_if = "Option::is_none")]
    upserted_id: Option<String>,
}

impl UpdateResult {
    fn summary(&self) -> String {
        let mut summary = format!(
            "matched={}, modified={}",
            self.matched_count, self.modified_count
        );
        if let Some(id) = &self.upserted_id {
            summary.push_str(&format!(", upserted={}", id));
        }
        summary
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Update tool - updates all matching documents.
pub struct UpdateTool;

impl UpdateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update every document in a collection that matches the filter. Use upsert=true to insert a document when nothing matches. Returns matched and modified counts, plus the new identifier after an upsert.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(collection = %params.collection, upsert = params.upsert))]
    pub async fn execute(params: &UpdateParams, session: &MongoSession) -> CallToolResult {
        info!("Update tool called on '{}'", params.collection);

        match Self::update(params, session).await {
            Ok(result) => {
                info!(
                    "Updated {} of {} matching documents in '{}'",
                    result.modified_count, result.matched_count, params.collection
                );
                structured_result(result.summary(), &result)
            }
            Err(e) => error_result(&e),
        }
    }

    async fn update(params: &UpdateParams, session: &MongoSession) -> Result<UpdateResult, SessionError> {
        let store = session.store().await?;
        check_collection(Operation::Update, &params.collection)?;
        let filter = to_document(Operation::Update, &params.filter)?;
        let update = to_document(Operation::Update, &params.update)?;

        let outcome = store
            .update_many(&params.collection, filter, update, params.upsert)
            .await
            .map_err(|e| SessionError::operation_failed(Operation::Update, e.to_string()))?;

        Ok(UpdateResult {
            collection: params.collection.clone(),
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
            upserted_id: outcome.upserted_id.as_ref().map(id_to_string),
        })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        session: Arc<MongoSession>,
    ) -> Result<serde_json::Value, String> {
        let params: UpdateParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let result = Self::execute(&params, &session).await;
        super::super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<UpdateParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<UpdateResult>().into()),
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
                let params: UpdateParams = parse_params(args)?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

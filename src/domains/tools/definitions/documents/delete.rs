//! Delete tool definition.
//!
//! Removes every document matching a filter.

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
use crate::domains::mongo::{MongoSession, Operation, SessionError};

/// Parameters for the delete tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteParams {
    /// Collection to delete from.
    #[serde(alias = "collection_name")]
    pub collection: String,

    /// Filter selecting the documents to delete. `{}` deletes every document.
    pub filter: Map<String, Value>,
}

/// Result of a delete
#[derive(Debug, Serialize, JsonSchema)]
struct DeleteResult {
    /// Collection documents were deleted from
    collection: String,
    /// Number of documents removed
    deleted_count: u64,
}

/// Delete tool - removes all matching documents.
pub struct DeleteTool;

impl DeleteTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Delete every document in a collection that matches the filter and return how many were removed. An empty filter {} deletes all documents.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(collection = %params.collection))]
    pub async fn execute(params: &DeleteParams, session: &MongoSession) -> CallToolResult {
        info!("Delete tool called on '{}'", params.collection);

        match Self::delete(params, session).await {
            Ok(deleted_count) => {
                info!("Deleted {} documents from '{}'", deleted_count, params.collection);
                structured_result(
                    format!("deleted {}", deleted_count),
                    &DeleteResult {
                        collection: params.collection.clone(),
                        deleted_count,
                    },
                )
            }
            Err(e) => error_result(&e),
        }
    }

    async fn delete(params: &DeleteParams, session: &MongoSession) -> Result<u64, SessionError> {
        let store = session.store().await?;
        check_collection(Operation::Delete, &params.collection)?;
        let filter = to_document(Operation::Delete, &params.filter)?;

        store
            .delete_many(&params.collection, filter)
            .await
            .map_err(|e| SessionError::operation_failed(Operation::Delete, e.to_string()))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        session: Arc<MongoSession>,
    ) -> Result<serde_json::Value, String> {
        let params: DeleteParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let result = Self::execute(&params, &session).await;
        super::super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DeleteParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<DeleteResult>().into()),
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
                let params: DeleteParams = parse_params(args)?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

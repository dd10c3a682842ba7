//! Create tool definition.
//!
//! Inserts a single document into a collection.

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

/// Parameters for the create tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateParams {
    /// Collection to insert into. Created on first insert if missing.
    #[serde(alias = "collection_name")]
    pub collection: String,

    /// Document to insert. An `_id` is assigned when absent.
    pub document: Map<String, Value>,
}

// ============================================================================
// Output Structure (JSON format for AI agents)
// ============================================================================

/// Result of an insert
#[derive(Debug, Serialize, JsonSchema)]
struct CreateResult {
    /// Collection the document was inserted into
    collection: String,
    /// Identifier of the new document, as a string
    inserted_id: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Create tool - inserts one document.
pub struct CreateTool;

impl CreateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Insert one document into a collection and return its identifier. Extended JSON such as {\"$oid\": \"...\"} or {\"$date\": \"...\"} is accepted in field values.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(collection = %params.collection))]
    pub async fn execute(params: &CreateParams, session: &MongoSession) -> CallToolResult {
        info!("Create tool called on '{}'", params.collection);

        match Self::insert(params, session).await {
            Ok(inserted_id) => {
                info!("Inserted document {} into '{}'", inserted_id, params.collection);
                structured_result(
                    format!("created, id={}", inserted_id),
                    &CreateResult {
                        collection: params.collection.clone(),
                        inserted_id,
                    },
                )
            }
            Err(e) => error_result(&e),
        }
    }

    async fn insert(params: &CreateParams, session: &MongoSession) -> Result<String, SessionError> {
        let store = session.store().await?;
        check_collection(Operation::Create, &params.collection)?;
        let document = to_document(Operation::Create, &params.document)?;

        let id = store
            .insert_one(&params.collection, document)
            .await
            .map_err(|e| SessionError::operation_failed(Operation::Create, e.to_string()))?;

        Ok(id_to_string(&id))
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        session: Arc<MongoSession>,
    ) -> Result<serde_json::Value, String> {
        let params: CreateParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let result = Self::execute(&params, &session).await;
        super::super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<CreateParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<CreateResult>().into()),
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
                let params: CreateParams = parse_params(args)?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

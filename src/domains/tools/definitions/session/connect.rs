//! Connect tool definition.
//!
//! Opens the session's MongoDB connection, replacing any active one.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{error_result, parse_params, structured_result};
use crate::domains::mongo::MongoSession;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the connect tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ConnectParams {
    /// MongoDB connection string, e.g. `mongodb://localhost:27017`.
    #[serde(alias = "connectionString")]
    pub connection_string: String,

    /// Name of the database the document tools operate on.
    #[serde(alias = "databaseName")]
    pub database_name: String,
}

// ============================================================================
// Output Structure (JSON format for AI agents)
// ============================================================================

/// Result of a successful connect.
#[derive(Debug, Serialize, JsonSchema)]
struct ConnectResult {
    /// Selected database
    database: String,
    /// Always true on success
    connected: bool,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Connect tool - opens the MongoDB connection used by the document tools.
pub struct ConnectTool;

impl ConnectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "connect";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Connect to a MongoDB database. Must be called before create, read, update or delete. Calling it again closes the current connection first.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(database = %params.database_name))]
    pub async fn execute(params: &ConnectParams, session: &MongoSession) -> CallToolResult {
        info!("Connect tool called for database '{}'", params.database_name);

        match session
            .connect(&params.connection_string, &params.database_name)
            .await
        {
            Ok(()) => structured_result(
                format!("connected to {}", params.database_name),
                &ConnectResult {
                    database: params.database_name.clone(),
                    connected: true,
                },
            ),
            Err(e) => error_result(&e),
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        session: Arc<MongoSession>,
    ) -> Result<serde_json::Value, String> {
        let params: ConnectParams =
            serde_json::from_value(arguments).map_err(|e| format!("Invalid arguments: {}", e))?;

        let result = Self::execute(&params, &session).await;
        super::super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<ConnectParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<ConnectResult>().into()),
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
                let params: ConnectParams = parse_params(args)?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::mongo::testing::MEMORY_URI;
    use crate::domains::tools::definitions::common::{fixtures::disconnected_session, result_text};

    #[tokio::test]
    async fn test_connect_success() {
        let (_, session) = disconnected_session();
        let params = ConnectParams {
            connection_string: MEMORY_URI.to_string(),
            database_name: "inventory".to_string(),
        };

        let result = ConnectTool::execute(&params, &session).await;

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result_text(&result), "connected to inventory");
        assert!(session.is_connected().await);

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["database"], "inventory");
        assert_eq!(structured["connected"], true);
    }

    #[tokio::test]
    async fn test_connect_failure_leaves_session_disconnected() {
        let (_, session) = disconnected_session();
        let params = ConnectParams {
            connection_string: "mongodb://unreachable".to_string(),
            database_name: "inventory".to_string(),
        };

        let result = ConnectTool::execute(&params, &session).await;

        assert!(result.is_error.unwrap_or(false));
        assert!(result_text(&result).starts_with("connection failed: "));
        assert!(!session.is_connected().await);
    }

    #[test]
    fn test_params_accept_camel_case() {
        let params: ConnectParams = serde_json::from_value(serde_json::json!({
            "connectionString": "mongodb://localhost:27017",
            "databaseName": "testdb"
        }))
        .unwrap();
        assert_eq!(params.connection_string, "mongodb://localhost:27017");
        assert_eq!(params.database_name, "testdb");
    }

    #[test]
    fn test_params_require_database_name() {
        let result: Result<ConnectParams, _> = serde_json::from_value(serde_json::json!({
            "connection_string": "mongodb://localhost:27017"
        }));
        assert!(result.is_err());
    }
}

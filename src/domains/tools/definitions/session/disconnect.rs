//! Disconnect tool definition.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::super::common::{parse_params, structured_result};
use crate::domains::mongo::MongoSession;

/// Parameters for the disconnect tool (none).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct DisconnectParams {}

/// Result of a disconnect call
#[derive(Debug, Serialize, JsonSchema)]
struct DisconnectResult {
    /// Whether a connection was open and has been closed
    was_connected: bool,
}

/// Disconnect tool - closes the active MongoDB connection, if any.
pub struct DisconnectTool;

impl DisconnectTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "disconnect";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Close the current MongoDB connection. Succeeds even when no connection is open.";

    /// Execute the tool logic. Never fails.
    #[instrument(skip_all)]
    pub async fn execute(_params: &DisconnectParams, session: &MongoSession) -> CallToolResult {
        info!("Disconnect tool called");

        let was_connected = session.disconnect().await;
        let summary = if was_connected {
            "disconnected"
        } else {
            "no active connection"
        };

        structured_result(summary.to_string(), &DisconnectResult { was_connected })
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        _arguments: serde_json::Value,
        session: Arc<MongoSession>,
    ) -> Result<serde_json::Value, String> {
        let result = Self::execute(&DisconnectParams::default(), &session).await;
        super::super::common::http_response(&result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: schema_for_type::<DisconnectParams>().into(),
            annotations: None,
            output_schema: Some(schema_for_type::<DisconnectResult>().into()),
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
                let params: DisconnectParams = parse_params(args)?;
                Ok(Self::execute(&params, &session).await)
            }
            .boxed()
        })
    }
}

//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use crate::domains::mongo::MongoSession;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

use super::definitions::{
    ConnectTool, CreateTool, DeleteTool, DisconnectTool, ReadTool, UpdateTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// All tools share the session the registry was created with.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    session: Arc<MongoSession>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(session: Arc<MongoSession>) -> Self {
        Self { session }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ConnectTool::NAME,
            DisconnectTool::NAME,
            CreateTool::NAME,
            ReadTool::NAME,
            UpdateTool::NAME,
            DeleteTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ConnectTool::to_tool(),
            DisconnectTool::to_tool(),
            CreateTool::to_tool(),
            ReadTool::to_tool(),
            UpdateTool::to_tool(),
            DeleteTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let session = self.session.clone();
        let result = match name {
            ConnectTool::NAME => ConnectTool::http_handler(arguments, session).await,
            DisconnectTool::NAME => DisconnectTool::http_handler(arguments, session).await,
            CreateTool::NAME => CreateTool::http_handler(arguments, session).await,
            ReadTool::NAME => ReadTool::http_handler(arguments, session).await,
            UpdateTool::NAME => UpdateTool::http_handler(arguments, session).await,
            DeleteTool::NAME => DeleteTool::http_handler(arguments, session).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                return Err(ToolError::not_found(name));
            }
        };
        result.map_err(ToolError::invalid_arguments)
    }
}

//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! Every tool shares the server's [`MongoSession`], so one connection is
//! visible to all clients of the process.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;

use super::config::Config;
use crate::domains::{mongo::MongoSession, tools::build_tool_router};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions sent to clients during initialization.
pub const INSTRUCTIONS: &str = "MongoDB CRUD server. Call `connect` with a connection string and database name first; then use `create`, `read`, `update` and `delete` on collections of that database. `disconnect` closes the connection.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls to the MongoDB tools.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The MongoDB connection shared by all tools.
    session: Arc<MongoSession>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server backed by the MongoDB driver.
    ///
    /// The server starts disconnected.
    pub fn new(config: Config) -> Self {
        let session = Arc::new(MongoSession::mongodb(config.mongodb.app_name.clone()));
        Self::with_session(config, session)
    }

    /// Create a new MCP server around an existing session.
    pub fn with_session(config: Config, session: Arc<MongoSession>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(session.clone()),
            config: Arc::new(config),
            session,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the MongoDB session shared by the tools.
    pub fn session(&self) -> &Arc<MongoSession> {
        &self.session
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> crate::Result<serde_json::Value> {
        let registry = ToolRegistry::new(self.session.clone());
        Ok(registry.call_tool(name, arguments).await?)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

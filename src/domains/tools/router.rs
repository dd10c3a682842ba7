//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::mongo::MongoSession;

use super::definitions::{
    ConnectTool, CreateTool, DeleteTool, DisconnectTool, ReadTool, UpdateTool,
};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(session: Arc<MongoSession>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ConnectTool::create_route(session.clone()))
        .with_route(DisconnectTool::create_route(session.clone()))
        .with_route(CreateTool::create_route(session.clone()))
        .with_route(ReadTool::create_route(session.clone()))
        .with_route(UpdateTool::create_route(session.clone()))
        .with_route(DeleteTool::create_route(session))
}

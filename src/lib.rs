//! MongoDB MCP Server Library
//!
//! A Model Context Protocol server that lets an agent connect to a MongoDB
//! deployment and run basic CRUD operations through six tools: `connect`,
//! `disconnect`, `create`, `read`, `update` and `delete`.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the rmcp server handler and
//!   the STDIO / TCP / HTTP transports
//! - **domains**: business logic organized by bounded contexts
//!   - **mongo**: the connection session, the document store seam and the
//!     driver-backed implementation, BSON/JSON conversion
//!   - **tools**: MCP tool definitions, router and registry
//!
//! # Example
//!
//! ```rust,no_run
//! use mongo_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     // The server starts disconnected; clients call `connect` first.
//!     assert!(!server.session().is_connected().await);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};

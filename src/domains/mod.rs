//! Domains module containing business logic organized by bounded contexts.
//!
//! - **mongo**: connection session, document store abstraction and BSON helpers
//! - **tools**: MCP tools that expose the session to clients

pub mod mongo;
pub mod tools;

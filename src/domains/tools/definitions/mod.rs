//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod documents;
pub mod session;

pub use documents::{
    CreateParams, CreateTool, DeleteParams, DeleteTool, ReadParams, ReadTool, UpdateParams,
    UpdateTool,
};
pub use session::{ConnectParams, ConnectTool, DisconnectParams, DisconnectTool};

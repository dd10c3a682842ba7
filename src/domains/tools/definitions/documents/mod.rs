//! Document CRUD tools.
//!
//! Each tool checks the session for an active connection, issues a single
//! store call and renders the outcome as text.

pub mod create;
pub mod delete;
pub mod read;
pub mod update;

pub use create::{CreateParams, CreateTool};
pub use delete::{DeleteParams, DeleteTool};
pub use read::{ReadParams, ReadTool};
pub use update::{UpdateParams, UpdateTool};

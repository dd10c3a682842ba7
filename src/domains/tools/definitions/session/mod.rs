//! Connection lifecycle tools.

pub mod connect;
pub mod disconnect;

pub use connect::{ConnectParams, ConnectTool};
pub use disconnect::{DisconnectParams, DisconnectTool};

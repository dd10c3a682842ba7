//! MongoDB domain module.
//!
//! - `session` - the single connection held by the server
//! - `store` - traits the session and tools use to reach the database
//! - `driver` - store implementation on the official `mongodb` crate
//! - `serialize` - JSON/BSON conversion for tool payloads
//! - `error` - session error taxonomy

pub mod driver;
mod error;
pub mod serialize;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use driver::MongoConnector;
pub use error::{Operation, SessionError};
pub use session::{ConnectionState, MongoSession};
pub use store::{DocumentStore, FindQuery, StoreConnector, StoreError, UpdateOutcome};

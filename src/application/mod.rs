pub mod admin_client;
pub mod error;
pub mod transaction;

pub use admin_client::AdminClient;
pub use error::{ApplicationError, CallError, CallResult, ProtocolError, Result};

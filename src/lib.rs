pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::error::{ApplicationError, CallError, CallResult, ProtocolError, Result};
pub use application::AdminClient;
pub use config::ClientConfig;
pub use domain::ErrorCode;
pub use ports::incoming::topic_admin::TopicAdmin;

mod api;
pub mod create_topics;
pub mod delete_topics;
pub mod header;
#[cfg(test)]
mod proptests;

pub use api::*;
pub use create_topics::*;
pub use delete_topics::*;
pub use header::*;

mod array;
pub(crate) mod macros;
mod primitives;
mod traits;

pub(crate) use macros::wire_fields;
pub use primitives::NULL_LENGTH;
pub use traits::{ensure_remaining, Decode, Encode};

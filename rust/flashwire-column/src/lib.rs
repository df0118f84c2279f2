//! # flashwire-column
//!
//! The in-memory engine column model used on both ends of the wire codec.
//! A [`column::Column`] is the simplest representation of a typed value
//! vector, using fully decoded, contiguous buffers for storage:
//!
//! - **Values** in a growable byte buffer with typed access
//! - **Offsets** for variable-length (binary) elements
//! - **Presence** for null tracking (trivial / all-nulls / byte map)
//! - **Type descriptor** metadata, including the decimal scale bound to
//!   the column type
//!
//! Fixed-size elements (integers, floats, packed datetimes, decimals) are
//! stored directly in the value buffer. Variable-sized elements are stored
//! as a concatenated byte buffer accompanied by `n + 1` offsets; the value
//! at index `i` occupies the byte range `offsets[i]..offsets[i + 1]`.

pub mod column;
pub mod offsets;
pub mod presence;
pub mod schema;
pub mod values;

pub use column::Column;
pub use schema::{ElementType, TypeDescriptor};

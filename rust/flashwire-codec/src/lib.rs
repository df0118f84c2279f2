//! # flashwire-codec
//!
//! The bidirectional columnar codec between the engine's in-memory columns
//! and the length-prefixed, little-endian wire columns of the remote query
//! protocol.
//!
//! Data flow is one-directional per call:
//!
//! - [`encode_column`] copies rows of an engine column slice `[start, end)`
//!   into a [`WireColumn`] appender, after validating the engine type
//!   against the declared wire field.
//! - [`decode_column`] consumes a wire byte cursor plus the null bitmap
//!   (and, for strings, the per-row offsets) and appends into an engine
//!   column, returning the advanced cursor.
//!
//! The leaf codecs underneath:
//!
//! - [`decimal`]: scaled two's-complement integers ⇄ packed base-10^9
//!   words ([`WireDecimal`])
//! - [`time`]: packed 64-bit calendar values ⇄ the fixed 20-byte wire
//!   record ([`WireTime`])
//! - [`bitmap`]: the bit-packed wire null bitmap
//! - [`reader`]: alignment-safe little-endian cursor reads
//!
//! The codec is single-threaded and synchronous; all buffers are caller
//! provided, and any error aborts the whole column conversion.

pub mod bitmap;
pub mod column;
pub mod decimal;
pub mod decode;
pub mod encode;
pub mod field;
pub mod reader;
pub mod time;

pub use column::WireColumn;
pub use decimal::WireDecimal;
pub use decode::decode_column;
pub use encode::encode_column;
pub use field::{FieldInfo, FieldType, NOT_NULL_FLAG, UNSIGNED_FLAG};
pub use time::WireTime;

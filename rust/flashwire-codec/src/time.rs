//! The wire date-time codec: packed 64-bit calendar values on the engine
//! side, a fixed 20-byte record on the wire.

use flashwire_common::Result;
use flashwire_datetime::PackedDateTime;

use crate::field::FieldType;
use crate::reader::ByteReader;

/// Per-row wire size of a date, datetime or timestamp.
pub const WIRE_TIME_SIZE: usize = 20;

/// A view over a packed engine date-time, carrying the wire field type
/// (DATE / DATETIME / TIMESTAMP) it is declared as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireTime {
    pub packed: u64,
    pub field_type: FieldType,
}

impl WireTime {
    pub fn new(packed: u64, field_type: FieldType) -> WireTime {
        WireTime { packed, field_type }
    }

    /// Serializes the 20-byte wire record, little-endian:
    /// hour (u32), microsecond (u32), year (u16), month, day, minute,
    /// second, then six reserved bytes written as zeros.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        let dt = PackedDateTime::from_packed(self.packed);
        out.extend_from_slice(&(dt.hour as u32).to_le_bytes());
        out.extend_from_slice(&dt.microsecond.to_le_bytes());
        out.extend_from_slice(&dt.year.to_le_bytes());
        out.push(dt.month);
        out.push(dt.day);
        out.push(dt.minute);
        out.push(dt.second);
        out.extend_from_slice(&[0u8; 6]);
    }
}

/// Reads one 20-byte wire record and reassembles the packed engine value.
///
/// The trailing six bytes (two reserved, time type, fractional-seconds
/// precision, two reserved) are consumed and ignored; any content there is
/// tolerated.
pub fn read_wire_time(reader: &mut ByteReader<'_>) -> Result<u64> {
    let hour = reader.read_u32_le()?;
    let microsecond = reader.read_u32_le()?;
    let year = reader.read_u16_le()?;
    let month = reader.read_u8()?;
    let day = reader.read_u8()?;
    let minute = reader.read_u8()?;
    let second = reader.read_u8()?;
    reader.skip(2)?;
    let _time_type = reader.read_u8()?;
    let _fsp = reader.read_u8()?;
    reader.skip(2)?;
    Ok(PackedDateTime::new(year, month, day, hour as u8, minute, second, microsecond).to_packed())
}

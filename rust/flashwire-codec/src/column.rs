//! The wire column appender.

use flashwire_common::Result;

use crate::bitmap::NullBitmap;
use crate::decimal::WireDecimal;
use crate::field::FieldType;
use crate::time::WireTime;

/// An ordered append sink building the on-wire representation of one
/// column slice: row data, the bit-packed null bitmap and, for
/// variable-length fields, the per-row offsets.
///
/// Fixed-width fields consume their slot even for null rows, so the decode
/// cursor can advance uniformly; variable-length nulls repeat the previous
/// offset.
#[derive(Debug, Clone, PartialEq)]
pub struct WireColumn {
    field_type: FieldType,
    fixed_length: Option<usize>,
    data: Vec<u8>,
    var_offsets: Vec<u64>,
    nulls: NullBitmap,
}

impl WireColumn {
    pub fn new(field_type: FieldType) -> WireColumn {
        let fixed_length = field_type.fixed_wire_length();
        WireColumn {
            field_type,
            fixed_length,
            data: Vec::new(),
            var_offsets: if fixed_length.is_none() {
                vec![0]
            } else {
                Vec::new()
            },
            nulls: NullBitmap::new(),
        }
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Per-row wire length for fixed-width fields, `None` for
    /// variable-length ones.
    #[inline]
    pub fn fixed_length(&self) -> Option<usize> {
        self.fixed_length
    }

    /// Number of appended rows, null or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nulls.is_empty()
    }

    #[inline]
    pub fn null_count(&self) -> u32 {
        self.nulls.null_count()
    }

    /// The bit-packed null bitmap (LSB-indexed presence bits).
    #[inline]
    pub fn null_bitmap(&self) -> &[u8] {
        self.nulls.as_bytes()
    }

    /// The concatenated row data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The `n + 1` row offsets of a variable-length column.
    #[inline]
    pub fn var_offsets(&self) -> &[u64] {
        &self.var_offsets
    }

    /// Appends a null row. Fixed-width fields still consume one zeroed
    /// slot; variable-length fields record an empty range.
    pub fn append_null(&mut self) {
        self.nulls.push(false);
        match self.fixed_length {
            Some(len) => self.data.resize(self.data.len() + len, 0),
            None => self.var_offsets.push(self.data.len() as u64),
        }
    }

    /// Appends an unsigned integer row as an 8-byte little-endian slot.
    pub fn append_u64(&mut self, value: u64) {
        assert_eq!(self.fixed_length, Some(8));
        self.nulls.push(true);
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a signed integer row as an 8-byte little-endian slot.
    pub fn append_i64(&mut self, value: i64) {
        assert_eq!(self.fixed_length, Some(8));
        self.nulls.push(true);
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a 4-byte little-endian float row.
    pub fn append_f32(&mut self, value: f32) {
        assert_eq!(self.fixed_length, Some(4));
        self.nulls.push(true);
        self.data.extend_from_slice(&value.to_bits().to_le_bytes());
    }

    /// Appends an 8-byte little-endian double row.
    pub fn append_f64(&mut self, value: f64) {
        assert_eq!(self.fixed_length, Some(8));
        self.nulls.push(true);
        self.data.extend_from_slice(&value.to_bits().to_le_bytes());
    }

    /// Appends a variable-length byte-string row.
    pub fn append_bytes(&mut self, value: &[u8]) {
        assert!(self.fixed_length.is_none());
        self.nulls.push(true);
        self.data.extend_from_slice(value);
        self.var_offsets.push(self.data.len() as u64);
    }

    /// Appends a packed decimal row (40 bytes).
    ///
    /// A decimal whose digit count the wire cannot represent is a logical
    /// error; the row is not appended.
    pub fn append_decimal(&mut self, value: &WireDecimal) -> Result<()> {
        assert_eq!(self.fixed_length, Some(crate::decimal::WIRE_DECIMAL_SIZE));
        value.write_to(&mut self.data)?;
        self.nulls.push(true);
        Ok(())
    }

    /// Appends a date-time row (20 bytes).
    pub fn append_time(&mut self, value: WireTime) {
        assert_eq!(self.fixed_length, Some(crate::time::WIRE_TIME_SIZE));
        self.nulls.push(true);
        value.write_to(&mut self.data);
    }
}

//! Alignment-safe little-endian reading from a wire byte cursor.

use flashwire_common::{Result, verify_data};

/// A forward-only cursor over a wire byte slice.
///
/// All multi-byte reads are little-endian and go through byte copies, so
/// they are alignment-safe on every target. Running past the end of the
/// buffer is a logical error: a malformed row aborts the whole column.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> ByteReader<'a> {
        ByteReader { buf, pos: 0 }
    }

    /// Returns the number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unconsumed remainder of the buffer.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        verify_data!(wire_cursor, self.pos + N <= self.buf.len());
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(bytes)
    }

    /// Reads `len` bytes and returns them as a slice of the underlying
    /// buffer.
    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        verify_data!(wire_cursor, self.pos + len <= self.buf.len());
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Advances the cursor by `len` bytes without reading them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        verify_data!(wire_cursor, self.pos + len <= self.buf.len());
        self.pos += len;
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64_le(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }
}

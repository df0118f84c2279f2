//! The engine column: a typed, optionally nullable value vector.

use crate::{offsets::Offsets, presence::Presence, schema::TypeDescriptor, values::Values};

/// A typed columnar value vector with optional offsets and presence
/// information.
///
/// Fixed-size elements live directly in `values`; variable-length elements
/// are concatenated in `values` and delimited by `offsets`. Null slots of
/// fixed-size columns still occupy one zeroed element so that positional
/// access stays uniform.
///
/// Decimal elements are stored as fixed-size little-endian two's-complement
/// integers of the width given by the element type (4/8/16/32 bytes); the
/// column scale lives in the type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    values: Values,
    offsets: Option<Offsets>,
    presence: Presence,
    type_desc: TypeDescriptor,
}

impl Column {
    /// Creates an empty column of the given type.
    pub fn empty(type_desc: TypeDescriptor) -> Column {
        Column {
            values: Values::new(),
            offsets: type_desc.element_type.requires_offsets().then(Offsets::new),
            presence: Presence::Trivial(0),
            type_desc,
        }
    }

    /// Creates an empty column with space pre-allocated for `capacity`
    /// elements.
    pub fn with_capacity(type_desc: TypeDescriptor, capacity: usize) -> Column {
        let elem_size = type_desc.primitive_size().unwrap_or(0);
        Column {
            values: Values::with_byte_capacity(capacity * elem_size),
            offsets: type_desc
                .element_type
                .requires_offsets()
                .then(|| Offsets::with_capacity(capacity)),
            presence: Presence::Trivial(0),
            type_desc,
        }
    }

    #[inline]
    pub fn type_desc(&self) -> TypeDescriptor {
        self.type_desc
    }

    /// Returns the number of elements, null or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.presence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.presence.is_empty()
    }

    /// Returns `true` if the element at `index` is null.
    #[inline]
    pub fn is_null_at(&self, index: usize) -> bool {
        self.presence.is_null(index)
    }

    /// Returns the number of null elements.
    pub fn null_count(&self) -> usize {
        self.presence.count_nulls()
    }

    /// Appends a fixed-size primitive value.
    ///
    /// # Panics
    ///
    /// Panics if the size of `T` does not match the column's element size,
    /// or if the column is variable-length.
    pub fn push_value<T>(&mut self, value: T)
    where
        T: bytemuck::NoUninit,
    {
        assert_eq!(
            self.type_desc.primitive_size(),
            Some(std::mem::size_of::<T>())
        );
        assert!(self.offsets.is_none());
        self.values.push(value);
        self.presence.push_non_null();
    }

    /// Appends a fixed-size element given as raw bytes (decimal storage).
    ///
    /// # Panics
    ///
    /// Panics if `bytes` does not match the column's element size.
    pub fn push_fixed(&mut self, bytes: &[u8]) {
        assert_eq!(self.type_desc.primitive_size(), Some(bytes.len()));
        assert!(self.offsets.is_none());
        self.values.extend_from_byte_slice(bytes);
        self.presence.push_non_null();
    }

    /// Appends a variable-length binary value.
    ///
    /// # Panics
    ///
    /// Panics if the column is not variable-length.
    pub fn push_binary(&mut self, value: &[u8]) {
        let offsets = self.offsets.as_mut().expect("variable-length column");
        offsets.push_length(value.len());
        self.values.extend_from_byte_slice(value);
        self.presence.push_non_null();
    }

    /// Appends a null element. Fixed-size columns consume one zeroed slot;
    /// variable-length columns record an empty range.
    pub fn push_null(&mut self) {
        if let Some(ref mut offsets) = self.offsets {
            offsets.push_length(0);
        }
        self.presence.push_null();
        let size = self.type_desc.primitive_size().unwrap_or(0);
        self.values
            .resize_zeroed_bytes(self.values.bytes_len() + size);
    }

    /// Reads the fixed-size primitive element at `index`.
    ///
    /// Null slots return whatever raw bytes are stored there (zeros).
    #[inline]
    pub fn value_at<T>(&self, index: usize) -> T
    where
        T: bytemuck::AnyBitPattern,
    {
        assert_eq!(
            self.type_desc.primitive_size(),
            Some(std::mem::size_of::<T>())
        );
        self.values.value_at(index)
    }

    /// Returns the raw bytes of the fixed-size element at `index`.
    #[inline]
    pub fn fixed_at(&self, index: usize) -> &[u8] {
        let size = self.type_desc.primitive_size().expect("fixed-size column");
        self.values.fixed_at(index, size)
    }

    /// Returns the variable-length binary value at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the column is not variable-length or `index` is out of
    /// bounds.
    #[inline]
    pub fn binary_at(&self, index: usize) -> &[u8] {
        let offsets = self.offsets.as_ref().expect("offsets");
        let range = offsets.range_at(index);
        &self.values.as_bytes()[range.start as usize..range.end as usize]
    }

    /// Returns a reference to the presence of this column.
    #[inline]
    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    /// Returns the offsets of a variable-length column.
    #[inline]
    pub fn offsets(&self) -> Option<&Offsets> {
        self.offsets.as_ref()
    }
}

//! Element types and column type descriptors.

/// The physical element type of an engine column.
///
/// Integer types cover both signed and unsigned interpretations; the
/// signedness lives in [`TypeDescriptor::signed`]. Decimal types are scaled
/// two's-complement integers of the given storage width. `DateTime` is a
/// packed 64-bit calendar value carried through the engine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Variable-length byte string.
    Binary,
    Decimal32,
    Decimal64,
    Decimal128,
    Decimal256,
    /// Packed 64-bit calendar value.
    DateTime,
}

impl ElementType {
    /// Returns the fixed element size in bytes, or `None` for
    /// variable-length types.
    pub fn primitive_size(&self) -> Option<usize> {
        match self {
            ElementType::Int8 => Some(1),
            ElementType::Int16 => Some(2),
            ElementType::Int32 => Some(4),
            ElementType::Int64 => Some(8),
            ElementType::Float32 => Some(4),
            ElementType::Float64 => Some(8),
            ElementType::Binary => None,
            ElementType::Decimal32 => Some(4),
            ElementType::Decimal64 => Some(8),
            ElementType::Decimal128 => Some(16),
            ElementType::Decimal256 => Some(32),
            ElementType::DateTime => Some(8),
        }
    }

    /// Returns `true` if values of this type are stored through an offsets
    /// array.
    #[inline]
    pub fn requires_offsets(&self) -> bool {
        matches!(self, ElementType::Binary)
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ElementType::Int8 | ElementType::Int16 | ElementType::Int32 | ElementType::Int64
        )
    }

    #[inline]
    pub fn is_decimal(&self) -> bool {
        matches!(
            self,
            ElementType::Decimal32
                | ElementType::Decimal64
                | ElementType::Decimal128
                | ElementType::Decimal256
        )
    }
}

/// Describes the full type of an engine column: element type, integer
/// signedness, nullability and the decimal scale.
///
/// `signed` is meaningful only for integer element types; it is `false`
/// for everything else. `scale` is meaningful only for decimal element
/// types and is bound to the column, not to individual rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub element_type: ElementType,
    pub signed: bool,
    pub nullable: bool,
    pub scale: u8,
}

impl TypeDescriptor {
    pub fn new(element_type: ElementType) -> TypeDescriptor {
        TypeDescriptor {
            element_type,
            signed: element_type.is_integer(),
            nullable: false,
            scale: 0,
        }
    }

    pub fn unsigned(element_type: ElementType) -> TypeDescriptor {
        assert!(element_type.is_integer());
        TypeDescriptor {
            signed: false,
            ..TypeDescriptor::new(element_type)
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> TypeDescriptor {
        self.nullable = nullable;
        self
    }

    pub fn with_scale(mut self, scale: u8) -> TypeDescriptor {
        assert!(self.element_type.is_decimal());
        self.scale = scale;
        self
    }

    #[inline]
    pub fn primitive_size(&self) -> Option<usize> {
        self.element_type.primitive_size()
    }

    /// Human-readable engine type name, used in mismatch diagnostics.
    pub fn name(&self) -> String {
        let base = match (self.element_type, self.signed) {
            (ElementType::Int8, true) => "Int8".to_string(),
            (ElementType::Int8, false) => "UInt8".to_string(),
            (ElementType::Int16, true) => "Int16".to_string(),
            (ElementType::Int16, false) => "UInt16".to_string(),
            (ElementType::Int32, true) => "Int32".to_string(),
            (ElementType::Int32, false) => "UInt32".to_string(),
            (ElementType::Int64, true) => "Int64".to_string(),
            (ElementType::Int64, false) => "UInt64".to_string(),
            (ElementType::Float32, _) => "Float32".to_string(),
            (ElementType::Float64, _) => "Float64".to_string(),
            (ElementType::Binary, _) => "String".to_string(),
            (ElementType::Decimal32, _) => format!("Decimal32({})", self.scale),
            (ElementType::Decimal64, _) => format!("Decimal64({})", self.scale),
            (ElementType::Decimal128, _) => format!("Decimal128({})", self.scale),
            (ElementType::Decimal256, _) => format!("Decimal256({})", self.scale),
            (ElementType::DateTime, _) => "DateTime".to_string(),
        };
        if self.nullable {
            format!("Nullable({base})")
        } else {
            base
        }
    }
}

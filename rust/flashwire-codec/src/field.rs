//! Wire protocol field types and flags.

/// Wire protocol field type codes.
///
/// The numeric values are the on-wire codes of the remote query protocol.
/// Codes outside the supported closed set are carried as `Unsupported` and
/// rejected by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Tiny,
    Short,
    Long,
    Float,
    Double,
    Timestamp,
    LongLong,
    Int24,
    Date,
    DateTime,
    Year,
    Varchar,
    NewDecimal,
    TinyBlob,
    MediumBlob,
    LongBlob,
    Blob,
    VarString,
    String,
    Unsupported(u8),
}

impl FieldType {
    /// Maps an on-wire type code to a `FieldType`.
    pub fn from_code(code: u8) -> FieldType {
        match code {
            1 => FieldType::Tiny,
            2 => FieldType::Short,
            3 => FieldType::Long,
            4 => FieldType::Float,
            5 => FieldType::Double,
            7 => FieldType::Timestamp,
            8 => FieldType::LongLong,
            9 => FieldType::Int24,
            10 => FieldType::Date,
            12 => FieldType::DateTime,
            13 => FieldType::Year,
            15 => FieldType::Varchar,
            246 => FieldType::NewDecimal,
            249 => FieldType::TinyBlob,
            250 => FieldType::MediumBlob,
            251 => FieldType::LongBlob,
            252 => FieldType::Blob,
            253 => FieldType::VarString,
            254 => FieldType::String,
            other => FieldType::Unsupported(other),
        }
    }

    /// Returns the on-wire type code.
    pub fn code(&self) -> u8 {
        match self {
            FieldType::Tiny => 1,
            FieldType::Short => 2,
            FieldType::Long => 3,
            FieldType::Float => 4,
            FieldType::Double => 5,
            FieldType::Timestamp => 7,
            FieldType::LongLong => 8,
            FieldType::Int24 => 9,
            FieldType::Date => 10,
            FieldType::DateTime => 12,
            FieldType::Year => 13,
            FieldType::Varchar => 15,
            FieldType::NewDecimal => 246,
            FieldType::TinyBlob => 249,
            FieldType::MediumBlob => 250,
            FieldType::LongBlob => 251,
            FieldType::Blob => 252,
            FieldType::VarString => 253,
            FieldType::String => 254,
            FieldType::Unsupported(code) => *code,
        }
    }

    /// Returns the fixed per-row wire length in bytes, or `None` for
    /// variable-length and unsupported types.
    ///
    /// Every integer code occupies an 8-byte slot regardless of its
    /// declared width.
    pub fn fixed_wire_length(&self) -> Option<usize> {
        match self {
            t if t.is_integer_family() => Some(8),
            FieldType::Float => Some(4),
            FieldType::Double => Some(8),
            t if t.is_time_family() => Some(crate::time::WIRE_TIME_SIZE),
            FieldType::NewDecimal => Some(crate::decimal::WIRE_DECIMAL_SIZE),
            _ => None,
        }
    }

    #[inline]
    pub fn is_integer_family(&self) -> bool {
        matches!(
            self,
            FieldType::Tiny
                | FieldType::Short
                | FieldType::Int24
                | FieldType::Long
                | FieldType::LongLong
                | FieldType::Year
        )
    }

    #[inline]
    pub fn is_time_family(&self) -> bool {
        matches!(
            self,
            FieldType::Date | FieldType::DateTime | FieldType::Timestamp
        )
    }

    #[inline]
    pub fn is_string_family(&self) -> bool {
        matches!(
            self,
            FieldType::Varchar
                | FieldType::VarString
                | FieldType::String
                | FieldType::Blob
                | FieldType::TinyBlob
                | FieldType::MediumBlob
                | FieldType::LongBlob
        )
    }
}

/// Field may not hold null values.
pub const NOT_NULL_FLAG: u32 = 1;

/// Field holds unsigned integers.
pub const UNSIGNED_FLAG: u32 = 1 << 5;

/// A wire field declaration: the protocol type code plus its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub field_type: FieldType,
    pub flags: u32,
}

impl FieldInfo {
    pub fn new(field_type: FieldType) -> FieldInfo {
        FieldInfo {
            field_type,
            flags: 0,
        }
    }

    pub fn not_null(mut self) -> FieldInfo {
        self.flags |= NOT_NULL_FLAG;
        self
    }

    pub fn unsigned(mut self) -> FieldInfo {
        self.flags |= UNSIGNED_FLAG;
        self
    }

    #[inline]
    pub fn has_not_null_flag(&self) -> bool {
        self.flags & NOT_NULL_FLAG != 0
    }

    #[inline]
    pub fn has_unsigned_flag(&self) -> bool {
        self.flags & UNSIGNED_FLAG != 0
    }
}

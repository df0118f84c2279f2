//! Wire column to engine column conversion.

use arrow_buffer::i256;
use flashwire_column::{Column, ElementType};
use flashwire_common::{Result, error::Error, verify_data};

use crate::bitmap::is_row_null;
use crate::decimal::{DecimalValue, read_wire_decimal};
use crate::field::{FieldInfo, FieldType};
use crate::reader::ByteReader;
use crate::time::read_wire_time;

/// Consumes one wire column slice and appends `length` rows into the
/// engine column, returning the advanced cursor.
///
/// The engine column is validated against the wire field declaration the
/// same way [`crate::encode_column`] validates it: nullability, integer
/// signedness and the element type required by the wire code all have to
/// agree, and a disagreement is a [`TypeMismatch`] carrying `col_name`.
///
/// Fixed-width fields consume exactly `field_length` bytes per row, null
/// or not. Variable-length fields are delimited by the `offsets`
/// side-array (`length + 1` entries) and the cursor advances by
/// `offsets[length]`. The `null_bitmap` is consulted only when
/// `null_count > 0`.
///
/// [`TypeMismatch`]: flashwire_common::error::ErrorKind::TypeMismatch
#[allow(clippy::too_many_arguments)]
pub fn decode_column<'a>(
    pos: &'a [u8],
    field_length: u8,
    null_count: u32,
    null_bitmap: &[u8],
    offsets: &[u64],
    col: &mut Column,
    col_name: &str,
    field: &FieldInfo,
    length: u32,
) -> Result<&'a [u8]> {
    let desc = col.type_desc();
    if desc.nullable && field.has_not_null_flag() {
        return Err(Error::type_mismatch(
            col_name,
            "a column without nulls",
            desc.name(),
        ));
    }
    match field.field_type {
        t if t.is_integer_family() || t == FieldType::Float || t == FieldType::Double => {
            wire_num_col_to_flash(
                pos,
                field_length,
                null_count,
                null_bitmap,
                col,
                col_name,
                field,
                length,
            )
        }
        t if t.is_time_family() => wire_date_col_to_flash(
            pos,
            field_length,
            null_count,
            null_bitmap,
            col,
            col_name,
            length,
        ),
        FieldType::NewDecimal => wire_decimal_col_to_flash(
            pos,
            field_length,
            null_count,
            null_bitmap,
            col,
            col_name,
            length,
        ),
        t if t.is_string_family() => {
            wire_string_col_to_flash(pos, null_count, null_bitmap, offsets, col, col_name, length)
        }
        other => Err(Error::not_implemented(format!(
            "field tp = {} when converting wire column to engine column",
            other.code()
        ))),
    }
}

/// Appends a null row when the bitmap marks `index` null; returns whether
/// it did.
fn check_null(index: usize, null_count: u32, null_bitmap: &[u8], col: &mut Column) -> bool {
    if is_row_null(index, null_count, null_bitmap) {
        col.push_null();
        true
    } else {
        false
    }
}

#[allow(clippy::too_many_arguments)]
fn wire_num_col_to_flash<'a>(
    pos: &'a [u8],
    field_length: u8,
    null_count: u32,
    null_bitmap: &[u8],
    col: &mut Column,
    col_name: &str,
    field: &FieldInfo,
    length: u32,
) -> Result<&'a [u8]> {
    validate_num_column(col, col_name, field)?;
    let mut reader = ByteReader::new(pos);
    for i in 0..length as usize {
        if check_null(i, null_count, null_bitmap, col) {
            reader.skip(field_length as usize)?;
            continue;
        }
        let row = reader.read_slice(field_length as usize)?;
        let mut row_reader = ByteReader::new(row);
        match field.field_type {
            t if t.is_integer_family() => {
                if field.has_unsigned_flag() {
                    push_unsigned(col, row_reader.read_u64_le()?);
                } else {
                    push_signed(col, row_reader.read_i64_le()?);
                }
            }
            FieldType::Float => {
                let bits = row_reader.read_u32_le()?;
                col.push_value(f32::from_bits(bits));
            }
            FieldType::Double => {
                let bits = row_reader.read_u64_le()?;
                col.push_value(f64::from_bits(bits));
            }
            _ => {
                return Err(Error::logical(
                    "unexpected field type in the primitive decoder",
                ));
            }
        }
    }
    Ok(reader.remaining())
}

/// Rejects numeric column/field pairings the wire declaration rules out:
/// integer codes need an integer column of the declared signedness, FLOAT
/// needs f32 and DOUBLE needs f64.
fn validate_num_column(col: &Column, col_name: &str, field: &FieldInfo) -> Result<()> {
    let desc = col.type_desc();
    match field.field_type {
        t if t.is_integer_family() => {
            if !desc.element_type.is_integer() {
                return Err(Error::type_mismatch(
                    col_name,
                    "an integer column",
                    desc.name(),
                ));
            }
            if desc.signed == field.has_unsigned_flag() {
                let expected = if field.has_unsigned_flag() {
                    "an unsigned integer column"
                } else {
                    "a signed integer column"
                };
                return Err(Error::type_mismatch(col_name, expected, desc.name()));
            }
        }
        FieldType::Float => {
            if desc.element_type != ElementType::Float32 {
                return Err(Error::type_mismatch(
                    col_name,
                    "a float32 column",
                    desc.name(),
                ));
            }
        }
        FieldType::Double => {
            if desc.element_type != ElementType::Float64 {
                return Err(Error::type_mismatch(
                    col_name,
                    "a float64 column",
                    desc.name(),
                ));
            }
        }
        _ => {}
    }
    Ok(())
}

fn push_unsigned(col: &mut Column, value: u64) {
    match col.type_desc().element_type {
        ElementType::Int8 => col.push_value(value as u8),
        ElementType::Int16 => col.push_value(value as u16),
        ElementType::Int32 => col.push_value(value as u32),
        ElementType::Int64 => col.push_value(value),
        _ => unreachable!("validated as an unsigned integer column"),
    }
}

fn push_signed(col: &mut Column, value: i64) {
    match col.type_desc().element_type {
        ElementType::Int8 => col.push_value(value as i8),
        ElementType::Int16 => col.push_value(value as i16),
        ElementType::Int32 => col.push_value(value as i32),
        ElementType::Int64 => col.push_value(value),
        _ => unreachable!("validated as a signed integer column"),
    }
}

fn wire_date_col_to_flash<'a>(
    pos: &'a [u8],
    field_length: u8,
    null_count: u32,
    null_bitmap: &[u8],
    col: &mut Column,
    col_name: &str,
    length: u32,
) -> Result<&'a [u8]> {
    if col.type_desc().element_type != ElementType::DateTime {
        return Err(Error::type_mismatch(
            col_name,
            "a datetime column",
            col.type_desc().name(),
        ));
    }
    let mut reader = ByteReader::new(pos);
    for i in 0..length as usize {
        if check_null(i, null_count, null_bitmap, col) {
            reader.skip(field_length as usize)?;
            continue;
        }
        let row = reader.read_slice(field_length as usize)?;
        let mut row_reader = ByteReader::new(row);
        let packed = read_wire_time(&mut row_reader)?;
        col.push_value(packed);
    }
    Ok(reader.remaining())
}

fn wire_decimal_col_to_flash<'a>(
    pos: &'a [u8],
    field_length: u8,
    null_count: u32,
    null_bitmap: &[u8],
    col: &mut Column,
    col_name: &str,
    length: u32,
) -> Result<&'a [u8]> {
    match col.type_desc().element_type {
        ElementType::Decimal32 => {
            decimal_rows::<i32>(pos, field_length, null_count, null_bitmap, col, length)
        }
        ElementType::Decimal64 => {
            decimal_rows::<i64>(pos, field_length, null_count, null_bitmap, col, length)
        }
        ElementType::Decimal128 => {
            decimal_rows::<i128>(pos, field_length, null_count, null_bitmap, col, length)
        }
        ElementType::Decimal256 => {
            decimal_rows::<i256>(pos, field_length, null_count, null_bitmap, col, length)
        }
        _ => Err(Error::type_mismatch(
            col_name,
            "a decimal column",
            col.type_desc().name(),
        )),
    }
}

fn decimal_rows<'a, T: DecimalValue>(
    pos: &'a [u8],
    field_length: u8,
    null_count: u32,
    null_bitmap: &[u8],
    col: &mut Column,
    length: u32,
) -> Result<&'a [u8]> {
    let mut reader = ByteReader::new(pos);
    for i in 0..length as usize {
        if check_null(i, null_count, null_bitmap, col) {
            reader.skip(field_length as usize)?;
            continue;
        }
        let row = reader.read_slice(field_length as usize)?;
        let mut row_reader = ByteReader::new(row);
        let value: T = read_wire_decimal(&mut row_reader)?;
        value.push_to(col);
    }
    Ok(reader.remaining())
}

fn wire_string_col_to_flash<'a>(
    pos: &'a [u8],
    null_count: u32,
    null_bitmap: &[u8],
    offsets: &[u64],
    col: &mut Column,
    col_name: &str,
    length: u32,
) -> Result<&'a [u8]> {
    if col.type_desc().element_type != ElementType::Binary {
        return Err(Error::type_mismatch(
            col_name,
            "a string column",
            col.type_desc().name(),
        ));
    }
    verify_data!(wire_offsets, offsets.len() > length as usize);
    for i in 0..length as usize {
        if check_null(i, null_count, null_bitmap, col) {
            continue;
        }
        let from = offsets[i] as usize;
        let to = offsets[i + 1] as usize;
        verify_data!(wire_offsets, from <= to && to <= pos.len());
        col.push_binary(&pos[from..to]);
    }
    let consumed = offsets[length as usize] as usize;
    verify_data!(wire_offsets, consumed <= pos.len());
    Ok(&pos[consumed..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashwire_column::TypeDescriptor;
    use flashwire_common::error::ErrorKind;

    #[test]
    fn test_signed_integer_with_null() {
        // [-1, 0, 7, null] as LONGLONG rows.
        let mut pos = Vec::new();
        for v in [-1i64, 0, 7, 0] {
            pos.extend_from_slice(&v.to_le_bytes());
        }
        let bitmap = [0b0111u8];
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int64).with_nullable(true));

        let rest = decode_column(
            &pos,
            8,
            1,
            &bitmap,
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::LongLong),
            4,
        )
        .unwrap();
        assert!(rest.is_empty());
        assert_eq!(col.len(), 4);
        assert_eq!(col.value_at::<i64>(0), -1);
        assert_eq!(col.value_at::<i64>(1), 0);
        assert_eq!(col.value_at::<i64>(2), 7);
        assert!(col.is_null_at(3));
        assert_eq!(col.null_count(), 1);
    }

    #[test]
    fn test_unsigned_tiny() {
        let mut pos = Vec::new();
        for v in [255u64, 128] {
            pos.extend_from_slice(&v.to_le_bytes());
        }
        let mut col = Column::empty(TypeDescriptor::unsigned(ElementType::Int8));

        decode_column(
            &pos,
            8,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Tiny).unsigned().not_null(),
            2,
        )
        .unwrap();
        assert_eq!(col.value_at::<u8>(0), 255);
        assert_eq!(col.value_at::<u8>(1), 128);
    }

    #[test]
    fn test_float_bit_pattern() {
        let mut pos = Vec::new();
        pos.extend_from_slice(&1.5f32.to_bits().to_le_bytes());
        pos.extend_from_slice(&f32::NAN.to_bits().to_le_bytes());
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Float32));

        decode_column(
            &pos,
            4,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Float),
            2,
        )
        .unwrap();
        assert_eq!(col.value_at::<f32>(0), 1.5);
        assert_eq!(col.value_at::<f32>(1).to_bits(), f32::NAN.to_bits());
    }

    #[test]
    fn test_string_with_nulls() {
        // ["a", null, "bc"], offsets [0, 1, 1, 3], bitmap 0b101.
        let pos = b"abc\xff\xff";
        let offsets = [0u64, 1, 1, 3];
        let bitmap = [0b101u8];
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Binary).with_nullable(true));

        let rest = decode_column(
            pos,
            0,
            1,
            &bitmap,
            &offsets,
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Varchar),
            3,
        )
        .unwrap();
        // Cursor advanced by offsets[length] only.
        assert_eq!(rest, b"\xff\xff");
        assert_eq!(col.len(), 3);
        assert_eq!(col.binary_at(0), b"a");
        assert!(col.is_null_at(1));
        assert_eq!(col.binary_at(2), b"bc");
    }

    #[test]
    fn test_null_rows_consume_field_length() {
        // Two null datetime rows followed by a sentinel byte.
        let mut pos = vec![0u8; 40];
        pos.push(0xee);
        let bitmap = [0b000u8];
        let mut col = Column::empty(TypeDescriptor::new(ElementType::DateTime).with_nullable(true));

        let rest = decode_column(
            &pos,
            20,
            2,
            &bitmap,
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::DateTime),
            2,
        )
        .unwrap();
        assert_eq!(rest, &[0xee]);
        assert_eq!(col.len(), 2);
        assert!(col.is_null_at(0));
        assert!(col.is_null_at(1));
    }

    #[test]
    fn test_not_null_flag_mismatch() {
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int64).with_nullable(true));
        let err = decode_column(
            &[],
            8,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::LongLong).not_null(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_unsigned_flag_mismatch() {
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int32));
        let err = decode_column(
            &[],
            8,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Long).unsigned(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));

        let mut col = Column::empty(TypeDescriptor::unsigned(ElementType::Int32));
        let err = decode_column(
            &[],
            8,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Long),
            0,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_float_width_mismatch() {
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Float64));
        let err = decode_column(
            &[],
            4,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Float),
            0,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));

        let mut col = Column::empty(TypeDescriptor::new(ElementType::Float32));
        let err = decode_column(
            &[],
            8,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Double),
            0,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_date_into_wrong_column_is_type_mismatch() {
        let pos = [0u8; 20];
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int64));
        let err = decode_column(
            &pos,
            20,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Timestamp),
            1,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_decimal_into_wrong_column_is_type_mismatch() {
        let pos = [0u8; 40];
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int64));
        let err = decode_column(
            &pos,
            40,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::NewDecimal),
            1,
        )
        .unwrap_err();
        match err.kind() {
            ErrorKind::TypeMismatch { column, actual, .. } => {
                assert_eq!(column, "test_col");
                assert_eq!(actual, "Int64");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_string_into_wrong_column_is_type_mismatch() {
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int64));
        let err = decode_column(
            &[],
            0,
            0,
            &[],
            &[0u64],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::Blob),
            0,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
    }

    #[test]
    fn test_unsupported_field_type() {
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int64));
        let err = decode_column(
            &[],
            0,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::from_code(255)),
            0,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::NotImplemented { .. }));
    }

    #[test]
    fn test_truncated_input_aborts() {
        let pos = [0u8; 12];
        let mut col = Column::empty(TypeDescriptor::new(ElementType::Int64));
        let err = decode_column(
            &pos,
            8,
            0,
            &[],
            &[],
            &mut col,
            "test_col",
            &FieldInfo::new(FieldType::LongLong),
            2,
        )
        .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Logical { .. }));
    }
}

//! Engine column to wire column conversion.

use arrow_buffer::i256;
use flashwire_column::{Column, ElementType};
use flashwire_common::{Result, error::Error};

use crate::column::WireColumn;
use crate::decimal::{DecimalValue, WireDecimal, decimal_to_digits};
use crate::field::{FieldInfo, FieldType};
use crate::time::WireTime;

/// Copies rows `[start, end)` of an engine column into a wire column
/// appender, validating the engine type against the wire field
/// declaration.
///
/// `col_name` is carried into mismatch diagnostics only.
pub fn encode_column(
    dst: &mut WireColumn,
    col: &Column,
    col_name: &str,
    field: &FieldInfo,
    start: usize,
    end: usize,
) -> Result<()> {
    let desc = col.type_desc();
    if desc.nullable && field.has_not_null_flag() {
        return Err(Error::type_mismatch(
            col_name,
            "a column without nulls",
            desc.name(),
        ));
    }
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
            integer_col_to_wire(dst, col, start, end)
        }
        FieldType::Float => {
            if desc.element_type != ElementType::Float32 {
                return Err(Error::type_mismatch(
                    col_name,
                    "a float32 column",
                    desc.name(),
                ));
            }
            float32_col_to_wire(dst, col, start, end);
            Ok(())
        }
        FieldType::Double => {
            if desc.element_type != ElementType::Float64 {
                return Err(Error::type_mismatch(
                    col_name,
                    "a float64 column",
                    desc.name(),
                ));
            }
            float64_col_to_wire(dst, col, start, end);
            Ok(())
        }
        t if t.is_time_family() => {
            if desc.element_type != ElementType::DateTime {
                return Err(Error::type_mismatch(
                    col_name,
                    "a datetime column",
                    desc.name(),
                ));
            }
            date_col_to_wire(dst, col, field.field_type, start, end);
            Ok(())
        }
        FieldType::NewDecimal => {
            if !desc.element_type.is_decimal() {
                return Err(Error::type_mismatch(
                    col_name,
                    "a decimal column",
                    desc.name(),
                ));
            }
            decimal_col_to_wire(dst, col, col_name, start, end)
        }
        t if t.is_string_family() => {
            if desc.element_type != ElementType::Binary {
                return Err(Error::type_mismatch(
                    col_name,
                    "a string column",
                    desc.name(),
                ));
            }
            string_col_to_wire(dst, col, start, end);
            Ok(())
        }
        other => Err(Error::not_implemented(format!(
            "field tp = {} when converting engine column to wire column",
            other.code()
        ))),
    }
}

fn integer_col_to_wire(dst: &mut WireColumn, col: &Column, start: usize, end: usize) -> Result<()> {
    let desc = col.type_desc();
    match (desc.element_type, desc.signed) {
        (ElementType::Int8, false) => unsigned_col_to_wire::<u8>(dst, col, start, end),
        (ElementType::Int16, false) => unsigned_col_to_wire::<u16>(dst, col, start, end),
        (ElementType::Int32, false) => unsigned_col_to_wire::<u32>(dst, col, start, end),
        (ElementType::Int64, false) => unsigned_col_to_wire::<u64>(dst, col, start, end),
        (ElementType::Int8, true) => signed_col_to_wire::<i8>(dst, col, start, end),
        (ElementType::Int16, true) => signed_col_to_wire::<i16>(dst, col, start, end),
        (ElementType::Int32, true) => signed_col_to_wire::<i32>(dst, col, start, end),
        (ElementType::Int64, true) => signed_col_to_wire::<i64>(dst, col, start, end),
        _ => {
            return Err(Error::logical(
                "integer encode reached a non-integer engine column",
            ));
        }
    }
    Ok(())
}

fn unsigned_col_to_wire<T>(dst: &mut WireColumn, col: &Column, start: usize, end: usize)
where
    T: bytemuck::AnyBitPattern + Into<u64>,
{
    for i in start..end {
        if col.is_null_at(i) {
            dst.append_null();
            continue;
        }
        dst.append_u64(col.value_at::<T>(i).into());
    }
}

fn signed_col_to_wire<T>(dst: &mut WireColumn, col: &Column, start: usize, end: usize)
where
    T: bytemuck::AnyBitPattern + Into<i64>,
{
    for i in start..end {
        if col.is_null_at(i) {
            dst.append_null();
            continue;
        }
        dst.append_i64(col.value_at::<T>(i).into());
    }
}

fn float32_col_to_wire(dst: &mut WireColumn, col: &Column, start: usize, end: usize) {
    for i in start..end {
        if col.is_null_at(i) {
            dst.append_null();
            continue;
        }
        dst.append_f32(col.value_at::<f32>(i));
    }
}

fn float64_col_to_wire(dst: &mut WireColumn, col: &Column, start: usize, end: usize) {
    for i in start..end {
        if col.is_null_at(i) {
            dst.append_null();
            continue;
        }
        dst.append_f64(col.value_at::<f64>(i));
    }
}

fn date_col_to_wire(
    dst: &mut WireColumn,
    col: &Column,
    field_type: FieldType,
    start: usize,
    end: usize,
) {
    for i in start..end {
        if col.is_null_at(i) {
            dst.append_null();
            continue;
        }
        dst.append_time(WireTime::new(col.value_at::<u64>(i), field_type));
    }
}

/// Probes the decimal storage widths in ascending order and encodes with
/// the first one matching the engine column.
fn decimal_col_to_wire(
    dst: &mut WireColumn,
    col: &Column,
    col_name: &str,
    start: usize,
    end: usize,
) -> Result<()> {
    if try_decimal_col_to_wire::<i32>(dst, col, start, end)?
        || try_decimal_col_to_wire::<i64>(dst, col, start, end)?
        || try_decimal_col_to_wire::<i128>(dst, col, start, end)?
        || try_decimal_col_to_wire::<i256>(dst, col, start, end)?
    {
        Ok(())
    } else {
        Err(Error::logical(format!(
            "no decimal storage width matched column '{col_name}'"
        )))
    }
}

fn try_decimal_col_to_wire<T: DecimalValue>(
    dst: &mut WireColumn,
    col: &Column,
    start: usize,
    end: usize,
) -> Result<bool> {
    if col.type_desc().element_type != T::ELEMENT {
        return Ok(false);
    }
    let scale = col.type_desc().scale;
    // One scratch digit buffer for the whole slice.
    let mut dec = WireDecimal {
        scale,
        digits: Vec::new(),
        negative: false,
    };
    for i in start..end {
        if col.is_null_at(i) {
            dst.append_null();
            continue;
        }
        let value = T::read_le(col.fixed_at(i));
        decimal_to_digits(value, scale, &mut dec.digits);
        dec.negative = value.is_negative();
        dst.append_decimal(&dec)?;
    }
    Ok(true)
}

fn string_col_to_wire(dst: &mut WireColumn, col: &Column, start: usize, end: usize) {
    for i in start..end {
        if col.is_null_at(i) {
            dst.append_null();
            continue;
        }
        dst.append_bytes(col.binary_at(i));
    }
}

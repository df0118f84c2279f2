//! End-to-end encode/decode round trips across the full type cross
//! product.

use arrow_buffer::i256;
use flashwire_codec::{FieldInfo, FieldType, WireColumn, decode_column, encode_column};
use flashwire_column::{Column, ElementType, TypeDescriptor};
use flashwire_datetime::PackedDateTime;

/// Encodes the whole column, decodes the wire buffers back and checks the
/// result against the source, slot for slot.
fn round_trip(col: &Column, field: FieldInfo) {
    let mut wire = WireColumn::new(field.field_type);
    encode_column(&mut wire, col, "col", &field, 0, col.len()).unwrap();
    assert_eq!(wire.len(), col.len());
    assert_eq!(wire.null_count() as usize, col.null_count());

    let mut decoded = Column::empty(col.type_desc());
    let field_length = wire.fixed_length().unwrap_or(0) as u8;
    let rest = decode_column(
        wire.data(),
        field_length,
        wire.null_count(),
        wire.null_bitmap(),
        wire.var_offsets(),
        &mut decoded,
        "col",
        &field,
        col.len() as u32,
    )
    .unwrap();
    assert!(rest.is_empty());
    assert_eq!(&decoded, col);
}

fn with_nulls(type_desc: TypeDescriptor, rows: usize, mut push: impl FnMut(&mut Column)) -> Column {
    let mut col = Column::with_capacity(type_desc, rows);
    for _ in 0..rows {
        if type_desc.nullable && fastrand::f64() < 0.2 {
            col.push_null();
        } else {
            push(&mut col);
        }
    }
    col
}

#[test]
fn test_integer_round_trips() {
    let rows = 200;
    round_trip(
        &with_nulls(
            TypeDescriptor::new(ElementType::Int8).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::i8(..)),
        ),
        FieldInfo::new(FieldType::Tiny),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::unsigned(ElementType::Int8).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::u8(..)),
        ),
        FieldInfo::new(FieldType::Tiny).unsigned(),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::new(ElementType::Int16).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::i16(..)),
        ),
        FieldInfo::new(FieldType::Short),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::unsigned(ElementType::Int16).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::u16(..)),
        ),
        FieldInfo::new(FieldType::Short).unsigned(),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::new(ElementType::Int32).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::i32(..)),
        ),
        FieldInfo::new(FieldType::Long),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::unsigned(ElementType::Int32).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::u32(..)),
        ),
        FieldInfo::new(FieldType::Long).unsigned(),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::new(ElementType::Int64).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::i64(..)),
        ),
        FieldInfo::new(FieldType::LongLong),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::unsigned(ElementType::Int64).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::u64(..)),
        ),
        FieldInfo::new(FieldType::LongLong).unsigned(),
    );
}

#[test]
fn test_not_null_integer_round_trip() {
    let mut col = Column::empty(TypeDescriptor::unsigned(ElementType::Int8));
    col.push_value(255u8);
    col.push_value(128u8);
    round_trip(&col, FieldInfo::new(FieldType::Tiny).unsigned().not_null());
}

#[test]
fn test_year_code_round_trip() {
    let mut col = Column::empty(TypeDescriptor::unsigned(ElementType::Int16).with_nullable(true));
    col.push_value(1999u16);
    col.push_null();
    col.push_value(2023u16);
    round_trip(&col, FieldInfo::new(FieldType::Year).unsigned());
}

#[test]
fn test_float_round_trips() {
    let rows = 200;
    round_trip(
        &with_nulls(
            TypeDescriptor::new(ElementType::Float32).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::f32() * 1e6 - 5e5),
        ),
        FieldInfo::new(FieldType::Float),
    );
    round_trip(
        &with_nulls(
            TypeDescriptor::new(ElementType::Float64).with_nullable(true),
            rows,
            |c| c.push_value(fastrand::f64() * 1e12 - 5e11),
        ),
        FieldInfo::new(FieldType::Double),
    );

    // Bit patterns survive, including NaN and negative zero.
    let mut col = Column::empty(TypeDescriptor::new(ElementType::Float64));
    for v in [f64::NAN, -0.0, f64::INFINITY, f64::MIN_POSITIVE] {
        col.push_value(v);
    }
    round_trip(&col, FieldInfo::new(FieldType::Double));
}

#[test]
fn test_decimal_round_trips() {
    let desc32 = TypeDescriptor::new(ElementType::Decimal32)
        .with_nullable(true)
        .with_scale(3);
    round_trip(
        &with_nulls(desc32, 100, |c| {
            c.push_fixed(&fastrand::i32(-999_999_999..=999_999_999).to_le_bytes())
        }),
        FieldInfo::new(FieldType::NewDecimal),
    );

    let desc64 = TypeDescriptor::new(ElementType::Decimal64)
        .with_nullable(true)
        .with_scale(6);
    round_trip(
        &with_nulls(desc64, 100, |c| {
            c.push_fixed(
                &fastrand::i64(-999_999_999_999_999_999..=999_999_999_999_999_999).to_le_bytes(),
            )
        }),
        FieldInfo::new(FieldType::NewDecimal),
    );

    let desc128 = TypeDescriptor::new(ElementType::Decimal128)
        .with_nullable(true)
        .with_scale(10);
    round_trip(
        &with_nulls(desc128, 100, |c| {
            c.push_fixed(&(fastrand::i64(..) as i128 * 1_000_000_007).to_le_bytes())
        }),
        FieldInfo::new(FieldType::NewDecimal),
    );

    let desc256 = TypeDescriptor::new(ElementType::Decimal256)
        .with_nullable(true)
        .with_scale(20);
    round_trip(
        &with_nulls(desc256, 100, |c| {
            let value = i256::from_i128(fastrand::i64(..) as i128)
                .wrapping_mul(i256::from_i128(1_000_000_000_000_000_003));
            c.push_fixed(&value.to_le_bytes())
        }),
        FieldInfo::new(FieldType::NewDecimal),
    );
}

#[test]
fn test_datetime_round_trips() {
    for field_type in [FieldType::Date, FieldType::DateTime, FieldType::Timestamp] {
        let desc = TypeDescriptor::new(ElementType::DateTime).with_nullable(true);
        let col = with_nulls(desc, 100, |c| {
            let dt = PackedDateTime::new(
                fastrand::u16(1000..=9999),
                fastrand::u8(1..=12),
                fastrand::u8(1..=28),
                fastrand::u8(0..=23),
                fastrand::u8(0..=59),
                fastrand::u8(0..=59),
                fastrand::u32(0..1_000_000),
            );
            c.push_value(dt.to_packed());
        });
        round_trip(&col, FieldInfo::new(field_type));
    }
}

#[test]
fn test_string_round_trips() {
    for field_type in [
        FieldType::Varchar,
        FieldType::VarString,
        FieldType::String,
        FieldType::Blob,
        FieldType::TinyBlob,
        FieldType::MediumBlob,
        FieldType::LongBlob,
    ] {
        let desc = TypeDescriptor::new(ElementType::Binary).with_nullable(true);
        let col = with_nulls(desc, 100, |c| {
            let len = fastrand::usize(0..32);
            let bytes: Vec<u8> = (0..len).map(|_| fastrand::u8(..)).collect();
            c.push_binary(&bytes);
        });
        round_trip(&col, FieldInfo::new(field_type));
    }
}

#[test]
fn test_empty_slices() {
    round_trip(
        &Column::empty(TypeDescriptor::new(ElementType::Int64)),
        FieldInfo::new(FieldType::LongLong),
    );
    round_trip(
        &Column::empty(TypeDescriptor::new(ElementType::Binary)),
        FieldInfo::new(FieldType::Blob),
    );
}

#[test]
fn test_all_null_column() {
    let mut col = Column::empty(TypeDescriptor::new(ElementType::Int32).with_nullable(true));
    for _ in 0..9 {
        col.push_null();
    }
    round_trip(&col, FieldInfo::new(FieldType::Long));
}

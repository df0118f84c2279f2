//! The wire decimal codec: scaled two's-complement integers on the engine
//! side, packed base-10^9 words on the wire.

use arrow_buffer::i256;
use flashwire_column::{Column, ElementType};
use flashwire_common::{Result, verify_data};

use crate::reader::ByteReader;

/// Number of decimal digits carried by one base-10^9 word.
pub const DIGITS_PER_WORD: usize = 9;

/// The base of the word representation.
pub const WORD_MAX: i32 = 1_000_000_000;

/// The wire always carries exactly this many words after the header.
pub const MAX_WORD_BUF_LEN: usize = 9;

/// Per-row wire size of a decimal: 4 header bytes plus the word buffer.
pub const WIRE_DECIMAL_SIZE: usize = 4 + MAX_WORD_BUF_LEN * 4;

/// A signed scaled integer of one of the engine's decimal storage widths.
///
/// The engine stores decimals as little-endian two's-complement of 4, 8, 16
/// or 32 bytes; this trait gives the codec uniform digit extraction and
/// word accumulation across those widths. Arithmetic wraps: a value that
/// would overflow its declared width is a caller error and is not defended
/// against here.
pub trait DecimalValue: Copy {
    /// The engine element type backing this width.
    const ELEMENT: ElementType;

    const ZERO: Self;

    fn is_negative(self) -> bool;

    /// The absolute value (wrapping on the minimum value).
    fn abs_value(self) -> Self;

    fn is_zero(self) -> bool;

    /// Splits off the least significant decimal digit: `(self / 10, self % 10)`.
    fn div_rem_10(self) -> (Self, i32);

    /// `self * mul + add`, wrapping.
    fn mul_i32_add(self, mul: i32, add: i32) -> Self;

    fn negate(self) -> Self;

    /// Reads a value from its fixed-size little-endian storage.
    fn read_le(bytes: &[u8]) -> Self;

    /// Appends this value to a decimal engine column.
    fn push_to(self, col: &mut Column);
}

macro_rules! impl_decimal_value {
    ($ty:ty, $element:expr) => {
        impl DecimalValue for $ty {
            const ELEMENT: ElementType = $element;
            const ZERO: Self = 0;

            #[inline]
            fn is_negative(self) -> bool {
                self < 0
            }

            #[inline]
            fn abs_value(self) -> Self {
                self.wrapping_abs()
            }

            #[inline]
            fn is_zero(self) -> bool {
                self == 0
            }

            #[inline]
            fn div_rem_10(self) -> (Self, i32) {
                (self / 10, (self % 10) as i32)
            }

            #[inline]
            fn mul_i32_add(self, mul: i32, add: i32) -> Self {
                self.wrapping_mul(mul as $ty).wrapping_add(add as $ty)
            }

            #[inline]
            fn negate(self) -> Self {
                self.wrapping_neg()
            }

            fn read_le(bytes: &[u8]) -> Self {
                Self::from_le_bytes(bytes.try_into().expect("decimal storage width"))
            }

            fn push_to(self, col: &mut Column) {
                col.push_fixed(&self.to_le_bytes());
            }
        }
    };
}

impl_decimal_value!(i32, ElementType::Decimal32);
impl_decimal_value!(i64, ElementType::Decimal64);
impl_decimal_value!(i128, ElementType::Decimal128);

impl DecimalValue for i256 {
    const ELEMENT: ElementType = ElementType::Decimal256;
    const ZERO: Self = i256::ZERO;

    #[inline]
    fn is_negative(self) -> bool {
        self < i256::ZERO
    }

    #[inline]
    fn abs_value(self) -> Self {
        if self < i256::ZERO {
            i256::ZERO.wrapping_sub(self)
        } else {
            self
        }
    }

    #[inline]
    fn is_zero(self) -> bool {
        self == i256::ZERO
    }

    #[inline]
    fn div_rem_10(self) -> (Self, i32) {
        let ten = i256::from_i128(10);
        let rem = self.wrapping_rem(ten);
        (
            self.wrapping_div(ten),
            rem.to_i128().expect("single decimal digit") as i32,
        )
    }

    #[inline]
    fn mul_i32_add(self, mul: i32, add: i32) -> Self {
        self.wrapping_mul(i256::from_i128(mul as i128))
            .wrapping_add(i256::from_i128(add as i128))
    }

    #[inline]
    fn negate(self) -> Self {
        self.wrapping_neg()
    }

    fn read_le(bytes: &[u8]) -> Self {
        i256::from_le_bytes(bytes.try_into().expect("decimal storage width"))
    }

    fn push_to(self, col: &mut Column) {
        col.push_fixed(&self.to_le_bytes());
    }
}

/// A scale-carrying packed-decimal value, ready for wire serialization.
///
/// `digits` holds the decimal digits of the absolute value, least
/// significant first, and is always at least `scale` digits long: small
/// values are padded with zeros so the fractional digit count matches the
/// declared scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireDecimal {
    pub scale: u8,
    pub digits: Vec<i32>,
    pub negative: bool,
}

impl WireDecimal {
    /// Builds a `WireDecimal` from an engine decimal value and the column
    /// scale.
    pub fn from_value<T: DecimalValue>(value: T, scale: u8) -> WireDecimal {
        let mut digits = Vec::new();
        decimal_to_digits(value, scale, &mut digits);
        WireDecimal {
            scale,
            digits,
            negative: value.is_negative(),
        }
    }

    /// Number of digits in the integer part.
    #[inline]
    pub fn digits_int(&self) -> usize {
        self.digits.len() - self.scale as usize
    }

    /// Serializes the 40-byte wire record: the 4-byte header followed by
    /// the base-10^9 word buffer, integer words most significant first,
    /// then fractional words, then a partial tail word scaled up to a full
    /// word's worth of digits.
    ///
    /// A digit count exceeding the wire word buffer (a scale the wire
    /// cannot represent) is a logical error; nothing is written in that
    /// case.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let scale = self.scale as usize;
        let digits_int = self.digits.len() - scale;
        let word_int = digits_int.div_ceil(DIGITS_PER_WORD);
        let word_frac = scale / DIGITS_PER_WORD;
        let tail_digits = scale % DIGITS_PER_WORD;
        verify_data!(
            wire_decimal,
            word_int + word_frac + (tail_digits > 0) as usize <= MAX_WORD_BUF_LEN
        );

        out.push(digits_int as u8);
        out.push(scale as u8);
        out.push(scale as u8);
        out.push(self.negative as u8);

        let mut words = [0i32; MAX_WORD_BUF_LEN];

        // Integer digits, grouped from the least significant end; the wire
        // stores the most significant word first.
        let int_digits = &self.digits[scale..];
        for group in 0..word_int {
            let lo = group * DIGITS_PER_WORD;
            let hi = (lo + DIGITS_PER_WORD).min(int_digits.len());
            let mut word = 0i32;
            for k in (lo..hi).rev() {
                word = word * 10 + int_digits[k];
            }
            words[word_int - 1 - group] = word;
        }

        // The fractional digit `p` positions after the point is
        // `digits[scale - p]`.
        for group in 0..word_frac {
            let mut word = 0i32;
            for p in group * DIGITS_PER_WORD + 1..=(group + 1) * DIGITS_PER_WORD {
                word = word * 10 + self.digits[scale - p];
            }
            words[word_int + group] = word;
        }
        if tail_digits > 0 {
            let mut word = 0i32;
            for p in word_frac * DIGITS_PER_WORD + 1..=word_frac * DIGITS_PER_WORD + tail_digits {
                word = word * 10 + self.digits[scale - p];
            }
            word *= 10i32.pow((DIGITS_PER_WORD - tail_digits) as u32);
            words[word_int + word_frac] = word;
        }

        for word in words {
            out.extend_from_slice(&word.to_le_bytes());
        }
        Ok(())
    }
}

/// Emits the decimal digits of `|value|`, least significant first, into
/// `digits`, right-padded with zeros to at least `scale` digits.
///
/// The output buffer is cleared first, so one buffer can be reused across
/// a row loop.
pub fn decimal_to_digits<T: DecimalValue>(value: T, scale: u8, digits: &mut Vec<i32>) {
    digits.clear();
    let mut magnitude = value.abs_value();
    while !magnitude.is_zero() {
        let (quotient, remainder) = magnitude.div_rem_10();
        digits.push(remainder);
        magnitude = quotient;
    }
    while digits.len() < scale as usize {
        digits.push(0);
    }
}

/// Reads one wire decimal record and accumulates it into the engine's
/// native width `T`.
///
/// The unused trailing words still consume their wire bytes; the cursor
/// always advances by [`WIRE_DECIMAL_SIZE`].
pub fn read_wire_decimal<T: DecimalValue>(reader: &mut ByteReader<'_>) -> Result<T> {
    let digits_int = reader.read_u8()? as usize;
    let digits_frac = reader.read_u8()? as usize;
    let _result_frac = reader.read_u8()?;
    let negative = reader.read_u8()? != 0;
    let mut words = [0i32; MAX_WORD_BUF_LEN];
    for word in &mut words {
        *word = reader.read_i32_le()?;
    }

    let word_int = digits_int.div_ceil(DIGITS_PER_WORD);
    let word_frac = digits_frac / DIGITS_PER_WORD;
    let tail_digits = digits_frac % DIGITS_PER_WORD;
    verify_data!(
        wire_decimal,
        word_int + word_frac + (tail_digits > 0) as usize <= MAX_WORD_BUF_LEN
    );

    let mut value = T::ZERO;
    for word in &words[..word_int + word_frac] {
        value = value.mul_i32_add(WORD_MAX, *word);
    }
    if tail_digits > 0 {
        let mut tail = words[word_int + word_frac];
        for _ in 0..DIGITS_PER_WORD - tail_digits {
            tail /= 10;
        }
        value = value.mul_i32_add(10i32.pow(tail_digits as u32), tail);
    }
    Ok(if negative { value.negate() } else { value })
}

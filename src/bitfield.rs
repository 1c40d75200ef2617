//! Bit-field codec shared by both drivers
//!
//! Every register access in this crate funnels through these primitives so
//! that bit-level encoding rules (ranges, averaging counts, mode selectors)
//! are expressed once, next to the register maps, instead of being
//! re-derived at each call site.
//!
//! A bit pattern is a [`Bits`] value: an unsigned integer together with an
//! explicit width of 1..=8 bits. Positions are counted from the most
//! significant bit, so position 0 of an 8-bit register is bit 7 in datasheet
//! numbering. This matches how the sensor datasheets draw their registers
//! left to right.

/// Errors from bit-pattern construction and span arithmetic
///
/// Drivers map these to [`Error::InvalidArgument`](crate::Error) at their
/// public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitFieldError {
    /// The value does not fit in the requested width, or the width is not
    /// in 1..=8
    ValueTooWide,
    /// The span starts past the end of the pattern or runs off its end
    SpanOutOfRange,
}

/// A fixed-width bit pattern
///
/// Invalid patterns are unrepresentable: construction checks that the value
/// fits the width, so every `Bits` in circulation round-trips through
/// [`value`](Self::value) unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bits {
    value: u8,
    width: u8,
}

impl Bits {
    /// Create a bit pattern of exactly `width` bits holding `value`
    ///
    /// # Errors
    ///
    /// Returns [`BitFieldError::ValueTooWide`] when `width` is 0 or greater
    /// than 8, or when `value` needs more than `width` bits.
    pub const fn new(value: u8, width: u8) -> Result<Self, BitFieldError> {
        if width == 0 || width > 8 {
            return Err(BitFieldError::ValueTooWide);
        }
        if width < 8 && value >> width != 0 {
            return Err(BitFieldError::ValueTooWide);
        }
        Ok(Self { value, width })
    }

    /// A full 8-bit pattern (always valid)
    pub const fn byte(value: u8) -> Self {
        Self { value, width: 8 }
    }

    /// A single-bit pattern (always valid)
    ///
    /// Convenience for the one-bit mode and flag flips that make up most of
    /// the power-management transitions.
    pub const fn flag(set: bool) -> Self {
        Self {
            value: set as u8,
            width: 1,
        }
    }

    /// The pattern's value
    pub const fn value(self) -> u8 {
        self.value
    }

    /// The pattern's width in bits
    pub const fn width(self) -> u8 {
        self.width
    }
}

/// Replace a contiguous span of `original` with `replacement`
///
/// The span starts `position` bits from the most significant bit of
/// `original` and is `replacement.width()` bits long. Bits outside the span
/// are returned unchanged.
///
/// ```
/// use gy87::bitfield::{modify_span, Bits};
///
/// let original = Bits::new(0b00000, 5).unwrap();
/// let replacement = Bits::new(0b11, 2).unwrap();
/// let modified = modify_span(original, replacement, 2).unwrap();
/// assert_eq!(modified.value(), 0b00110);
/// ```
///
/// # Errors
///
/// Returns [`BitFieldError::SpanOutOfRange`] when `position` is not inside
/// `original` or the span would run off its end.
pub const fn modify_span(
    original: Bits,
    replacement: Bits,
    position: u8,
) -> Result<Bits, BitFieldError> {
    if position >= original.width() || position + replacement.width() > original.width() {
        return Err(BitFieldError::SpanOutOfRange);
    }

    let shift = original.width() - position - replacement.width();
    let mask = (0xFFu8 >> (8 - replacement.width())) << shift;
    let value = (original.value() & !mask) | (replacement.value() << shift);

    Ok(Bits {
        value,
        width: original.width(),
    })
}

/// Extract `width` bits of `source` starting `position` bits from its most
/// significant bit
///
/// Inverse of [`modify_span`]; used by the typed getters to pull a selector
/// field out of a register before table decode.
///
/// # Errors
///
/// Returns [`BitFieldError::SpanOutOfRange`] under the same conditions as
/// [`modify_span`], and [`BitFieldError::ValueTooWide`] when `width` is 0.
pub const fn extract_span(source: Bits, position: u8, width: u8) -> Result<u8, BitFieldError> {
    if width == 0 {
        return Err(BitFieldError::ValueTooWide);
    }
    if position >= source.width() || position + width > source.width() {
        return Err(BitFieldError::SpanOutOfRange);
    }

    let shift = source.width() - position - width;
    Ok((source.value() >> shift) & (0xFFu8 >> (8 - width)))
}

/// Combine a high and a low byte into one 16-bit value, high byte first
pub const fn combine_bytes(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

/// Combine high bits over `low_width` low bits: `(high << low_width) | low`
///
/// The general form of [`combine_bytes`]; the accelerometer factory-trim
/// decode uses it with a 2-bit low part.
pub const fn combine_bits(high: u16, low: u16, low_width: u32) -> u16 {
    (high << low_width) | low
}

/// Interpret `value` as a two's-complement integer over `bit_width` bits
///
/// When the sign bit is set the result is `value - 2^bit_width`. `bit_width`
/// must be in 1..=16; 16 is the common case for combined measurement
/// registers.
pub const fn sign_extend(value: u16, bit_width: u32) -> i16 {
    if value & (1 << (bit_width - 1)) != 0 {
        (value as i32 - (1i32 << bit_width)) as i16
    } else {
        value as i16
    }
}

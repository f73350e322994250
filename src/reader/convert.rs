//! Conversion of raw value text into typed values.
//!
//! Every conversion consumes the whole (already trimmed) text. Integers and
//! floats report syntax and range failures separately, and floats honour a
//! [`DecimalSeparator`] policy instead of any process-wide locale.

use std::fmt;
use std::num::{IntErrorKind, ParseFloatError, ParseIntError};
use std::str::FromStr;

use serde::Deserialize;

use super::error::ConvertError;

/// Character accepted as the decimal point when converting floats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum DecimalSeparator {
    #[default]
    #[serde(rename = ".", alias = "dot")]
    Dot,
    #[serde(rename = ",", alias = "comma")]
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(self) -> char {
        match self {
            DecimalSeparator::Dot => '.',
            DecimalSeparator::Comma => ',',
        }
    }

    fn other(self) -> char {
        match self {
            DecimalSeparator::Dot => ',',
            DecimalSeparator::Comma => '.',
        }
    }
}

/// The type a raw value should be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Text,
}

impl ValueKind {
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            ValueKind::U8 | ValueKind::U16 | ValueKind::U32 | ValueKind::U64
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::I8 => "i8",
            ValueKind::I16 => "i16",
            ValueKind::I32 => "i32",
            ValueKind::I64 => "i64",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::F32 => "f32",
            ValueKind::F64 => "f64",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// A converted value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Text(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::I8(_) => ValueKind::I8,
            Value::I16(_) => ValueKind::I16,
            Value::I32(_) => ValueKind::I32,
            Value::I64(_) => ValueKind::I64,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::F32(_) => ValueKind::F32,
            Value::F64(_) => ValueKind::F64,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I8(v) => v.fmt(f),
            Value::I16(v) => v.fmt(f),
            Value::I32(v) => v.fmt(f),
            Value::I64(v) => v.fmt(f),
            Value::U8(v) => v.fmt(f),
            Value::U16(v) => v.fmt(f),
            Value::U32(v) => v.fmt(f),
            Value::U64(v) => v.fmt(f),
            Value::F32(v) => v.fmt(f),
            Value::F64(v) => v.fmt(f),
            Value::Text(v) => f.write_str(v),
        }
    }
}

/// Types a raw value can be converted into.
pub trait FromIni: Sized {
    const KIND: ValueKind;

    fn from_ini(raw: &str, separator: DecimalSeparator) -> Result<Self, ConvertError>;
}

macro_rules! impl_from_ini_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FromIni for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn from_ini(raw: &str, _: DecimalSeparator) -> Result<Self, ConvertError> {
                    parse_int(raw, Self::KIND)
                }
            }
        )*
    };
}

macro_rules! impl_from_ini_float {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl FromIni for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn from_ini(raw: &str, separator: DecimalSeparator) -> Result<Self, ConvertError> {
                    parse_float(raw, Self::KIND, separator)
                }
            }
        )*
    };
}

impl_from_ini_int!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
);

impl_from_ini_float!(f32 => F32, f64 => F64);

impl FromIni for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_ini(raw: &str, _: DecimalSeparator) -> Result<Self, ConvertError> {
        Ok(raw.to_string())
    }
}

/// Converts `raw` to the kind named by `kind`.
pub fn convert(
    raw: &str,
    kind: ValueKind,
    separator: DecimalSeparator,
) -> Result<Value, ConvertError> {
    match kind {
        ValueKind::I8 => i8::from_ini(raw, separator).map(Value::I8),
        ValueKind::I16 => i16::from_ini(raw, separator).map(Value::I16),
        ValueKind::I32 => i32::from_ini(raw, separator).map(Value::I32),
        ValueKind::I64 => i64::from_ini(raw, separator).map(Value::I64),
        ValueKind::U8 => u8::from_ini(raw, separator).map(Value::U8),
        ValueKind::U16 => u16::from_ini(raw, separator).map(Value::U16),
        ValueKind::U32 => u32::from_ini(raw, separator).map(Value::U32),
        ValueKind::U64 => u64::from_ini(raw, separator).map(Value::U64),
        ValueKind::F32 => f32::from_ini(raw, separator).map(Value::F32),
        ValueKind::F64 => f64::from_ini(raw, separator).map(Value::F64),
        ValueKind::Text => String::from_ini(raw, separator).map(Value::Text),
    }
}

fn parse_int<T>(raw: &str, kind: ValueKind) -> Result<T, ConvertError>
where
    T: FromStr<Err = ParseIntError>,
{
    // "-0" is in range for unsigned widths.
    let text = match raw.strip_prefix('-') {
        Some(digits) if kind.is_unsigned() && is_zero(digits) => digits,
        _ => raw,
    };

    text.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ConvertError::IntegerOutOfRange {
            raw: raw.to_string(),
            kind,
        },
        // Unsigned parsing rejects the sign itself; a well-formed negative
        // number is still a range failure.
        _ if kind.is_unsigned() && is_negative_integer(raw) => ConvertError::IntegerOutOfRange {
            raw: raw.to_string(),
            kind,
        },
        _ => ConvertError::NotAnInteger {
            raw: raw.to_string(),
        },
    })
}

fn is_zero(digits: &str) -> bool {
    !digits.is_empty() && digits.bytes().all(|b| b == b'0')
}

fn is_negative_integer(s: &str) -> bool {
    s.strip_prefix('-')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

trait Float: FromStr<Err = ParseFloatError> + Copy {
    fn is_infinite(self) -> bool;
}

impl Float for f32 {
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl Float for f64 {
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}

fn parse_float<T: Float>(
    raw: &str,
    kind: ValueKind,
    separator: DecimalSeparator,
) -> Result<T, ConvertError> {
    let not_a_float = |found| ConvertError::NotAFloat {
        raw: raw.to_string(),
        separator,
        found,
    };

    let parsed = match separator {
        DecimalSeparator::Dot => raw.parse::<T>(),
        DecimalSeparator::Comma => {
            if raw.contains('.') {
                return Err(not_a_float(Some('.')));
            }
            raw.replace(',', ".").parse::<T>()
        }
    };

    let value = parsed.map_err(|_| {
        let other = separator.other();
        not_a_float(raw.contains(other).then_some(other))
    })?;

    if value.is_infinite() && !is_infinity_literal(raw) {
        return Err(ConvertError::FloatOutOfRange {
            raw: raw.to_string(),
            kind,
        });
    }

    Ok(value)
}

fn is_infinity_literal(s: &str) -> bool {
    let s = s.trim_start_matches(['+', '-']);
    s.eq_ignore_ascii_case("inf") || s.eq_ignore_ascii_case("infinity")
}

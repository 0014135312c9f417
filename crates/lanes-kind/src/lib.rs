#![forbid(unsafe_code)]

use std::fmt;
use std::ops::{Add, Sub};

/// The closed set of lane kinds a vector kernel can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    F32,
    F64,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl NumericKind {
    pub const ALL: [Self; 10] = [
        Self::F32,
        Self::F64,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "f32" | "float32" => Some(Self::F32),
            "f64" | "float64" => Some(Self::F64),
            "i8" | "int8" => Some(Self::I8),
            "i16" | "int16" => Some(Self::I16),
            "i32" | "int32" => Some(Self::I32),
            "i64" | "int64" => Some(Self::I64),
            "u8" | "uint8" => Some(Self::U8),
            "u16" | "uint16" => Some(Self::U16),
            "u32" | "uint32" => Some(Self::U32),
            "u64" | "uint64" => Some(Self::U64),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    #[must_use]
    pub const fn is_unsigned(self) -> bool {
        matches!(self, Self::U8 | Self::U16 | Self::U32 | Self::U64)
    }

    #[must_use]
    pub const fn bit_width(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::F32 | Self::I32 | Self::U32 => 32,
            Self::F64 | Self::I64 | Self::U64 => 64,
        }
    }

    /// Number of literals placed on one line of a serialized vector.
    #[must_use]
    pub const fn elements_per_line(self) -> usize {
        match self {
            Self::F32 | Self::F64 | Self::I64 | Self::U64 => 4,
            Self::I8 | Self::I16 | Self::I32 | Self::U8 | Self::U16 | Self::U32 => 8,
        }
    }

    /// Column width a sentinel token is right-aligned to.
    ///
    /// For floats this is the NaN column; for integers it is the min/max
    /// column, which is the same for signed and unsigned kinds of one width.
    #[must_use]
    pub const fn sentinel_width(self) -> usize {
        match self {
            Self::F32 => 25,
            Self::F64 => 26,
            Self::I8 | Self::U8 => 13,
            Self::I16 | Self::U16 => 15,
            Self::I32 | Self::U32 => 20,
            Self::I64 | Self::U64 => 29,
        }
    }

    /// Width of the sign slot that precedes the infinity token.
    #[must_use]
    pub const fn infinity_sign_width(self) -> usize {
        match self {
            Self::F32 => 5,
            Self::F64 => 7,
            _ => 0,
        }
    }

    /// Field width of the magnitude inside a generic literal.
    ///
    /// Signed kinds leave the sign outside the wrapper, so the field only
    /// holds the absolute value.
    #[must_use]
    pub const fn digit_width(self) -> usize {
        match self {
            Self::F32 | Self::F64 => 9,
            Self::I8 => 4,
            Self::I16 => 6,
            Self::I32 => 12,
            Self::I64 => 20,
            Self::U8 => 3,
            Self::U16 => 5,
            Self::U32 => 10,
            Self::U64 => 20,
        }
    }

    #[must_use]
    pub const fn literal_wrapper(self) -> &'static str {
        match self {
            Self::F32 => "FLOAT32_C",
            Self::F64 => "FLOAT64_C",
            Self::I8 => "INT8_C",
            Self::I16 => "INT16_C",
            Self::I32 => "INT32_C",
            Self::I64 => "INT64_C",
            Self::U8 => "UINT8_C",
            Self::U16 => "UINT16_C",
            Self::U32 => "UINT32_C",
            Self::U64 => "UINT64_C",
        }
    }

    #[must_use]
    pub const fn min_token(self) -> Option<&'static str> {
        match self {
            Self::I8 => Some("INT8_MIN"),
            Self::I16 => Some("INT16_MIN"),
            Self::I32 => Some("INT32_MIN"),
            Self::I64 => Some("INT64_MIN"),
            _ => None,
        }
    }

    #[must_use]
    pub const fn max_token(self) -> Option<&'static str> {
        match self {
            Self::I8 => Some("INT8_MAX"),
            Self::I16 => Some("INT16_MAX"),
            Self::I32 => Some("INT32_MAX"),
            Self::I64 => Some("INT64_MAX"),
            Self::U8 => Some("UINT8_MAX"),
            Self::U16 => Some("UINT16_MAX"),
            Self::U32 => Some("UINT32_MAX"),
            Self::U64 => Some("UINT64_MAX"),
            Self::F32 | Self::F64 => None,
        }
    }

    #[must_use]
    pub const fn nan_token(self) -> Option<&'static str> {
        match self {
            Self::F32 => Some("MATH_NANF"),
            Self::F64 => Some("MATH_NAN"),
            _ => None,
        }
    }

    #[must_use]
    pub const fn infinity_token(self) -> Option<&'static str> {
        match self {
            Self::F32 => Some("MATH_INFINITYF"),
            Self::F64 => Some("MATH_INFINITY"),
            _ => None,
        }
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lane value tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl NumericValue {
    #[must_use]
    pub const fn kind(self) -> NumericKind {
        match self {
            Self::F32(_) => NumericKind::F32,
            Self::F64(_) => NumericKind::F64,
            Self::I8(_) => NumericKind::I8,
            Self::I16(_) => NumericKind::I16,
            Self::I32(_) => NumericKind::I32,
            Self::I64(_) => NumericKind::I64,
            Self::U8(_) => NumericKind::U8,
            Self::U16(_) => NumericKind::U16,
            Self::U32(_) => NumericKind::U32,
            Self::U64(_) => NumericKind::U64,
        }
    }

    /// Raw bit pattern, zero-extended to 64 bits.
    #[must_use]
    pub fn bits(self) -> u64 {
        match self {
            Self::F32(v) => u64::from(v.to_bits()),
            Self::F64(v) => v.to_bits(),
            Self::I8(v) => u64::from(v as u8),
            Self::I16(v) => u64::from(v as u16),
            Self::I32(v) => u64::from(v as u32),
            Self::I64(v) => v as u64,
            Self::U8(v) => u64::from(v),
            Self::U16(v) => u64::from(v),
            Self::U32(v) => u64::from(v),
            Self::U64(v) => v,
        }
    }

    /// Rebuilds a value from its kind and the low `bit_width` bits of `bits`.
    #[must_use]
    pub fn from_bits(kind: NumericKind, bits: u64) -> Self {
        match kind {
            NumericKind::F32 => Self::F32(f32::from_bits(bits as u32)),
            NumericKind::F64 => Self::F64(f64::from_bits(bits)),
            NumericKind::I8 => Self::I8(bits as u8 as i8),
            NumericKind::I16 => Self::I16(bits as u16 as i16),
            NumericKind::I32 => Self::I32(bits as u32 as i32),
            NumericKind::I64 => Self::I64(bits as i64),
            NumericKind::U8 => Self::U8(bits as u8),
            NumericKind::U16 => Self::U16(bits as u16),
            NumericKind::U32 => Self::U32(bits as u32),
            NumericKind::U64 => Self::U64(bits),
        }
    }

    #[must_use]
    pub fn is_nan(self) -> bool {
        match self {
            Self::F32(v) => v.is_nan(),
            Self::F64(v) => v.is_nan(),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_infinite(self) -> bool {
        match self {
            Self::F32(v) => v.is_infinite(),
            Self::F64(v) => v.is_infinite(),
            _ => false,
        }
    }

    /// True when the value equals its kind's minimum and the kind has a
    /// minimum sentinel (signed integers only).
    #[must_use]
    pub fn is_min_sentinel(self) -> bool {
        match self {
            Self::I8(v) => v == i8::MIN,
            Self::I16(v) => v == i16::MIN,
            Self::I32(v) => v == i32::MIN,
            Self::I64(v) => v == i64::MIN,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_max_sentinel(self) -> bool {
        match self {
            Self::I8(v) => v == i8::MAX,
            Self::I16(v) => v == i16::MAX,
            Self::I32(v) => v == i32::MAX,
            Self::I64(v) => v == i64::MAX,
            Self::U8(v) => v == u8::MAX,
            Self::U16(v) => v == u16::MAX,
            Self::U32(v) => v == u32::MAX,
            Self::U64(v) => v == u64::MAX,
            Self::F32(_) | Self::F64(_) => false,
        }
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        match self {
            Self::F32(v) => v < 0.0,
            Self::F64(v) => v < 0.0,
            Self::I8(v) => v < 0,
            Self::I16(v) => v < 0,
            Self::I32(v) => v < 0,
            Self::I64(v) => v < 0,
            _ => false,
        }
    }

    /// Magnitude of an integer value. `None` for floats.
    ///
    /// Callers must handle the signed minimum through its sentinel first;
    /// its magnitude is still returned correctly because the result is
    /// widened to `u64`.
    #[must_use]
    pub fn unsigned_magnitude(self) -> Option<u64> {
        match self {
            Self::F32(_) | Self::F64(_) => None,
            Self::I8(v) => Some(u64::from(v.unsigned_abs())),
            Self::I16(v) => Some(u64::from(v.unsigned_abs())),
            Self::I32(v) => Some(u64::from(v.unsigned_abs())),
            Self::I64(v) => Some(v.unsigned_abs()),
            Self::U8(v) => Some(u64::from(v)),
            Self::U16(v) => Some(u64::from(v)),
            Self::U32(v) => Some(u64::from(v)),
            Self::U64(v) => Some(v),
        }
    }

    /// Float value widened to `f64`. `None` for integers.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(v)),
            Self::F64(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32(v) => write!(f, "{:.6}", f64::from(*v)),
            Self::F64(v) => write!(f, "{v:.6}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A primitive lane type. Implemented for the ten kinds in [`NumericKind`].
pub trait Lane: Copy + PartialEq + fmt::Debug + Send + Sync + 'static + sealed::Sealed {
    const KIND: NumericKind;

    fn to_value(self) -> NumericValue;

    /// Builds a lane from `size_of::<Self>()` little-endian bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;
}

/// Floating-point lanes, compared with a slop window.
pub trait FloatLane: Lane + PartialOrd + Add<Output = Self> + Sub<Output = Self> {
    fn is_nan(self) -> bool;

    fn is_infinite(self) -> bool;

    /// `10^-precision` in this lane's precision.
    fn slop_for_precision(precision: u32) -> Self;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;
}

/// Integer lanes, compared exactly.
pub trait IntLane: Lane + Eq + fmt::Display {
    const MIN: Self;
    const MAX: Self;
}

macro_rules! impl_lane {
    ($ty:ty, $kind:ident) => {
        impl sealed::Sealed for $ty {}

        impl Lane for $ty {
            const KIND: NumericKind = NumericKind::$kind;

            fn to_value(self) -> NumericValue {
                NumericValue::$kind(self)
            }

            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; std::mem::size_of::<$ty>()];
                let take = raw.len().min(bytes.len());
                raw[..take].copy_from_slice(&bytes[..take]);
                <$ty>::from_le_bytes(raw)
            }
        }

        impl From<$ty> for NumericValue {
            fn from(value: $ty) -> Self {
                NumericValue::$kind(value)
            }
        }
    };
}

macro_rules! impl_float_lane {
    ($ty:ty) => {
        impl FloatLane for $ty {
            fn is_nan(self) -> bool {
                <$ty>::is_nan(self)
            }

            fn is_infinite(self) -> bool {
                <$ty>::is_infinite(self)
            }

            fn slop_for_precision(precision: u32) -> Self {
                let exponent = i32::try_from(precision).unwrap_or(i32::MAX);
                10f64.powi(-exponent) as $ty
            }

            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }
        }
    };
}

macro_rules! impl_int_lane {
    ($ty:ty) => {
        impl IntLane for $ty {
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;
        }
    };
}

impl_lane!(f32, F32);
impl_lane!(f64, F64);
impl_lane!(i8, I8);
impl_lane!(i16, I16);
impl_lane!(i32, I32);
impl_lane!(i64, I64);
impl_lane!(u8, U8);
impl_lane!(u16, U16);
impl_lane!(u32, U32);
impl_lane!(u64, U64);

impl_float_lane!(f32);
impl_float_lane!(f64);

impl_int_lane!(i8);
impl_int_lane!(i16);
impl_int_lane!(i32);
impl_int_lane!(i64);
impl_int_lane!(u8);
impl_int_lane!(u16);
impl_int_lane!(u32);
impl_int_lane!(u64);

use super::{ColumnType, NativeNumeric};
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

/// A single numeric value, used as the broadcast side of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    /// i8 literals
    TinyInt(i8),
    /// i16 literals
    SmallInt(i16),
    /// i32 literals
    Int(i32),
    /// i64 literals
    BigInt(i64),
    /// i128 literals
    Int128(i128),
    /// f32 literals
    Real(f32),
    /// f64 literals
    Double(f64),
}

impl LiteralValue {
    /// The nil literal of a column type.
    #[must_use]
    pub fn nil(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::TinyInt => Self::TinyInt(i8::NIL),
            ColumnType::SmallInt => Self::SmallInt(i16::NIL),
            ColumnType::Int => Self::Int(i32::NIL),
            ColumnType::BigInt => Self::BigInt(i64::NIL),
            ColumnType::Int128 => Self::Int128(i128::NIL),
            ColumnType::Real => Self::Real(f32::NIL),
            ColumnType::Double => Self::Double(f64::NIL),
        }
    }

    /// Provides the column type associated with the literal
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::TinyInt(_) => ColumnType::TinyInt,
            Self::SmallInt(_) => ColumnType::SmallInt,
            Self::Int(_) => ColumnType::Int,
            Self::BigInt(_) => ColumnType::BigInt,
            Self::Int128(_) => ColumnType::Int128,
            Self::Real(_) => ColumnType::Real,
            Self::Double(_) => ColumnType::Double,
        }
    }

    /// Returns true if the literal is nil.
    #[must_use]
    pub fn is_nil(self) -> bool {
        match self {
            Self::TinyInt(v) => v.is_nil(),
            Self::SmallInt(v) => v.is_nil(),
            Self::Int(v) => v.is_nil(),
            Self::BigInt(v) => v.is_nil(),
            Self::Int128(v) => v.is_nil(),
            Self::Real(v) => v.is_nil(),
            Self::Double(v) => v.is_nil(),
        }
    }

    /// How the literal compares to zero, or `None` if it is nil.
    #[must_use]
    pub fn signum(self) -> Option<Ordering> {
        if self.is_nil() {
            return None;
        }
        match self {
            Self::TinyInt(v) => Some(v.cmp(&0)),
            Self::SmallInt(v) => Some(v.cmp(&0)),
            Self::Int(v) => Some(v.cmp(&0)),
            Self::BigInt(v) => Some(v.cmp(&0)),
            Self::Int128(v) => Some(v.cmp(&0)),
            Self::Real(v) => v.partial_cmp(&0.0),
            Self::Double(v) => v.partial_cmp(&0.0),
        }
    }
}

macro_rules! impl_from_native {
    ($t:ty, $variant:ident) => {
        impl From<$t> for LiteralValue {
            fn from(value: $t) -> Self {
                Self::$variant(value)
            }
        }
    };
}

impl_from_native!(i8, TinyInt);
impl_from_native!(i16, SmallInt);
impl_from_native!(i32, Int);
impl_from_native!(i64, BigInt);
impl_from_native!(i128, Int128);
impl_from_native!(f32, Real);
impl_from_native!(f64, Double);

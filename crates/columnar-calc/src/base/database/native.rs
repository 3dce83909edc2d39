//! Native element types of numeric columns and their nil sentinels.
//!
//! Integers reserve their minimum value as nil, so the representable range of
//! an integer width is the symmetric `[-MAX, MAX]`. Floats use NaN.
use super::{ColumnType, LiteralValue, OwnedColumn};
use alloc::vec::Vec;
use core::fmt::{Debug, Display};
use num_traits::{AsPrimitive, NumCast, Signed};

/// A native value that can be stored in an [`OwnedColumn`].
pub trait NativeNumeric:
    Copy
    + Debug
    + Display
    + PartialOrd
    + Default
    + Send
    + Sync
    + 'static
    + Signed
    + NumCast
    + AsPrimitive<i8>
    + AsPrimitive<i16>
    + AsPrimitive<i32>
    + AsPrimitive<i64>
    + AsPrimitive<i128>
    + AsPrimitive<f32>
    + AsPrimitive<f64>
{
    /// The column type holding values of this type.
    const COLUMN_TYPE: ColumnType;
    /// The sentinel denoting a missing value.
    const NIL: Self;
    /// The largest representable non-nil magnitude.
    const MAX: Self;
    /// Whether this is a floating point type.
    const IS_FLOAT: bool;

    /// Returns true if `self` is the missing value.
    fn is_nil(self) -> bool;

    /// Returns true if `self` is an infinity. Always false for integers.
    fn is_infinite(self) -> bool;

    /// Wraps a vector of values into a column.
    fn into_column(values: Vec<Self>) -> OwnedColumn;

    /// Wraps a single value into a literal.
    fn into_literal(self) -> LiteralValue;
}

macro_rules! impl_native_integer {
    ($t:ty, $column_type:ident) => {
        impl NativeNumeric for $t {
            const COLUMN_TYPE: ColumnType = ColumnType::$column_type;
            const NIL: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const IS_FLOAT: bool = false;

            #[inline]
            fn is_nil(self) -> bool {
                self == <$t>::MIN
            }

            #[inline]
            fn is_infinite(self) -> bool {
                false
            }

            fn into_column(values: Vec<Self>) -> OwnedColumn {
                OwnedColumn::$column_type(values)
            }

            fn into_literal(self) -> LiteralValue {
                LiteralValue::$column_type(self)
            }
        }
    };
}

macro_rules! impl_native_float {
    ($t:ty, $column_type:ident) => {
        impl NativeNumeric for $t {
            const COLUMN_TYPE: ColumnType = ColumnType::$column_type;
            const NIL: Self = <$t>::NAN;
            const MAX: Self = <$t>::MAX;
            const IS_FLOAT: bool = true;

            #[inline]
            fn is_nil(self) -> bool {
                self.is_nan()
            }

            #[inline]
            fn is_infinite(self) -> bool {
                <$t>::is_infinite(self)
            }

            fn into_column(values: Vec<Self>) -> OwnedColumn {
                OwnedColumn::$column_type(values)
            }

            fn into_literal(self) -> LiteralValue {
                LiteralValue::$column_type(self)
            }
        }
    };
}

impl_native_integer!(i8, TinyInt);
impl_native_integer!(i16, SmallInt);
impl_native_integer!(i32, Int);
impl_native_integer!(i64, BigInt);
impl_native_integer!(i128, Int128);
impl_native_float!(f32, Real);
impl_native_float!(f64, Double);

/// Orders two values with nil first.
///
/// Returns true when `lhs` may precede `rhs` in an ascending column.
pub(crate) fn nil_first_le<T: NativeNumeric>(lhs: T, rhs: T) -> bool {
    lhs.is_nil() || (!rhs.is_nil() && lhs <= rhs)
}

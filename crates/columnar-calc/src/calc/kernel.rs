//! Element kernels of the arithmetic operators.
//!
//! Every kernel takes two non-nil operands and either produces a non-nil result of
//! the result type `O` or reports why the row has none. Nil handling happens in the
//! driver loop. Bounds are symmetric: a result is representable iff it lies in
//! `[-O::MAX, O::MAX]`, which keeps the integer nil out of every result.
use super::PromotionOutcome;
use crate::base::{database::NativeNumeric, math::checked_split_mul};
use num_traits::{AsPrimitive, NumCast};

/// Why a row has no result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowFault {
    /// The exact result is outside the range of the result type.
    Overflow,
    /// The denominator is zero.
    DivisionByZero,
}

pub(crate) type RowResult<T> = Result<T, RowFault>;

/// Narrows an `i128` into `O`, failing outside `[-O::MAX, O::MAX]`.
fn narrow<O>(value: i128) -> RowResult<O>
where
    O: NativeNumeric,
    i128: AsPrimitive<O>,
{
    let max: i128 = O::MAX.as_();
    if value > max || value < -max {
        Err(RowFault::Overflow)
    } else {
        Ok(value.as_())
    }
}

/// Converts an already rounded float into the integer type `O`.
fn from_rounded<O: NativeNumeric>(value: f64) -> RowResult<O> {
    let value: O = NumCast::from(value).ok_or(RowFault::Overflow)?;
    if value < -O::MAX {
        Err(RowFault::Overflow)
    } else {
        Ok(value)
    }
}

/// `lhs + rhs`, computed in the result type.
#[inline]
pub(crate) fn try_add<L, R, O>(lhs: L, rhs: R, outcome: PromotionOutcome) -> RowResult<O>
where
    L: NativeNumeric + AsPrimitive<O>,
    R: NativeNumeric + AsPrimitive<O>,
    O: NativeNumeric,
{
    let (lhs, rhs): (O, O) = (lhs.as_(), rhs.as_());
    if outcome != PromotionOutcome::NeverOverflows {
        let overflows = if rhs < O::one() {
            -O::MAX - rhs > lhs
        } else {
            O::MAX - rhs < lhs
        };
        if overflows {
            return Err(RowFault::Overflow);
        }
    }
    Ok(lhs + rhs)
}

/// `lhs - rhs`, computed in the result type.
#[inline]
pub(crate) fn try_sub<L, R, O>(lhs: L, rhs: R, outcome: PromotionOutcome) -> RowResult<O>
where
    L: NativeNumeric + AsPrimitive<O>,
    R: NativeNumeric + AsPrimitive<O>,
    O: NativeNumeric,
{
    let (lhs, rhs): (O, O) = (lhs.as_(), rhs.as_());
    if outcome != PromotionOutcome::NeverOverflows {
        let overflows = if rhs < O::one() {
            O::MAX + rhs < lhs
        } else {
            -O::MAX + rhs > lhs
        };
        if overflows {
            return Err(RowFault::Overflow);
        }
    }
    Ok(lhs - rhs)
}

/// Integral float factors below this magnitude convert to `i128` exactly.
const EXACT_FACTOR_LIMIT: f64 = 1.0e38;

/// Integer times float into an integer: the product is rounded half away from zero.
///
/// An integral factor is multiplied exactly in `i128`. Otherwise the product is formed in
/// `f64`, so an integer operand above 2^53 loses its low bits before rounding.
fn mul_rounded<L, R, O>(lhs: L, rhs: R) -> RowResult<O>
where
    L: NativeNumeric,
    R: NativeNumeric,
    O: NativeNumeric,
    i128: AsPrimitive<O>,
{
    let factor: f64 = rhs.as_();
    if factor.fract() == 0.0 && factor.abs() < EXACT_FACTOR_LIMIT {
        let (lhs, factor): (i128, i128) = (lhs.as_(), rhs.as_());
        let max: i128 = O::MAX.as_();
        let product = checked_split_mul(lhs, factor, max).ok_or(RowFault::Overflow)?;
        return Ok(product.as_());
    }
    let (lhs, rhs): (f64, f64) = (lhs.as_(), factor);
    if lhs == 0.0 {
        return Ok(O::zero());
    }
    let max: f64 = O::MAX.as_();
    if max / rhs.abs() < lhs.abs() {
        return Err(RowFault::Overflow);
    }
    from_rounded((lhs * rhs).round())
}

/// `lhs * rhs` into the result type.
#[inline]
pub(crate) fn try_mul<L, R, O>(lhs: L, rhs: R, outcome: PromotionOutcome) -> RowResult<O>
where
    L: NativeNumeric + AsPrimitive<O>,
    R: NativeNumeric + AsPrimitive<O>,
    O: NativeNumeric,
    i128: AsPrimitive<O>,
{
    if O::IS_FLOAT {
        let (lhs, rhs): (O, O) = (lhs.as_(), rhs.as_());
        let product = lhs * rhs;
        if outcome != PromotionOutcome::NeverOverflows
            && (product.is_infinite() || product.abs() > O::MAX)
        {
            return Err(RowFault::Overflow);
        }
        return Ok(product);
    }
    if L::IS_FLOAT || R::IS_FLOAT {
        return mul_rounded(lhs, rhs);
    }
    if outcome == PromotionOutcome::NeverOverflows {
        let (lhs, rhs): (O, O) = (lhs.as_(), rhs.as_());
        return Ok(lhs * rhs);
    }
    let (lhs, rhs): (i128, i128) = (lhs.as_(), rhs.as_());
    if outcome == PromotionOutcome::UseWiderType {
        return narrow(lhs.checked_mul(rhs).ok_or(RowFault::Overflow)?);
    }
    let max: i128 = O::MAX.as_();
    let product = checked_split_mul(lhs, rhs, max).ok_or(RowFault::Overflow)?;
    Ok(product.as_())
}

/// `lhs / rhs` into the result type. Integer quotients truncate toward zero.
#[inline]
pub(crate) fn try_div<L, R, O>(lhs: L, rhs: R) -> RowResult<O>
where
    L: NativeNumeric + AsPrimitive<O>,
    R: NativeNumeric + AsPrimitive<O>,
    O: NativeNumeric,
    i128: AsPrimitive<O>,
{
    if rhs == R::zero() {
        return Err(RowFault::DivisionByZero);
    }
    if !L::IS_FLOAT && !R::IS_FLOAT {
        let (lhs, rhs): (i128, i128) = (lhs.as_(), rhs.as_());
        let quotient = lhs / rhs;
        return if O::IS_FLOAT {
            Ok(quotient.as_())
        } else {
            narrow(quotient)
        };
    }
    if !O::IS_FLOAT {
        let (lhs, rhs): (f64, f64) = (lhs.as_(), rhs.as_());
        if lhs == 0.0 {
            return Ok(O::zero());
        }
        let max: f64 = O::MAX.as_();
        let magnitude = rhs.abs();
        if magnitude < 1.0 && lhs.abs() > magnitude * max {
            return Err(RowFault::Overflow);
        }
        return from_rounded((lhs / rhs).round());
    }
    let (lhs, rhs): (O, O) = (lhs.as_(), rhs.as_());
    let magnitude = rhs.abs();
    if magnitude < O::one() && O::MAX * magnitude < lhs.abs() {
        return Err(RowFault::Overflow);
    }
    let quotient = lhs / rhs;
    if quotient.is_infinite() || quotient.abs() > O::MAX {
        return Err(RowFault::Overflow);
    }
    Ok(quotient)
}

/// `lhs % rhs` into the result type. The remainder takes the sign of `lhs`.
#[inline]
pub(crate) fn try_mod<L, R, O>(lhs: L, rhs: R) -> RowResult<O>
where
    L: NativeNumeric + AsPrimitive<O>,
    R: NativeNumeric + AsPrimitive<O>,
    O: NativeNumeric,
    i128: AsPrimitive<O>,
{
    if rhs == R::zero() {
        return Err(RowFault::DivisionByZero);
    }
    if L::IS_FLOAT || R::IS_FLOAT {
        let (lhs, rhs): (O, O) = (lhs.as_(), rhs.as_());
        return Ok(lhs % rhs);
    }
    let (lhs, rhs): (i128, i128) = (lhs.as_(), rhs.as_());
    Ok((lhs % rhs).as_())
}

#[cfg(test)]
mod test {
    use super::*;
    use PromotionOutcome::{ManualSplit, MustCheck, NeverOverflows, UseWiderType};

    #[test]
    fn we_can_try_add_values() {
        assert_eq!(try_add::<i8, i8, i8>(100, 27, MustCheck), Ok(127));
        assert_eq!(try_add::<i8, i8, i8>(-100, -27, MustCheck), Ok(-127));
        assert_eq!(try_add::<i8, i8, i16>(127, 127, NeverOverflows), Ok(254));
        assert_eq!(try_add::<i32, i8, i64>(i32::MAX, 1, NeverOverflows), Ok(2_147_483_648));
        assert_eq!(try_add::<f32, i8, f32>(1.5, 2, MustCheck), Ok(3.5));
    }

    #[test]
    fn we_cannot_try_add_values_if_overflow() {
        assert_eq!(try_add::<i8, i8, i8>(100, 100, MustCheck), Err(RowFault::Overflow));
        assert_eq!(try_add::<i8, i8, i8>(-100, -28, MustCheck), Err(RowFault::Overflow));
        assert_eq!(
            try_add::<i128, i128, i128>(i128::MAX, 1, MustCheck),
            Err(RowFault::Overflow)
        );
        assert_eq!(
            try_add::<f64, f64, f64>(f64::MAX, f64::MAX, MustCheck),
            Err(RowFault::Overflow)
        );
    }

    #[test]
    fn additions_may_reach_but_not_pass_the_symmetric_bounds() {
        assert_eq!(try_add::<i16, i16, i16>(i16::MAX - 1, 1, MustCheck), Ok(i16::MAX));
        assert_eq!(try_add::<i16, i16, i16>(-i16::MAX + 1, -1, MustCheck), Ok(-i16::MAX));
        assert_eq!(
            try_add::<i16, i16, i16>(-i16::MAX, -1, MustCheck),
            Err(RowFault::Overflow)
        );
    }

    #[test]
    fn we_can_try_subtract_values() {
        assert_eq!(try_sub::<i8, i8, i8>(-100, 27, MustCheck), Ok(-127));
        assert_eq!(try_sub::<i8, i8, i8>(100, -27, MustCheck), Ok(127));
        assert_eq!(try_sub::<i64, i64, i128>(i64::MAX, -1, NeverOverflows), Ok(1i128 << 63));
        assert_eq!(try_sub::<f64, i32, f64>(0.5, 2, MustCheck), Ok(-1.5));
    }

    #[test]
    fn we_cannot_try_subtract_values_if_overflow() {
        assert_eq!(try_sub::<i8, i8, i8>(-100, 28, MustCheck), Err(RowFault::Overflow));
        assert_eq!(try_sub::<i8, i8, i8>(100, -28, MustCheck), Err(RowFault::Overflow));
        assert_eq!(try_sub::<i32, i32, i32>(0, -i32::MAX, MustCheck), Ok(i32::MAX));
        assert_eq!(
            try_sub::<i32, i32, i32>(-2, i32::MAX, MustCheck),
            Err(RowFault::Overflow)
        );
    }

    #[test]
    fn we_can_try_multiply_in_a_wider_type() {
        assert_eq!(try_mul::<i32, i32, i64>(2_000_000_000, 2, NeverOverflows), Ok(4_000_000_000));
        assert_eq!(try_mul::<i8, i8, i8>(-16, 7, UseWiderType), Ok(-112));
        assert_eq!(try_mul::<i64, i64, i64>(i64::MAX, -1, UseWiderType), Ok(-i64::MAX));
        assert_eq!(try_mul::<i8, i8, i8>(16, 8, UseWiderType), Err(RowFault::Overflow));
        assert_eq!(
            try_mul::<i64, i64, i64>(1 << 32, 1 << 31, UseWiderType),
            Err(RowFault::Overflow)
        );
    }

    #[test]
    fn we_can_try_multiply_the_widest_integers() {
        assert_eq!(try_mul::<i128, i128, i128>(-(1 << 100), 4, ManualSplit), Ok(-(1 << 102)));
        assert_eq!(try_mul::<i8, i128, i128>(2, 1 << 125, ManualSplit), Ok(1 << 126));
        assert_eq!(
            try_mul::<i128, i8, i128>(1 << 126, 2, ManualSplit),
            Err(RowFault::Overflow)
        );
        assert_eq!(
            try_mul::<i128, i128, i128>(1 << 64, 1 << 64, ManualSplit),
            Err(RowFault::Overflow)
        );
    }

    #[test]
    fn we_can_try_multiply_floats() {
        assert_eq!(try_mul::<f32, f32, f32>(1.5, -2.0, MustCheck), Ok(-3.0));
        let max = <f64 as From<f32>>::from(f32::MAX);
        assert_eq!(
            try_mul::<f32, f32, f64>(f32::MAX, f32::MAX, NeverOverflows),
            Ok(max * max)
        );
        assert_eq!(try_mul::<f32, f32, f32>(f32::MAX, 2.0, MustCheck), Err(RowFault::Overflow));
        assert_eq!(try_mul::<i64, i64, f32>(1 << 40, 1 << 40, NeverOverflows), Ok(2f32.powi(80)));
    }

    #[test]
    fn we_can_try_multiply_an_integer_by_a_float_into_an_integer() {
        assert_eq!(try_mul::<i32, f64, i32>(3, 0.5, MustCheck), Ok(2));
        assert_eq!(try_mul::<i32, f64, i32>(-3, 0.5, MustCheck), Ok(-2));
        assert_eq!(try_mul::<i16, f32, i8>(10, 1.24, MustCheck), Ok(12));
        assert_eq!(try_mul::<i64, f64, i8>(0, f64::MAX, MustCheck), Ok(0));
        assert_eq!(try_mul::<i64, f64, i8>(i64::MAX, 0.0, MustCheck), Ok(0));
        assert_eq!(try_mul::<i8, f64, i8>(100, 1.5, MustCheck), Err(RowFault::Overflow));
        assert_eq!(try_mul::<i8, f64, i8>(127, -1.0, MustCheck), Ok(-127));
    }

    #[test]
    fn integral_float_factors_multiply_exactly() {
        assert_eq!(try_mul::<i64, f64, i64>(i64::MAX, 1.0, MustCheck), Ok(i64::MAX));
        assert_eq!(try_mul::<i64, f32, i64>(i64::MAX, -1.0, MustCheck), Ok(-i64::MAX));
        assert_eq!(
            try_mul::<i64, f64, i64>(9_007_199_254_740_993, 3.0, MustCheck),
            Ok(27_021_597_764_222_979)
        );
        assert_eq!(
            try_mul::<i64, f64, i128>(1 << 62, 1e15, MustCheck),
            Ok((1_i128 << 62) * 1_000_000_000_000_000)
        );
        assert_eq!(
            try_mul::<i64, f64, i64>(i64::MAX, 2.0, MustCheck),
            Err(RowFault::Overflow)
        );
        assert_eq!(
            try_mul::<i64, f64, i64>(1 << 62, 2.5, MustCheck),
            Err(RowFault::Overflow)
        );
    }

    #[test]
    fn we_can_try_divide_integers() {
        assert_eq!(try_div::<i32, i32, i32>(7, 2), Ok(3));
        assert_eq!(try_div::<i32, i32, i32>(-7, 2), Ok(-3));
        assert_eq!(try_div::<i64, i8, i8>(-254, -2), Ok(127));
        assert_eq!(try_div::<i8, i8, f64>(7, 2), Ok(3.0));
        assert_eq!(try_div::<i128, i128, i128>(-i128::MAX, -1), Ok(i128::MAX));
    }

    #[test]
    fn we_cannot_try_divide_into_a_narrower_type_if_overflow() {
        assert_eq!(try_div::<i64, i8, i8>(256, 2), Err(RowFault::Overflow));
        assert_eq!(try_div::<i16, i16, i8>(-i16::MAX, 1), Err(RowFault::Overflow));
    }

    #[test]
    fn we_cannot_try_divide_by_zero() {
        assert_eq!(try_div::<i32, i32, i32>(10, 0), Err(RowFault::DivisionByZero));
        assert_eq!(try_div::<f64, f64, f64>(1.0, -0.0), Err(RowFault::DivisionByZero));
        assert_eq!(try_div::<i32, f32, i32>(1, 0.0), Err(RowFault::DivisionByZero));
        assert_eq!(try_mod::<i8, i8, i8>(5, 0), Err(RowFault::DivisionByZero));
        assert_eq!(try_mod::<f32, f32, f32>(5.0, 0.0), Err(RowFault::DivisionByZero));
    }

    #[test]
    fn we_can_try_divide_with_floats() {
        assert_eq!(try_div::<f64, f64, f64>(1.0, 4.0), Ok(0.25));
        assert_eq!(try_div::<i32, f32, f32>(3, 2.0), Ok(1.5));
        assert_eq!(
            try_div::<f32, f32, f32>(f32::MAX, 0.5),
            Err(RowFault::Overflow)
        );
        assert_eq!(try_div::<f64, f64, f64>(f64::MAX, 2.0), Ok(f64::MAX / 2.0));
    }

    #[test]
    fn we_can_try_divide_an_integer_by_a_float_into_an_integer() {
        assert_eq!(try_div::<i32, f64, i32>(7, 2.0), Ok(4));
        assert_eq!(try_div::<i32, f64, i32>(-7, 2.0), Ok(-4));
        assert_eq!(try_div::<i32, f64, i32>(0, 1e-300), Ok(0));
        assert_eq!(try_div::<i8, f64, i8>(100, 0.5), Err(RowFault::Overflow));
        assert_eq!(try_div::<i8, f64, i8>(60, 0.5), Ok(120));
    }

    #[test]
    fn we_can_try_modulo() {
        assert_eq!(try_mod::<i32, i32, i32>(7, 3), Ok(1));
        assert_eq!(try_mod::<i32, i32, i32>(-7, 3), Ok(-1));
        assert_eq!(try_mod::<i32, i32, i32>(7, -3), Ok(1));
        assert_eq!(try_mod::<i64, i8, i8>(1_000_003, 10), Ok(3));
        assert_eq!(try_mod::<f64, f64, f64>(7.5, 2.0), Ok(1.5));
        assert_eq!(try_mod::<f64, f64, f64>(-7.5, 2.0), Ok(-1.5));
        assert_eq!(try_mod::<i32, i32, f64>(7, 4), Ok(3.0));
    }

    #[test]
    fn integer_remainders_into_floats_are_taken_before_converting() {
        assert_eq!(try_mod::<i64, i64, f64>(9_007_199_254_740_993, 2), Ok(1.0));
        assert_eq!(try_mod::<i128, i128, f32>(i128::MAX, 10), Ok(7.0));
        assert_eq!(try_mod::<i64, i8, f32>(-(1 << 60) - 3, 4), Ok(-3.0));
    }
}

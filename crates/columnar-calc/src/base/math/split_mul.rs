//! Overflow-checked multiplication of the widest integers.
const LOW_LIMB: u128 = u128::MAX >> 64;

/// Multiplies two `i128`s using only 128-bit arithmetic, returning `None` if the
/// magnitude of the product exceeds `max`.
///
/// Each magnitude is split into 64-bit limbs. At most one operand may have a non-zero
/// high limb, the cross product must fit below bit 63 so that it can be shifted into
/// the high limb, and the assembled magnitude must leave bit 127 clear.
#[must_use]
pub fn checked_split_mul(lhs: i128, rhs: i128, max: i128) -> Option<i128> {
    let negative = (lhs < 0) != (rhs < 0);
    let (a, b) = (lhs.unsigned_abs(), rhs.unsigned_abs());
    let (a_hi, a_lo) = (a >> 64, a & LOW_LIMB);
    let (b_hi, b_lo) = (b >> 64, b & LOW_LIMB);
    if a_hi != 0 && b_hi != 0 {
        return None;
    }
    let cross = a_hi * b_lo + a_lo * b_hi;
    if cross >> 63 != 0 {
        return None;
    }
    let magnitude = (cross << 64).checked_add(a_lo * b_lo)?;
    let magnitude = i128::try_from(magnitude).ok()?;
    if magnitude > max {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}

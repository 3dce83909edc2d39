use super::{PromotionOutcome, PROMOTION_TABLE};
use crate::base::database::{
    ArithmeticOperator::{self, Add, Div, Mod, Mul, Sub},
    ColumnOperationError,
    ColumnType::{self, BigInt, Double, Int, Int128, Real, SmallInt, TinyInt},
};

fn outcome(
    op: ArithmeticOperator,
    lhs: ColumnType,
    rhs: ColumnType,
    result: ColumnType,
) -> PromotionOutcome {
    PROMOTION_TABLE.outcome(op, lhs, rhs, result).unwrap()
}

#[test]
fn additions_into_a_wider_integer_never_overflow() {
    assert_eq!(outcome(Add, TinyInt, TinyInt, SmallInt), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Sub, Int, SmallInt, BigInt), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Add, BigInt, BigInt, Int128), PromotionOutcome::NeverOverflows);
}

#[test]
fn additions_into_the_widest_operand_width_must_check() {
    assert_eq!(outcome(Add, TinyInt, TinyInt, TinyInt), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Sub, TinyInt, BigInt, BigInt), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Add, Int128, Int128, Int128), PromotionOutcome::MustCheck);
}

#[test]
fn float_additions_must_check_unless_the_result_is_wider() {
    assert_eq!(outcome(Add, Real, Real, Real), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Add, Double, TinyInt, Double), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Add, Real, Real, Double), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Add, BigInt, BigInt, Real), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Add, Int128, Int128, Real), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Add, Int128, Int128, Double), PromotionOutcome::NeverOverflows);
}

#[test]
fn integer_multiplications_choose_widening_or_split() {
    assert_eq!(outcome(Mul, Int, Int, BigInt), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Mul, TinyInt, TinyInt, SmallInt), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Mul, BigInt, BigInt, Int128), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Mul, TinyInt, TinyInt, TinyInt), PromotionOutcome::UseWiderType);
    assert_eq!(outcome(Mul, Int, BigInt, BigInt), PromotionOutcome::UseWiderType);
    assert_eq!(outcome(Mul, BigInt, BigInt, BigInt), PromotionOutcome::UseWiderType);
    assert_eq!(outcome(Mul, Int128, Int128, Int128), PromotionOutcome::ManualSplit);
    assert_eq!(outcome(Mul, TinyInt, Int128, Int128), PromotionOutcome::ManualSplit);
}

#[test]
fn float_multiplications_check_unless_the_product_fits() {
    assert_eq!(outcome(Mul, Real, Real, Real), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Mul, Real, Real, Double), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Mul, BigInt, BigInt, Real), PromotionOutcome::NeverOverflows);
    assert_eq!(outcome(Mul, Int128, SmallInt, Real), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Mul, Int, Real, Int), PromotionOutcome::MustCheck);
}

#[test]
fn division_and_modulo_always_check() {
    for result in [TinyInt, BigInt, Double] {
        assert_eq!(outcome(Div, Int, Int, result), PromotionOutcome::MustCheck);
    }
    assert_eq!(outcome(Mod, Int128, Int128, Int128), PromotionOutcome::MustCheck);
    assert_eq!(outcome(Mod, Double, Double, Double), PromotionOutcome::MustCheck);
}

#[test]
fn we_cannot_narrow_additive_or_multiplicative_results() {
    assert!(!PROMOTION_TABLE.supports(Add, SmallInt, TinyInt, TinyInt));
    assert!(!PROMOTION_TABLE.supports(Sub, Int128, Int, BigInt));
    assert!(!PROMOTION_TABLE.supports(Mul, BigInt, TinyInt, Int));
    assert!(PROMOTION_TABLE.supports(Mul, TinyInt, SmallInt, SmallInt));
}

#[test]
fn we_cannot_produce_a_float_narrower_than_a_float_operand() {
    for op in ArithmeticOperator::ALL {
        assert!(!PROMOTION_TABLE.supports(op, Double, Real, Real));
        assert!(!PROMOTION_TABLE.supports(op, TinyInt, Double, Real));
        assert!(PROMOTION_TABLE.supports(op, Real, TinyInt, Double));
    }
}

#[test]
fn float_operands_only_reach_integers_through_rounding_kernels() {
    assert!(!PROMOTION_TABLE.supports(Add, Int, Real, Int));
    assert!(PROMOTION_TABLE.supports(Mul, Int, Real, TinyInt));
    assert!(!PROMOTION_TABLE.supports(Mul, Real, Int, Int));
    assert!(PROMOTION_TABLE.supports(Div, BigInt, Double, SmallInt));
    assert!(!PROMOTION_TABLE.supports(Div, Double, Int, Int));
    assert!(!PROMOTION_TABLE.supports(Mod, Int, Double, Int));
}

#[test]
fn integer_division_supports_every_integer_result_width() {
    for result in [TinyInt, SmallInt, Int, BigInt, Int128] {
        assert!(PROMOTION_TABLE.supports(Div, Int128, BigInt, result));
    }
}

#[test]
fn integer_modulo_fits_the_narrower_operand() {
    assert!(PROMOTION_TABLE.supports(Mod, BigInt, TinyInt, TinyInt));
    assert!(PROMOTION_TABLE.supports(Mod, TinyInt, Int128, TinyInt));
    assert!(!PROMOTION_TABLE.supports(Mod, SmallInt, Int, TinyInt));
}

#[test]
fn unsupported_combinations_are_reported_with_all_types() {
    assert_eq!(
        PROMOTION_TABLE.outcome(Add, Double, Int, SmallInt),
        Err(ColumnOperationError::UnsupportedTypeCombination {
            operator: Add,
            left_type: Double,
            right_type: Int,
            result_type: SmallInt,
        })
    );
}

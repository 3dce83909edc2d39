//! Which operand and result widths an operator supports, and how each supported
//! combination guards against overflow.
//!
//! The policy is evaluated once per combination at compile time into
//! [`PROMOTION_TABLE`]; drivers only look entries up.
use crate::base::database::{
    ArithmeticOperator, ColumnOperationError, ColumnOperationResult, ColumnType,
};

/// How a kernel guards against overflow for one combination of widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionOutcome {
    /// The result width holds every possible result; compute without checks.
    NeverOverflows,
    /// Check every element at run time.
    MustCheck,
    /// Multiply in `i128`, which holds every product, then range-check the result.
    UseWiderType,
    /// Multiply with a 64-bit limb decomposition since no wider type exists.
    ManualSplit,
}

const OPERATORS: usize = ArithmeticOperator::ALL.len();
const TYPES: usize = ColumnType::ALL.len();

type Outcomes = [[[[Option<PromotionOutcome>; TYPES]; TYPES]; TYPES]; OPERATORS];

/// Promotion outcomes for every supported `(operator, lhs, rhs, result)` combination.
pub struct PromotionTable {
    outcomes: Outcomes,
}

/// The promotion table, computed at compile time.
pub static PROMOTION_TABLE: PromotionTable = PromotionTable::build();

impl PromotionTable {
    const fn build() -> Self {
        let mut outcomes: Outcomes = [[[[None; TYPES]; TYPES]; TYPES]; OPERATORS];
        let mut op = 0;
        while op < OPERATORS {
            let mut lhs = 0;
            while lhs < TYPES {
                let mut rhs = 0;
                while rhs < TYPES {
                    let mut result = 0;
                    while result < TYPES {
                        outcomes[op][lhs][rhs][result] = promotion_outcome(
                            ArithmeticOperator::ALL[op],
                            ColumnType::ALL[lhs],
                            ColumnType::ALL[rhs],
                            ColumnType::ALL[result],
                        );
                        result += 1;
                    }
                    rhs += 1;
                }
                lhs += 1;
            }
            op += 1;
        }
        Self { outcomes }
    }

    /// Looks up the outcome of a combination.
    ///
    /// # Errors
    /// Returns [`ColumnOperationError::UnsupportedTypeCombination`] if no kernel exists for it.
    pub fn outcome(
        &self,
        operator: ArithmeticOperator,
        left_type: ColumnType,
        right_type: ColumnType,
        result_type: ColumnType,
    ) -> ColumnOperationResult<PromotionOutcome> {
        self.outcomes[operator.index()][left_type.index()][right_type.index()][result_type.index()]
            .ok_or(ColumnOperationError::UnsupportedTypeCombination {
                operator,
                left_type,
                right_type,
                result_type,
            })
    }

    /// Returns true if a kernel exists for the combination.
    #[must_use]
    pub fn supports(
        &self,
        operator: ArithmeticOperator,
        left_type: ColumnType,
        right_type: ColumnType,
        result_type: ColumnType,
    ) -> bool {
        self.outcome(operator, left_type, right_type, result_type).is_ok()
    }
}

const fn max(a: u32, b: u32) -> u32 {
    if a > b {
        a
    } else {
        b
    }
}

const fn min(a: u32, b: u32) -> u32 {
    if a < b {
        a
    } else {
        b
    }
}

/// A float result may not be narrower than a float operand.
const fn float_result_supported(lhs: ColumnType, rhs: ColumnType, result: ColumnType) -> bool {
    result.is_float()
        && lhs.float_rank() <= result.float_rank()
        && rhs.float_rank() <= result.float_rank()
}

const fn integer_operands(lhs: ColumnType, rhs: ColumnType) -> bool {
    lhs.is_integer() && rhs.is_integer()
}

const fn is_supported(
    op: ArithmeticOperator,
    lhs: ColumnType,
    rhs: ColumnType,
    result: ColumnType,
) -> bool {
    if result.is_float() {
        return float_result_supported(lhs, rhs, result);
    }
    let widest = max(lhs.bit_size(), rhs.bit_size());
    match op {
        ArithmeticOperator::Add | ArithmeticOperator::Sub => {
            integer_operands(lhs, rhs) && result.bit_size() >= widest
        }
        ArithmeticOperator::Mul => {
            (integer_operands(lhs, rhs) && result.bit_size() >= widest)
                || (lhs.is_integer() && rhs.is_float())
        }
        ArithmeticOperator::Div => lhs.is_integer(),
        ArithmeticOperator::Mod => {
            integer_operands(lhs, rhs)
                && result.bit_size() >= min(lhs.bit_size(), rhs.bit_size())
        }
    }
}

/// `|lhs| + |rhs|` never exceeds the result's maximum.
const fn sum_fits(lhs: ColumnType, rhs: ColumnType, result: ColumnType) -> bool {
    max(lhs.magnitude_bits(), rhs.magnitude_bits()) + 1 <= result.guaranteed_bits()
}

/// `|lhs| * |rhs|` never exceeds the result's maximum.
const fn product_fits(lhs: ColumnType, rhs: ColumnType, result: ColumnType) -> bool {
    lhs.magnitude_bits() + rhs.magnitude_bits() <= result.guaranteed_bits()
}

/// Decides the outcome of one combination, or `None` if it is unsupported.
#[must_use]
pub const fn promotion_outcome(
    op: ArithmeticOperator,
    lhs: ColumnType,
    rhs: ColumnType,
    result: ColumnType,
) -> Option<PromotionOutcome> {
    if !is_supported(op, lhs, rhs, result) {
        return None;
    }
    let outcome = match op {
        ArithmeticOperator::Add | ArithmeticOperator::Sub => {
            if sum_fits(lhs, rhs, result) {
                PromotionOutcome::NeverOverflows
            } else {
                PromotionOutcome::MustCheck
            }
        }
        ArithmeticOperator::Mul => {
            if result.is_integer() && !integer_operands(lhs, rhs) {
                PromotionOutcome::MustCheck
            } else if result.is_integer()
                && (matches!(lhs, ColumnType::Int128) || matches!(rhs, ColumnType::Int128))
            {
                PromotionOutcome::ManualSplit
            } else if product_fits(lhs, rhs, result) {
                PromotionOutcome::NeverOverflows
            } else if result.is_integer() {
                PromotionOutcome::UseWiderType
            } else {
                PromotionOutcome::MustCheck
            }
        }
        ArithmeticOperator::Div | ArithmeticOperator::Mod => PromotionOutcome::MustCheck,
    };
    Some(outcome)
}

//! Order and nil flags of an operator's output, derived from its inputs and the pass counters.
use crate::base::database::{ArithmeticOperator, ColumnProperties, LiteralValue};
use core::cmp::Ordering;

/// Counters of one pass over the selected rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PassSummary {
    /// Rows written
    pub count: usize,
    /// Nil rows written
    pub nils: usize,
    /// Rows that became nil because of an overflow or a zero denominator
    pub faults: usize,
}

impl PassSummary {
    /// A pass that cannot break any order.
    fn is_trivial(&self) -> bool {
        self.count <= 1 || self.nils == self.count
    }

    fn is_clean(&self) -> bool {
        self.nils == 0
    }

    fn flags(&self, sorted: bool, reverse_sorted: bool) -> ColumnProperties {
        let trivial = self.is_trivial();
        ColumnProperties {
            sorted: sorted || trivial,
            reverse_sorted: reverse_sorted || trivial,
            key: self.count <= 1,
            has_nil: false,
            no_nil: false,
        }
        .with_nil_count(self.nils)
    }
}

/// What the derivation needs to know about one side of an operator.
#[derive(Debug, Clone, Copy)]
pub(crate) enum OperandShape {
    Column(ColumnProperties),
    Scalar(LiteralValue),
}

/// Flags of `lhs op rhs` over the pass described by `summary`.
pub(crate) fn derive_properties(
    operator: ArithmeticOperator,
    lhs: OperandShape,
    rhs: OperandShape,
    summary: &PassSummary,
) -> ColumnProperties {
    use ArithmeticOperator::{Add, Mul, Sub};
    use OperandShape::{Column, Scalar};
    let clean = summary.is_clean();
    let (sorted, reverse_sorted) = match (operator, lhs, rhs) {
        (Add, Column(l), Column(r)) => (
            l.sorted && r.sorted,
            l.reverse_sorted && r.reverse_sorted,
        ),
        (Add | Sub, Column(column), Scalar(_)) | (Add, Scalar(_), Column(column)) => {
            (column.sorted, column.reverse_sorted)
        }
        (Sub, Scalar(_), Column(column)) => (column.reverse_sorted, column.sorted),
        (Sub, Column(l), Column(r)) => (
            l.sorted && r.reverse_sorted,
            l.reverse_sorted && r.sorted,
        ),
        (Mul, Column(column), Scalar(constant)) | (Mul, Scalar(constant), Column(column)) => {
            match constant.signum() {
                Some(Ordering::Greater) => (column.sorted, column.reverse_sorted),
                Some(Ordering::Less) => (column.reverse_sorted, column.sorted),
                Some(Ordering::Equal) => (true, true),
                None => (false, false),
            }
        }
        _ => (false, false),
    };
    summary.flags(sorted && clean, reverse_sorted && clean)
}

/// Flags of a column after adding or subtracting one.
///
/// Nil rows stay nil, so only rows that became nil can break the input's order.
pub(crate) fn derive_step_properties(
    input: ColumnProperties,
    summary: &PassSummary,
) -> ColumnProperties {
    let unbroken = summary.faults == 0;
    summary.flags(input.sorted && unbroken, input.reverse_sorted && unbroken)
}

#[cfg(test)]
mod test {
    use super::*;
    use ArithmeticOperator::{Add, Div, Mod, Mul, Sub};

    const ASCENDING: ColumnProperties = ColumnProperties {
        sorted: true,
        reverse_sorted: false,
        key: true,
        has_nil: false,
        no_nil: true,
    };

    const DESCENDING: ColumnProperties = ColumnProperties {
        sorted: false,
        reverse_sorted: true,
        key: true,
        has_nil: false,
        no_nil: true,
    };

    fn clean(count: usize) -> PassSummary {
        PassSummary {
            count,
            nils: 0,
            faults: 0,
        }
    }

    fn order(properties: ColumnProperties) -> (bool, bool) {
        (properties.sorted, properties.reverse_sorted)
    }

    #[test]
    fn adding_two_ascending_columns_is_ascending() {
        let properties = derive_properties(
            Add,
            OperandShape::Column(ASCENDING),
            OperandShape::Column(ASCENDING),
            &clean(4),
        );
        assert_eq!(order(properties), (true, false));
        assert!(!properties.key);
        assert!(properties.no_nil);
        assert!(!properties.has_nil);
    }

    #[test]
    fn adding_columns_of_opposite_order_has_no_order() {
        let properties = derive_properties(
            Add,
            OperandShape::Column(ASCENDING),
            OperandShape::Column(DESCENDING),
            &clean(4),
        );
        assert_eq!(order(properties), (false, false));
    }

    #[test]
    fn subtracting_a_descending_column_from_an_ascending_one_is_ascending() {
        let properties = derive_properties(
            Sub,
            OperandShape::Column(ASCENDING),
            OperandShape::Column(DESCENDING),
            &clean(4),
        );
        assert_eq!(order(properties), (true, false));
        let properties = derive_properties(
            Sub,
            OperandShape::Column(DESCENDING),
            OperandShape::Column(ASCENDING),
            &clean(4),
        );
        assert_eq!(order(properties), (false, true));
    }

    #[test]
    fn subtracting_a_column_from_a_constant_flips_its_order() {
        let constant = OperandShape::Scalar(LiteralValue::Int(10));
        let properties =
            derive_properties(Sub, constant, OperandShape::Column(ASCENDING), &clean(3));
        assert_eq!(order(properties), (false, true));
        let properties =
            derive_properties(Sub, OperandShape::Column(ASCENDING), constant, &clean(3));
        assert_eq!(order(properties), (true, false));
        let properties =
            derive_properties(Add, constant, OperandShape::Column(DESCENDING), &clean(3));
        assert_eq!(order(properties), (false, true));
    }

    #[test]
    fn multiplying_by_a_constant_follows_its_sign() {
        let column = OperandShape::Column(ASCENDING);
        let positive = OperandShape::Scalar(LiteralValue::Double(0.5));
        let negative = OperandShape::Scalar(LiteralValue::TinyInt(-2));
        let zero = OperandShape::Scalar(LiteralValue::BigInt(0));
        assert_eq!(
            order(derive_properties(Mul, column, positive, &clean(3))),
            (true, false)
        );
        assert_eq!(
            order(derive_properties(Mul, negative, column, &clean(3))),
            (false, true)
        );
        assert_eq!(
            order(derive_properties(Mul, column, zero, &clean(3))),
            (true, true)
        );
    }

    #[test]
    fn nils_in_the_output_drop_the_order() {
        let summary = PassSummary {
            count: 3,
            nils: 1,
            faults: 1,
        };
        let properties = derive_properties(
            Add,
            OperandShape::Column(ASCENDING),
            OperandShape::Scalar(LiteralValue::Int(1)),
            &summary,
        );
        assert_eq!(order(properties), (false, false));
        assert!(properties.has_nil);
        assert!(!properties.no_nil);
    }

    #[test]
    fn division_and_modulo_are_only_trivially_ordered() {
        for operator in [Div, Mod, Mul] {
            let properties = derive_properties(
                operator,
                OperandShape::Column(ASCENDING),
                OperandShape::Column(ASCENDING),
                &clean(5),
            );
            assert_eq!(order(properties), (false, false));
        }
        let properties = derive_properties(
            Div,
            OperandShape::Column(ASCENDING),
            OperandShape::Column(ASCENDING),
            &clean(1),
        );
        assert_eq!(order(properties), (true, true));
        assert!(properties.key);
    }

    #[test]
    fn an_all_nil_output_is_trivially_ordered() {
        let summary = PassSummary {
            count: 4,
            nils: 4,
            faults: 0,
        };
        let properties = derive_properties(
            Mod,
            OperandShape::Column(DESCENDING),
            OperandShape::Column(ASCENDING),
            &summary,
        );
        assert_eq!(order(properties), (true, true));
        assert!(!properties.key);
        assert!(properties.has_nil);
    }

    #[test]
    fn a_step_keeps_order_unless_a_row_overflows() {
        let with_input_nils = PassSummary {
            count: 4,
            nils: 2,
            faults: 0,
        };
        let properties = derive_step_properties(ASCENDING, &with_input_nils);
        assert_eq!(order(properties), (true, false));
        assert!(properties.has_nil);
        let with_overflow = PassSummary {
            count: 4,
            nils: 1,
            faults: 1,
        };
        assert_eq!(
            order(derive_step_properties(DESCENDING, &with_overflow)),
            (false, false)
        );
    }
}

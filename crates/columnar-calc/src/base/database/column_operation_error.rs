use super::{ArithmeticOperator, ColumnType};
use alloc::string::String;
use snafu::Snafu;

/// Errors from operations on columns.
#[derive(Snafu, Debug, PartialEq, Eq)]
pub enum ColumnOperationError {
    /// No kernel exists for the requested operand and result types
    #[snafu(display(
        "{operator} is not supported for {left_type} and {right_type} into {result_type}"
    ))]
    UnsupportedTypeCombination {
        /// Operator
        operator: ArithmeticOperator,
        /// Type of the left operand
        left_type: ColumnType,
        /// Type of the right operand
        right_type: ColumnType,
        /// Requested result type
        result_type: ColumnType,
    },

    /// Division by zero
    #[snafu(display("Division by zero"))]
    DivisionByZero,

    /// A result that does not fit the result type
    #[snafu(display("Overflow in arithmetic operation: {error}"))]
    Overflow {
        /// The operation that overflowed
        error: String,
    },

    /// The two selections of a column-column operation do not line up
    #[snafu(display(
        "Selections do not line up: {left_count} rows from row {left_first_row} != {right_count} rows from row {right_first_row}"
    ))]
    SizeMismatch {
        /// Number of rows selected on the left
        left_count: usize,
        /// Number of rows selected on the right
        right_count: usize,
        /// First row id selected on the left
        left_first_row: u64,
        /// First row id selected on the right
        right_first_row: u64,
    },

    /// The query deadline passed during the operation
    #[snafu(display("Query timed out after {elapsed_ms} ms"))]
    Timeout {
        /// Time since the query started
        elapsed_ms: u64,
    },

    /// A selection row list that is not strictly increasing
    #[snafu(display("Selection row ids must be strictly increasing; violated at position {position}"))]
    UnsortedSelection {
        /// Position in the row list of the first out-of-order id
        position: usize,
    },
}

/// Result type for column operations
pub type ColumnOperationResult<T> = core::result::Result<T, ColumnOperationError>;

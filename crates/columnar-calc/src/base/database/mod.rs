//! This module contains the numeric column model the arithmetic drivers read and write.
mod arithmetic_operator;
pub use arithmetic_operator::ArithmeticOperator;

mod column;
pub use column::{ColumnProperties, ColumnType};

mod column_operation_error;
pub use column_operation_error::{ColumnOperationError, ColumnOperationResult};

mod literal_value;
pub use literal_value::LiteralValue;

mod native;
pub use native::NativeNumeric;

mod owned_column;
pub use owned_column::{NumericColumn, OwnedColumn};

pub mod owned_column_utility;

mod selection;
pub use selection::{Selection, SelectionIter};

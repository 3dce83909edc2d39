//! This module contains the arithmetic operators over numeric columns and scalars.
pub use crate::base::database::ArithmeticOperator;

mod config;
pub use config::{ArithmeticConfig, ErrorMode};

mod deadline;
pub use deadline::QueryContext;

mod driver;
pub use driver::{
    binary_op, decrement, decrement_value, increment, increment_value, scalar_op,
    ArithmeticResult,
};

mod kernel;

mod operand;
pub use operand::Operand;

mod promotion;
pub use promotion::{promotion_outcome, PromotionOutcome, PromotionTable, PROMOTION_TABLE};
#[cfg(test)]
mod promotion_test;

mod properties;

//! Entry points of the arithmetic operators.
//!
//! Every call resolves its operands into typed sources, looks up the promotion outcome of the
//! width combination, and runs one monomorphized loop over the selected rows.
use super::{
    kernel::{try_add, try_div, try_mod, try_mul, try_sub, RowFault, RowResult},
    operand::{AnySource, OperandSource, RowSpan},
    properties::{derive_properties, derive_step_properties, OperandShape, PassSummary},
    ErrorMode, Operand, PromotionOutcome, QueryContext, PROMOTION_TABLE,
};
use crate::base::database::{
    ArithmeticOperator, ColumnOperationError, ColumnOperationResult, ColumnType, LiteralValue,
    NativeNumeric, NumericColumn, OwnedColumn, Selection,
};
use alloc::{format, vec::Vec};
use num_traits::AsPrimitive;

/// Rows processed between two deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 1 << 14;

/// The output of an arithmetic operator over columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ArithmeticResult {
    /// The result column, one value per selected row
    pub column: NumericColumn,
    /// Number of nil values in `column`
    pub nil_count: usize,
}

/// Settings shared by every row of one loop.
struct LoopParams<'c> {
    operator: ArithmeticOperator,
    count: usize,
    dense: bool,
    mode: ErrorMode,
    context: &'c QueryContext,
}

fn fault_error<L: NativeNumeric, R: NativeNumeric>(
    fault: RowFault,
    lhs: L,
    rhs: R,
    operator: ArithmeticOperator,
) -> ColumnOperationError {
    match fault {
        RowFault::DivisionByZero => ColumnOperationError::DivisionByZero,
        RowFault::Overflow => ColumnOperationError::Overflow {
            error: format!("{lhs} {operator} {rhs}"),
        },
    }
}

/// Applies `kernel` to every pair of values the sources yield.
fn run_loop<L, R, O>(
    mut lhs: OperandSource<'_, L>,
    mut rhs: OperandSource<'_, R>,
    params: &LoopParams<'_>,
    kernel: impl Fn(L, R) -> RowResult<O>,
) -> ColumnOperationResult<(Vec<O>, PassSummary)>
where
    L: NativeNumeric,
    R: NativeNumeric,
    O: NativeNumeric,
{
    let mut values = Vec::with_capacity(params.count);
    let mut summary = PassSummary::default();
    let mut start = 0;
    while start < params.count {
        if start > 0 {
            params.context.check()?;
        }
        let end = params.count.min(start + DEADLINE_CHECK_INTERVAL);
        for _ in start..end {
            let (Some(l), Some(r)) = (lhs.fetch(params.dense), rhs.fetch(params.dense)) else {
                break;
            };
            let value = if l.is_nil() || r.is_nil() {
                O::NIL
            } else {
                // A NaN from non-nil operands, such as `inf - inf`, has no representation.
                let computed = kernel(l, r).and_then(|value| {
                    if value.is_nil() {
                        Err(RowFault::Overflow)
                    } else {
                        Ok(value)
                    }
                });
                match computed {
                    Ok(value) => value,
                    Err(fault) if params.mode.aborts() => {
                        return Err(fault_error(fault, l, r, params.operator));
                    }
                    Err(_) => {
                        summary.faults += 1;
                        O::NIL
                    }
                }
            };
            if value.is_nil() {
                summary.nils += 1;
            }
            values.push(value);
        }
        start = end;
    }
    summary.count = values.len();
    Ok((values, summary))
}

/// Runs `operator` for one combination of widths.
fn run_binary<L, R, O>(
    lhs: OperandSource<'_, L>,
    rhs: OperandSource<'_, R>,
    outcome: PromotionOutcome,
    params: &LoopParams<'_>,
) -> ColumnOperationResult<(OwnedColumn, PassSummary)>
where
    L: NativeNumeric + AsPrimitive<O>,
    R: NativeNumeric + AsPrimitive<O>,
    O: NativeNumeric,
    i128: AsPrimitive<O>,
{
    let (values, summary) = match params.operator {
        ArithmeticOperator::Add => {
            run_loop(lhs, rhs, params, |l, r| try_add::<L, R, O>(l, r, outcome))
        }
        ArithmeticOperator::Sub => {
            run_loop(lhs, rhs, params, |l, r| try_sub::<L, R, O>(l, r, outcome))
        }
        ArithmeticOperator::Mul => {
            run_loop(lhs, rhs, params, |l, r| try_mul::<L, R, O>(l, r, outcome))
        }
        ArithmeticOperator::Div => run_loop(lhs, rhs, params, try_div::<L, R, O>),
        ArithmeticOperator::Mod => run_loop(lhs, rhs, params, try_mod::<L, R, O>),
    }?;
    Ok((O::into_column(values), summary))
}

macro_rules! dispatch_result_type {
    ($lhs:expr, $rhs:expr, $outcome:expr, $result_type:expr, $params:expr) => {
        match $result_type {
            ColumnType::TinyInt => run_binary::<_, _, i8>($lhs, $rhs, $outcome, $params),
            ColumnType::SmallInt => run_binary::<_, _, i16>($lhs, $rhs, $outcome, $params),
            ColumnType::Int => run_binary::<_, _, i32>($lhs, $rhs, $outcome, $params),
            ColumnType::BigInt => run_binary::<_, _, i64>($lhs, $rhs, $outcome, $params),
            ColumnType::Int128 => run_binary::<_, _, i128>($lhs, $rhs, $outcome, $params),
            ColumnType::Real => run_binary::<_, _, f32>($lhs, $rhs, $outcome, $params),
            ColumnType::Double => run_binary::<_, _, f64>($lhs, $rhs, $outcome, $params),
        }
    };
}

macro_rules! dispatch_rhs {
    ($lhs:expr, $rhs:expr, $outcome:expr, $result_type:expr, $params:expr) => {
        match $rhs {
            AnySource::TinyInt(rhs) => {
                dispatch_result_type!($lhs, rhs, $outcome, $result_type, $params)
            }
            AnySource::SmallInt(rhs) => {
                dispatch_result_type!($lhs, rhs, $outcome, $result_type, $params)
            }
            AnySource::Int(rhs) => {
                dispatch_result_type!($lhs, rhs, $outcome, $result_type, $params)
            }
            AnySource::BigInt(rhs) => {
                dispatch_result_type!($lhs, rhs, $outcome, $result_type, $params)
            }
            AnySource::Int128(rhs) => {
                dispatch_result_type!($lhs, rhs, $outcome, $result_type, $params)
            }
            AnySource::Real(rhs) => {
                dispatch_result_type!($lhs, rhs, $outcome, $result_type, $params)
            }
            AnySource::Double(rhs) => {
                dispatch_result_type!($lhs, rhs, $outcome, $result_type, $params)
            }
        }
    };
}

/// Picks the loop for the widths of both sources and the result.
fn dispatch(
    lhs: AnySource<'_>,
    rhs: AnySource<'_>,
    outcome: PromotionOutcome,
    result_type: ColumnType,
    params: &LoopParams<'_>,
) -> ColumnOperationResult<(OwnedColumn, PassSummary)> {
    match lhs {
        AnySource::TinyInt(lhs) => dispatch_rhs!(lhs, rhs, outcome, result_type, params),
        AnySource::SmallInt(lhs) => dispatch_rhs!(lhs, rhs, outcome, result_type, params),
        AnySource::Int(lhs) => dispatch_rhs!(lhs, rhs, outcome, result_type, params),
        AnySource::BigInt(lhs) => dispatch_rhs!(lhs, rhs, outcome, result_type, params),
        AnySource::Int128(lhs) => dispatch_rhs!(lhs, rhs, outcome, result_type, params),
        AnySource::Real(lhs) => dispatch_rhs!(lhs, rhs, outcome, result_type, params),
        AnySource::Double(lhs) => dispatch_rhs!(lhs, rhs, outcome, result_type, params),
    }
}

/// The raw output of one pass, before flags are derived.
struct Evaluation {
    values: OwnedColumn,
    first_row: u64,
    summary: PassSummary,
}

/// Lines up the rows of both operands.
fn row_span(lhs: Option<RowSpan>, rhs: Option<RowSpan>) -> ColumnOperationResult<RowSpan> {
    match (lhs, rhs) {
        (Some(left), Some(right)) => {
            if left.count != right.count || left.first_row != right.first_row {
                return Err(ColumnOperationError::SizeMismatch {
                    left_count: left.count,
                    right_count: right.count,
                    left_first_row: left.first_row,
                    right_first_row: right.first_row,
                });
            }
            Ok(RowSpan {
                dense: left.dense && right.dense,
                ..left
            })
        }
        (Some(span), None) | (None, Some(span)) => Ok(span),
        (None, None) => Ok(RowSpan {
            count: 1,
            first_row: 0,
            dense: true,
        }),
    }
}

fn evaluate(
    operator: ArithmeticOperator,
    lhs: Operand<'_>,
    rhs: Operand<'_>,
    result_type: ColumnType,
    mode: ErrorMode,
    context: &QueryContext,
) -> ColumnOperationResult<Evaluation> {
    let outcome =
        PROMOTION_TABLE.outcome(operator, lhs.column_type(), rhs.column_type(), result_type)?;
    tracing::trace!(
        %operator,
        left_type = %lhs.column_type(),
        right_type = %rhs.column_type(),
        %result_type,
        ?outcome,
        "promotion outcome"
    );
    let (lhs, lhs_span) = AnySource::new(lhs)?;
    let (rhs, rhs_span) = AnySource::new(rhs)?;
    let span = row_span(lhs_span, rhs_span)?;
    let params = LoopParams {
        operator,
        count: span.count,
        dense: span.dense,
        mode,
        context,
    };
    let (values, summary) = dispatch(lhs, rhs, outcome, result_type, &params)?;
    tracing::debug!(
        rows = summary.count,
        nils = summary.nils,
        faults = summary.faults,
        "arithmetic pass finished"
    );
    Ok(Evaluation {
        values,
        first_row: span.first_row,
        summary,
    })
}

fn shape(operand: &Operand<'_>) -> OperandShape {
    match operand {
        Operand::Column { column, .. } => OperandShape::Column(*column.properties()),
        Operand::Scalar(value) => OperandShape::Scalar(*value),
    }
}

/// Computes `lhs operator rhs` for every selected row into a column of `result_type`.
///
/// Two column operands must select the same number of rows starting at the same row id. A
/// scalar operand is repeated for every row of the other side; two scalars give one row.
///
/// A row is nil if either operand is nil. In [`ErrorMode::Nil`] a row whose result does not
/// fit `result_type`, or whose denominator is zero, is nil as well.
///
/// # Errors
/// - [`ColumnOperationError::UnsupportedTypeCombination`] if no kernel exists for the widths.
/// - [`ColumnOperationError::SizeMismatch`] if two column selections do not line up.
/// - [`ColumnOperationError::UnsortedSelection`] if a row list is not strictly increasing.
/// - [`ColumnOperationError::Overflow`] or [`ColumnOperationError::DivisionByZero`] in
///   [`ErrorMode::Abort`].
/// - [`ColumnOperationError::Timeout`] if the query deadline passes.
#[tracing::instrument(name = "calc::binary_op", level = "debug", skip_all)]
pub fn binary_op(
    operator: ArithmeticOperator,
    lhs: Operand<'_>,
    rhs: Operand<'_>,
    result_type: ColumnType,
    mode: ErrorMode,
    context: &QueryContext,
) -> ColumnOperationResult<ArithmeticResult> {
    let evaluation = evaluate(operator, lhs, rhs, result_type, mode, context)?;
    let properties = derive_properties(operator, shape(&lhs), shape(&rhs), &evaluation.summary);
    Ok(ArithmeticResult {
        column: NumericColumn::new(evaluation.values, properties, evaluation.first_row),
        nil_count: evaluation.summary.nils,
    })
}

fn step(
    operator: ArithmeticOperator,
    column: &NumericColumn,
    selection: Option<&Selection>,
    mode: ErrorMode,
    context: &QueryContext,
) -> ColumnOperationResult<ArithmeticResult> {
    let evaluation = evaluate(
        operator,
        Operand::Column { column, selection },
        Operand::scalar(1i8),
        column.column_type(),
        mode,
        context,
    )?;
    let properties = derive_step_properties(*column.properties(), &evaluation.summary);
    Ok(ArithmeticResult {
        column: NumericColumn::new(evaluation.values, properties, evaluation.first_row),
        nil_count: evaluation.summary.nils,
    })
}

/// Adds one to every selected row, keeping the column's type.
///
/// # Errors
/// See [`binary_op`]. Incrementing the largest value overflows.
#[tracing::instrument(name = "calc::increment", level = "debug", skip_all)]
pub fn increment(
    column: &NumericColumn,
    selection: Option<&Selection>,
    mode: ErrorMode,
    context: &QueryContext,
) -> ColumnOperationResult<ArithmeticResult> {
    step(ArithmeticOperator::Add, column, selection, mode, context)
}

/// Subtracts one from every selected row, keeping the column's type.
///
/// # Errors
/// See [`binary_op`]. Decrementing the smallest value overflows.
#[tracing::instrument(name = "calc::decrement", level = "debug", skip_all)]
pub fn decrement(
    column: &NumericColumn,
    selection: Option<&Selection>,
    mode: ErrorMode,
    context: &QueryContext,
) -> ColumnOperationResult<ArithmeticResult> {
    step(ArithmeticOperator::Sub, column, selection, mode, context)
}

/// Computes `lhs operator rhs` for two values.
///
/// # Errors
/// See [`binary_op`]. A scalar operation never times out.
pub fn scalar_op(
    operator: ArithmeticOperator,
    lhs: LiteralValue,
    rhs: LiteralValue,
    result_type: ColumnType,
    mode: ErrorMode,
) -> ColumnOperationResult<LiteralValue> {
    let evaluation = evaluate(
        operator,
        Operand::Scalar(lhs),
        Operand::Scalar(rhs),
        result_type,
        mode,
        &QueryContext::unbounded(),
    )?;
    Ok(evaluation
        .values
        .literal_at(0)
        .unwrap_or(LiteralValue::nil(result_type)))
}

/// Adds one to a value, keeping its type.
///
/// # Errors
/// See [`scalar_op`].
pub fn increment_value(
    value: LiteralValue,
    mode: ErrorMode,
) -> ColumnOperationResult<LiteralValue> {
    scalar_op(
        ArithmeticOperator::Add,
        value,
        LiteralValue::TinyInt(1),
        value.column_type(),
        mode,
    )
}

/// Subtracts one from a value, keeping its type.
///
/// # Errors
/// See [`scalar_op`].
pub fn decrement_value(
    value: LiteralValue,
    mode: ErrorMode,
) -> ColumnOperationResult<LiteralValue> {
    scalar_op(
        ArithmeticOperator::Sub,
        value,
        LiteralValue::TinyInt(1),
        value.column_type(),
        mode,
    )
}

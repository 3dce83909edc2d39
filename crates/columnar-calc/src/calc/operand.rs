//! The two sides of an arithmetic operator.
use crate::base::database::{
    ColumnOperationResult, ColumnType, LiteralValue, NativeNumeric, NumericColumn, OwnedColumn,
    Selection, SelectionIter,
};

/// One side of an arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    /// The selected rows of a column.
    Column {
        /// The column
        column: &'a NumericColumn,
        /// The rows to read. `None` reads every row
        selection: Option<&'a Selection>,
    },
    /// A value repeated for every row of the other side.
    Scalar(LiteralValue),
}

impl<'a> Operand<'a> {
    /// Every row of `column`.
    #[must_use]
    pub fn column(column: &'a NumericColumn) -> Self {
        Self::Column {
            column,
            selection: None,
        }
    }

    /// The rows of `column` picked by `selection`.
    #[must_use]
    pub fn selected(column: &'a NumericColumn, selection: &'a Selection) -> Self {
        Self::Column {
            column,
            selection: Some(selection),
        }
    }

    /// A broadcast value.
    #[must_use]
    pub fn scalar(value: impl Into<LiteralValue>) -> Self {
        Self::Scalar(value.into())
    }

    /// The type of the values this operand produces.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            Self::Column { column, .. } => column.column_type(),
            Self::Scalar(value) => value.column_type(),
        }
    }

    /// Returns true for a scalar operand.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

/// Where a typed operand loop reads its values from.
pub(crate) enum OperandSource<'a, T> {
    /// Values at the positions a selection yields.
    Column {
        values: &'a [T],
        rows: SelectionIter<'a>,
    },
    /// The same value for every row.
    Broadcast(T),
}

impl<T: NativeNumeric> OperandSource<'_, T> {
    /// Reads the next value. `dense` skips translating positions through a row list or mask.
    #[inline]
    pub(crate) fn fetch(&mut self, dense: bool) -> Option<T> {
        match self {
            Self::Column { values, rows } => {
                let position = if dense { rows.next_dense() } else { rows.next() }?;
                values.get(position).copied()
            }
            Self::Broadcast(value) => Some(*value),
        }
    }
}

/// The rows a column operand contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowSpan {
    pub count: usize,
    pub first_row: u64,
    pub dense: bool,
}

/// An [`OperandSource`] of any width.
pub(crate) enum AnySource<'a> {
    TinyInt(OperandSource<'a, i8>),
    SmallInt(OperandSource<'a, i16>),
    Int(OperandSource<'a, i32>),
    BigInt(OperandSource<'a, i64>),
    Int128(OperandSource<'a, i128>),
    Real(OperandSource<'a, f32>),
    Double(OperandSource<'a, f64>),
}

fn column_source<'a, T>(
    values: &'a [T],
    rows: SelectionIter<'a>,
) -> (OperandSource<'a, T>, RowSpan) {
    let span = RowSpan {
        count: rows.len(),
        first_row: rows.first_row(),
        dense: rows.is_dense(),
    };
    (OperandSource::Column { values, rows }, span)
}

impl<'a> AnySource<'a> {
    /// Resolves an operand. Scalars have no row span.
    pub(crate) fn new(operand: Operand<'a>) -> ColumnOperationResult<(Self, Option<RowSpan>)> {
        Ok(match operand {
            Operand::Scalar(value) => (Self::broadcast(value), None),
            Operand::Column { column, selection } => {
                let rows = SelectionIter::for_column(column, selection)?;
                let (source, span) = match column.values() {
                    OwnedColumn::TinyInt(values) => {
                        let (source, span) = column_source(values, rows);
                        (Self::TinyInt(source), span)
                    }
                    OwnedColumn::SmallInt(values) => {
                        let (source, span) = column_source(values, rows);
                        (Self::SmallInt(source), span)
                    }
                    OwnedColumn::Int(values) => {
                        let (source, span) = column_source(values, rows);
                        (Self::Int(source), span)
                    }
                    OwnedColumn::BigInt(values) => {
                        let (source, span) = column_source(values, rows);
                        (Self::BigInt(source), span)
                    }
                    OwnedColumn::Int128(values) => {
                        let (source, span) = column_source(values, rows);
                        (Self::Int128(source), span)
                    }
                    OwnedColumn::Real(values) => {
                        let (source, span) = column_source(values, rows);
                        (Self::Real(source), span)
                    }
                    OwnedColumn::Double(values) => {
                        let (source, span) = column_source(values, rows);
                        (Self::Double(source), span)
                    }
                };
                (source, Some(span))
            }
        })
    }

    fn broadcast(value: LiteralValue) -> Self {
        match value {
            LiteralValue::TinyInt(value) => Self::TinyInt(OperandSource::Broadcast(value)),
            LiteralValue::SmallInt(value) => Self::SmallInt(OperandSource::Broadcast(value)),
            LiteralValue::Int(value) => Self::Int(OperandSource::Broadcast(value)),
            LiteralValue::BigInt(value) => Self::BigInt(OperandSource::Broadcast(value)),
            LiteralValue::Int128(value) => Self::Int128(OperandSource::Broadcast(value)),
            LiteralValue::Real(value) => Self::Real(OperandSource::Broadcast(value)),
            LiteralValue::Double(value) => Self::Double(OperandSource::Broadcast(value)),
        }
    }
}

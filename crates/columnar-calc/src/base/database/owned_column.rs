//! Owned numeric columns.
//!
//! An [`OwnedColumn`] holds the values of one width. A [`NumericColumn`] adds
//! the order and nil flags and the row id of its first value, which is what
//! the arithmetic drivers read.
use super::{native::nil_first_le, ColumnProperties, ColumnType, LiteralValue, NativeNumeric};
use alloc::vec::Vec;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[non_exhaustive]
/// Supported types for [`OwnedColumn`]
pub enum OwnedColumn {
    /// i8 columns
    TinyInt(Vec<i8>),
    /// i16 columns
    SmallInt(Vec<i16>),
    /// i32 columns
    Int(Vec<i32>),
    /// i64 columns
    BigInt(Vec<i64>),
    /// i128 columns
    Int128(Vec<i128>),
    /// f32 columns
    Real(Vec<f32>),
    /// f64 columns
    Double(Vec<f64>),
}

impl OwnedColumn {
    /// Returns the length of the column.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            OwnedColumn::TinyInt(col) => col.len(),
            OwnedColumn::SmallInt(col) => col.len(),
            OwnedColumn::Int(col) => col.len(),
            OwnedColumn::BigInt(col) => col.len(),
            OwnedColumn::Int128(col) => col.len(),
            OwnedColumn::Real(col) => col.len(),
            OwnedColumn::Double(col) => col.len(),
        }
    }

    /// Returns true if the column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the type of the column.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        match self {
            OwnedColumn::TinyInt(_) => ColumnType::TinyInt,
            OwnedColumn::SmallInt(_) => ColumnType::SmallInt,
            OwnedColumn::Int(_) => ColumnType::Int,
            OwnedColumn::BigInt(_) => ColumnType::BigInt,
            OwnedColumn::Int128(_) => ColumnType::Int128,
            OwnedColumn::Real(_) => ColumnType::Real,
            OwnedColumn::Double(_) => ColumnType::Double,
        }
    }

    /// Returns the value at `index` as a literal, or `None` if out of bounds.
    #[must_use]
    pub fn literal_at(&self, index: usize) -> Option<LiteralValue> {
        match self {
            OwnedColumn::TinyInt(col) => col.get(index).copied().map(LiteralValue::TinyInt),
            OwnedColumn::SmallInt(col) => col.get(index).copied().map(LiteralValue::SmallInt),
            OwnedColumn::Int(col) => col.get(index).copied().map(LiteralValue::Int),
            OwnedColumn::BigInt(col) => col.get(index).copied().map(LiteralValue::BigInt),
            OwnedColumn::Int128(col) => col.get(index).copied().map(LiteralValue::Int128),
            OwnedColumn::Real(col) => col.get(index).copied().map(LiteralValue::Real),
            OwnedColumn::Double(col) => col.get(index).copied().map(LiteralValue::Double),
        }
    }

    /// Returns true if the value at `index` is nil. Out of bounds indexes are not nil.
    #[must_use]
    pub fn is_nil(&self, index: usize) -> bool {
        self.literal_at(index).is_some_and(LiteralValue::is_nil)
    }

    /// Counts the nil values of the column.
    #[must_use]
    pub fn nil_count(&self) -> usize {
        match self {
            OwnedColumn::TinyInt(col) => count_nils(col),
            OwnedColumn::SmallInt(col) => count_nils(col),
            OwnedColumn::Int(col) => count_nils(col),
            OwnedColumn::BigInt(col) => count_nils(col),
            OwnedColumn::Int128(col) => count_nils(col),
            OwnedColumn::Real(col) => count_nils(col),
            OwnedColumn::Double(col) => count_nils(col),
        }
    }
}

fn count_nils<T: NativeNumeric>(values: &[T]) -> usize {
    values.iter().filter(|value| value.is_nil()).count()
}

/// Scans `values` and returns the flags that hold for them.
fn infer_properties<T: NativeNumeric>(values: &[T]) -> ColumnProperties {
    let trivially_ordered = values.len() <= 1;
    let sorted = values
        .iter()
        .tuple_windows()
        .all(|(&a, &b)| nil_first_le(a, b));
    let reverse_sorted = values
        .iter()
        .tuple_windows()
        .all(|(&a, &b)| nil_first_le(b, a));
    let strictly_monotone = values
        .iter()
        .tuple_windows()
        .all(|(&a, &b)| !a.is_nil() && !b.is_nil() && a != b);
    ColumnProperties {
        sorted,
        reverse_sorted,
        key: trivially_ordered || ((sorted || reverse_sorted) && strictly_monotone),
        has_nil: false,
        no_nil: false,
    }
    .with_nil_count(count_nils(values))
}

/// A column of numeric values together with its order and nil flags.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NumericColumn {
    values: OwnedColumn,
    properties: ColumnProperties,
    first_row: u64,
}

impl NumericColumn {
    /// Creates a column from values and caller-supplied flags.
    ///
    /// The flags are trusted as given.
    #[must_use]
    pub fn new(values: OwnedColumn, properties: ColumnProperties, first_row: u64) -> Self {
        Self {
            values,
            properties,
            first_row,
        }
    }

    /// Creates a column whose first value has the row id `first_row`, inferring its flags.
    #[must_use]
    pub fn with_first_row(values: OwnedColumn, first_row: u64) -> Self {
        let properties = match &values {
            OwnedColumn::TinyInt(col) => infer_properties(col),
            OwnedColumn::SmallInt(col) => infer_properties(col),
            OwnedColumn::Int(col) => infer_properties(col),
            OwnedColumn::BigInt(col) => infer_properties(col),
            OwnedColumn::Int128(col) => infer_properties(col),
            OwnedColumn::Real(col) => infer_properties(col),
            OwnedColumn::Double(col) => infer_properties(col),
        };
        Self::new(values, properties, first_row)
    }

    /// The values of the column.
    #[must_use]
    pub fn values(&self) -> &OwnedColumn {
        &self.values
    }

    /// Consumes the column, returning its values.
    #[must_use]
    pub fn into_values(self) -> OwnedColumn {
        self.values
    }

    /// The order and nil flags of the column.
    #[must_use]
    pub fn properties(&self) -> &ColumnProperties {
        &self.properties
    }

    /// Row id of the first value.
    #[must_use]
    pub fn first_row(&self) -> u64 {
        self.first_row
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The type of the values.
    #[must_use]
    pub fn column_type(&self) -> ColumnType {
        self.values.column_type()
    }
}

impl From<OwnedColumn> for NumericColumn {
    fn from(values: OwnedColumn) -> Self {
        Self::with_first_row(values, 0)
    }
}

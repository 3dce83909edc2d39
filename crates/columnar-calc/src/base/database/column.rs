use core::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

/// Represents the numeric widths a column in an in-memory,
/// column-oriented database can hold.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Serialize, Deserialize, Copy)]
pub enum ColumnType {
    /// Mapped to i8
    #[serde(alias = "TINYINT", alias = "tinyint")]
    TinyInt,
    /// Mapped to i16
    #[serde(alias = "SMALLINT", alias = "smallint")]
    SmallInt,
    /// Mapped to i32
    #[serde(alias = "INT", alias = "int")]
    Int,
    /// Mapped to i64
    #[serde(alias = "BIGINT", alias = "bigint")]
    BigInt,
    /// Mapped to i128
    #[serde(alias = "HUGEINT", alias = "hugeint")]
    Int128,
    /// Mapped to f32
    #[serde(alias = "REAL", alias = "real")]
    Real,
    /// Mapped to f64
    #[serde(alias = "DOUBLE", alias = "double")]
    Double,
}

impl ColumnType {
    /// Every column type, ordered by [`ColumnType::index`].
    pub const ALL: [ColumnType; 7] = [
        ColumnType::TinyInt,
        ColumnType::SmallInt,
        ColumnType::Int,
        ColumnType::BigInt,
        ColumnType::Int128,
        ColumnType::Real,
        ColumnType::Double,
    ];

    /// Dense index of this type, suitable for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ColumnType::TinyInt => 0,
            ColumnType::SmallInt => 1,
            ColumnType::Int => 2,
            ColumnType::BigInt => 3,
            ColumnType::Int128 => 4,
            ColumnType::Real => 5,
            ColumnType::Double => 6,
        }
    }

    /// Returns true if this column is an integer and false otherwise
    #[must_use]
    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Returns true if this column is a floating point number and false otherwise
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, ColumnType::Real | ColumnType::Double)
    }

    /// Returns the bit size of the column type.
    #[must_use]
    pub const fn bit_size(self) -> u32 {
        match self {
            ColumnType::TinyInt => 8,
            ColumnType::SmallInt => 16,
            ColumnType::Int | ColumnType::Real => 32,
            ColumnType::BigInt | ColumnType::Double => 64,
            ColumnType::Int128 => 128,
        }
    }

    /// Returns the number of bytes taken up by a value of this type.
    #[must_use]
    pub const fn byte_size(self) -> usize {
        self.bit_size() as usize / 8
    }

    /// Ordering of float widths: 0 for integers, 1 for `Real`, 2 for `Double`.
    #[must_use]
    pub const fn float_rank(self) -> u32 {
        match self {
            ColumnType::Real => 1,
            ColumnType::Double => 2,
            _ => 0,
        }
    }

    /// Exponent `e` such that every non-nil magnitude of this type is below `2^e`.
    #[must_use]
    pub const fn magnitude_bits(self) -> u32 {
        match self {
            ColumnType::Real => 128,
            ColumnType::Double => 1024,
            _ => self.bit_size() - 1,
        }
    }

    /// Exponent `g` such that the largest non-nil magnitude of this type is at least `2^g`.
    #[must_use]
    pub const fn guaranteed_bits(self) -> u32 {
        match self {
            ColumnType::Real => 127,
            ColumnType::Double => 1023,
            _ => self.bit_size() - 2,
        }
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::TinyInt => write!(f, "TINYINT"),
            ColumnType::SmallInt => write!(f, "SMALLINT"),
            ColumnType::Int => write!(f, "INT"),
            ColumnType::BigInt => write!(f, "BIGINT"),
            ColumnType::Int128 => write!(f, "HUGEINT"),
            ColumnType::Real => write!(f, "REAL"),
            ColumnType::Double => write!(f, "DOUBLE"),
        }
    }
}

/// Order and nil flags carried alongside a column.
///
/// The flags are conservative: a `false` never promises the opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct ColumnProperties {
    /// Values are in ascending order, with nil first.
    pub sorted: bool,
    /// Values are in descending order, with nil last.
    pub reverse_sorted: bool,
    /// All values are distinct.
    pub key: bool,
    /// At least one value is nil.
    pub has_nil: bool,
    /// No value is nil.
    pub no_nil: bool,
}

impl ColumnProperties {
    /// Flags for a column about which nothing is known.
    #[must_use]
    pub const fn unknown() -> Self {
        Self {
            sorted: false,
            reverse_sorted: false,
            key: false,
            has_nil: false,
            no_nil: false,
        }
    }

    /// Returns these flags with `has_nil` and `no_nil` taken from a nil count.
    #[must_use]
    pub const fn with_nil_count(self, nil_count: usize) -> Self {
        Self {
            has_nil: nil_count > 0,
            no_nil: nil_count == 0,
            ..self
        }
    }
}

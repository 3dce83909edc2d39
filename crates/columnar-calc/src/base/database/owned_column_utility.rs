//! Utility functions for creating [`NumericColumn`]s.
//! These functions are primarily intended for use in tests.
//!
//! # Example
//! ```
//! use columnar_calc::base::database::owned_column_utility::{bigint, double, tinyint};
//! let a = tinyint([1_i8, 2, 3]);
//! let b = bigint([i64::MIN, 5]);
//! let c = double([0.5, f64::NAN]);
//! assert!(a.properties().sorted);
//! assert!(b.properties().has_nil);
//! assert!(c.properties().has_nil);
//! ```
use super::{NumericColumn, OwnedColumn};

/// Creates an i8 column with inferred flags.
#[must_use]
pub fn tinyint(data: impl IntoIterator<Item = impl Into<i8>>) -> NumericColumn {
    OwnedColumn::TinyInt(data.into_iter().map(Into::into).collect()).into()
}

/// Creates an i16 column with inferred flags.
#[must_use]
pub fn smallint(data: impl IntoIterator<Item = impl Into<i16>>) -> NumericColumn {
    OwnedColumn::SmallInt(data.into_iter().map(Into::into).collect()).into()
}

/// Creates an i32 column with inferred flags.
#[must_use]
pub fn int(data: impl IntoIterator<Item = impl Into<i32>>) -> NumericColumn {
    OwnedColumn::Int(data.into_iter().map(Into::into).collect()).into()
}

/// Creates an i64 column with inferred flags.
#[must_use]
pub fn bigint(data: impl IntoIterator<Item = impl Into<i64>>) -> NumericColumn {
    OwnedColumn::BigInt(data.into_iter().map(Into::into).collect()).into()
}

/// Creates an i128 column with inferred flags.
#[must_use]
pub fn int128(data: impl IntoIterator<Item = impl Into<i128>>) -> NumericColumn {
    OwnedColumn::Int128(data.into_iter().map(Into::into).collect()).into()
}

/// Creates an f32 column with inferred flags.
#[must_use]
pub fn real(data: impl IntoIterator<Item = impl Into<f32>>) -> NumericColumn {
    OwnedColumn::Real(data.into_iter().map(Into::into).collect()).into()
}

/// Creates an f64 column with inferred flags.
#[must_use]
pub fn double(data: impl IntoIterator<Item = impl Into<f64>>) -> NumericColumn {
    OwnedColumn::Double(data.into_iter().map(Into::into).collect()).into()
}

#[cfg(any(test, feature = "test"))]
fn random_values<R: rand::Rng, T>(
    rng: &mut R,
    len: usize,
    nil_ratio: f64,
    nil: T,
    value: impl Fn(&mut R) -> T,
) -> alloc::vec::Vec<T>
where
    T: Copy,
{
    (0..len)
        .map(|_| {
            if rng.gen_bool(nil_ratio) {
                nil
            } else {
                value(rng)
            }
        })
        .collect()
}

/// Creates a column of `len` random values of `column_type`, roughly `nil_ratio` of them nil.
///
/// # Panics
/// Panics if `nil_ratio` is not in `0.0..=1.0`.
#[cfg(any(test, feature = "test"))]
#[must_use]
pub fn random_column<R: rand::Rng>(
    rng: &mut R,
    column_type: super::ColumnType,
    len: usize,
    nil_ratio: f64,
) -> NumericColumn {
    use super::ColumnType;
    let values = match column_type {
        ColumnType::TinyInt => {
            OwnedColumn::TinyInt(random_values(rng, len, nil_ratio, i8::MIN, |rng| {
                rng.gen_range(-100..=100)
            }))
        }
        ColumnType::SmallInt => {
            OwnedColumn::SmallInt(random_values(rng, len, nil_ratio, i16::MIN, |rng| {
                rng.gen_range(-10_000..=10_000)
            }))
        }
        ColumnType::Int => {
            OwnedColumn::Int(random_values(rng, len, nil_ratio, i32::MIN, |rng| {
                rng.gen_range(-1_000_000..=1_000_000)
            }))
        }
        ColumnType::BigInt => {
            OwnedColumn::BigInt(random_values(rng, len, nil_ratio, i64::MIN, |rng| {
                rng.gen_range(-1_000_000_000..=1_000_000_000)
            }))
        }
        ColumnType::Int128 => {
            OwnedColumn::Int128(random_values(rng, len, nil_ratio, i128::MIN, |rng| {
                rng.gen_range(-1_000_000_000_000..=1_000_000_000_000)
            }))
        }
        ColumnType::Real => {
            OwnedColumn::Real(random_values(rng, len, nil_ratio, f32::NAN, |rng| {
                rng.gen_range(-1.0e6..1.0e6)
            }))
        }
        ColumnType::Double => {
            OwnedColumn::Double(random_values(rng, len, nil_ratio, f64::NAN, |rng| {
                rng.gen_range(-1.0e9..1.0e9)
            }))
        }
    };
    values.into()
}

//! This module defines math utilities used by the arithmetic kernels.
mod split_mul;
pub use split_mul::checked_split_mul;

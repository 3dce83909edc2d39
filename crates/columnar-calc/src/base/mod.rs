//! This module contains the column model shared by every arithmetic operator.
pub mod database;
pub mod math;

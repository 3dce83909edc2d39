#![doc = include_str!("../README.md")]
extern crate alloc;

pub mod base;
pub mod calc;

//! Tidy IR - symbol and operator identifiers.
//!
//! This crate contains the leaf data structures shared by the evaluator:
//! - `Name` for interned symbols
//! - `StringInterner` for symbol storage
//! - `Primitive` for the built-in operators that can be inlined into calls
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: symbol text → `Name(u32)`, compared in O(1)
//! - **No evaluation here**: expressions embed runtime values, so they live
//!   next to `Value` in `tidy_eval`

mod interner;
mod name;
mod primitive;

pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use primitive::Primitive;

//! Property value and descriptor model.
//!
//! # Responsibility
//! - Define the closed set of property kinds, typed values and store cells.
//! - Define immutable property descriptors.
//!
//! # Invariants
//! - A descriptor's default value is always of its declared kind.
//! - Only the descriptor's kind decides how a store cell is interpreted.

pub mod descriptor;
pub mod value;

//! Shared building blocks for the barcat workspace: domain types, the
//! canonical timestamp handling, and logging initialization.

pub mod logging;
pub mod time;
pub mod types;

pub use types::{Cocktail, Ingredient, NumericClass, OpsSummary};

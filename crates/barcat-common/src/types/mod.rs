//! Domain types shared across the workspace.

mod cocktail;
mod numeric;
mod summary;

pub use cocktail::{Cocktail, Ingredient};
pub use numeric::NumericClass;
pub use summary::OpsSummary;

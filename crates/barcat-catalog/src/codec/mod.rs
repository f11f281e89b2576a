//! Conversions between the three representations of a cocktail record:
//! the local tabular row, the upstream snapshot record, and the domain
//! entity.

pub mod row;
pub mod snapshot;

use thiserror::Error;

/// A record that could not be converted into a valid `Cocktail`.
///
/// These never cross the store boundary; callers log the failure and drop
/// the record.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("record is empty")]
    EmptyRecord,

    #[error("id: {0}")]
    Id(#[from] std::num::ParseIntError),

    #[error("name is empty")]
    NameEmpty,

    #[error("ingredients: {0}")]
    Ingredients(#[from] serde_json::Error),

    #[error("ingredients are empty")]
    IngredientsEmpty,

    #[error("instructions are empty")]
    InstructionsEmpty,

    #[error("{field}: {source}")]
    Timestamp {
        field: &'static str,
        #[source]
        source: chrono::ParseError,
    },
}

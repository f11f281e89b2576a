//! Core operations behind the HTTP handlers: the filter query, validation
//! of bounded-read arguments, and the catalog update entry point.

use std::num::ParseIntError;

use thiserror::Error;
use tracing::debug;

use barcat_catalog::{reconcile, CatalogStore};
use barcat_common::{Cocktail, NumericClass, OpsSummary};

use crate::error::ApiError;

/// A rejected filter query.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("filter type empty")]
    EmptyType,

    #[error("filter value empty")]
    EmptyValue,

    #[error("invalid filter")]
    Invalid,

    #[error("invalid filter value: {0}")]
    ValueParse(#[from] ParseIntError),
}

/// Rejected bounded-read query arguments.
#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("invalid numeric class: {0}")]
    InvalidNumericClass(String),

    #[error("zero value is not allowed")]
    ZeroValue,

    #[error("jobs per worker higher than the job budget")]
    PerWorkerAboveBudget,

    #[error("invalid numeric argument: {0}")]
    ValueParse(#[from] ParseIntError),
}

/// The filterable record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CocktailFilter {
    Id,
    Name,
    Alcoholic,
    Category,
    Ingredient,
    Glass,
}

impl CocktailFilter {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "id" => Some(CocktailFilter::Id),
            "name" => Some(CocktailFilter::Name),
            "alcoholic" => Some(CocktailFilter::Alcoholic),
            "category" => Some(CocktailFilter::Category),
            "ingredient" => Some(CocktailFilter::Ingredient),
            "glass" => Some(CocktailFilter::Glass),
            _ => None,
        }
    }
}

/// Operations over the catalog, one instance shared by all handlers.
#[derive(Debug, Clone)]
pub struct CocktailService {
    store: CatalogStore,
}

impl CocktailService {
    pub fn new(store: CatalogStore) -> Self {
        debug!("created cocktail service");
        Self { store }
    }

    /// All catalog records.
    pub async fn get_all(&self) -> Result<Vec<Cocktail>, ApiError> {
        Ok(self.store.read_all().await?)
    }

    /// The records matching a `(filter, value)` pair.
    ///
    /// `id` is integer equality; `alcoholic` a case-insensitive full-string
    /// match; `name`, `category` and `glass` case-insensitive substrings;
    /// `ingredient` a case-insensitive substring over ingredient names.
    pub async fn get_filtered(
        &self,
        filter: &str,
        value: &str,
    ) -> Result<Vec<Cocktail>, ApiError> {
        if filter.is_empty() {
            return Err(FilterError::EmptyType.into());
        }
        if value.is_empty() {
            return Err(FilterError::EmptyValue.into());
        }
        let filter = CocktailFilter::from_name(filter).ok_or(FilterError::Invalid)?;

        let records = self.store.read_all().await?;
        let matches = match filter {
            CocktailFilter::Id => {
                let id: i64 = value.parse().map_err(FilterError::ValueParse)?;
                records.into_iter().filter(|c| c.id == id).collect()
            },
            CocktailFilter::Name => by_substring(records, value, |c| &c.name),
            CocktailFilter::Alcoholic => records
                .into_iter()
                .filter(|c| c.alcoholic.eq_ignore_ascii_case(value))
                .collect(),
            CocktailFilter::Category => by_substring(records, value, |c| &c.category),
            CocktailFilter::Glass => by_substring(records, value, |c| &c.glass),
            CocktailFilter::Ingredient => {
                let needle = value.to_lowercase();
                records
                    .into_iter()
                    .filter(|c| {
                        c.ingredients
                            .iter()
                            .any(|i| i.name.to_lowercase().contains(&needle))
                    })
                    .collect()
            },
        };
        Ok(matches)
    }

    /// Bounded concurrent read; all three arguments arrive as path strings.
    pub async fn get_bounded(
        &self,
        class: &str,
        job_budget: &str,
        per_worker: &str,
    ) -> Result<Vec<Cocktail>, ApiError> {
        let class = NumericClass::from_name(class)
            .ok_or_else(|| ArgsError::InvalidNumericClass(class.to_string()))?;
        let job_budget: usize = job_budget.parse().map_err(ArgsError::ValueParse)?;
        let per_worker: usize = per_worker.parse().map_err(ArgsError::ValueParse)?;
        if job_budget == 0 || per_worker == 0 {
            return Err(ArgsError::ZeroValue.into());
        }
        if per_worker > job_budget {
            return Err(ArgsError::PerWorkerAboveBudget.into());
        }

        Ok(self.store.read_bounded(class, job_budget, per_worker).await?)
    }

    /// Reconcile the catalog against the upstream snapshot.
    pub async fn update_catalog(&self) -> Result<OpsSummary, ApiError> {
        Ok(reconcile::reconcile(&self.store).await?)
    }
}

fn by_substring(
    records: Vec<Cocktail>,
    value: &str,
    field: impl Fn(&Cocktail) -> &str,
) -> Vec<Cocktail> {
    let needle = value.to_lowercase();
    records
        .into_iter()
        .filter(|c| field(c).to_lowercase().contains(&needle))
        .collect()
}

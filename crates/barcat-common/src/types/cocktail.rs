//! The cocktail domain entity.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single ingredient line of a recipe.
///
/// `measure` is carried verbatim from its source; upstream values often end
/// in a trailing space and that whitespace is significant for comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

/// A cocktail recipe as stored in the catalog.
///
/// `id` identifies the record within the catalog. `src_date` is the
/// upstream modification timestamp and is never altered locally;
/// `created_at` / `updated_at` are catalog-local provenance stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cocktail {
    pub id: i64,
    pub name: String,
    pub alcoholic: String,
    pub category: String,
    /// At least one element; order is significant.
    pub ingredients: Vec<Ingredient>,
    pub instructions: String,
    pub glass: String,
    pub iba: String,
    pub img_attribution: String,
    pub img_src: String,
    pub tags: String,
    pub thumb: String,
    pub video: String,
    pub src_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_field_names() {
        let cocktail = Cocktail {
            id: 11000,
            name: "Mojito".to_string(),
            alcoholic: "Alcoholic".to_string(),
            category: "Cocktail".to_string(),
            ingredients: vec![Ingredient {
                name: "Light rum".to_string(),
                measure: "2-3 oz ".to_string(),
            }],
            instructions: "Muddle mint leaves with sugar and lime juice.".to_string(),
            glass: "Highball glass".to_string(),
            iba: "Contemporary Classics".to_string(),
            img_attribution: String::new(),
            img_src: String::new(),
            tags: "IBA,ContemporaryClassic".to_string(),
            thumb: String::new(),
            video: String::new(),
            src_date: crate::time::parse_date_time("2016-11-04 09:17:09").unwrap(),
            created_at: crate::time::parse_date_time("2023-10-01 00:33:47").unwrap(),
            updated_at: crate::time::parse_date_time("2023-10-01 00:33:47").unwrap(),
        };

        let value = serde_json::to_value(&cocktail).unwrap();
        assert_eq!(value["id"], 11000);
        assert_eq!(value["imgAttribution"], "");
        assert_eq!(value["srcDate"], "2016-11-04T09:17:09");
        assert_eq!(value["ingredients"][0]["measure"], "2-3 oz ");
    }

    #[test]
    fn test_ingredient_equality_is_structural() {
        let a = Ingredient {
            name: "Gin".to_string(),
            measure: "1 oz ".to_string(),
        };
        let b = Ingredient {
            name: "Gin".to_string(),
            measure: "1 oz ".to_string(),
        };
        let c = Ingredient {
            name: "Gin".to_string(),
            measure: "1 oz".to_string(),
        };
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

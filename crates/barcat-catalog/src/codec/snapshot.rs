//! Codec from the upstream snapshot record to the domain entity.
//!
//! The snapshot flattens the ingredient list into fifteen parallel
//! `strIngredientN`/`strMeasureN` column pairs; parsing reconstructs the
//! ordered list by walking N = 1..15 and keeping every pair whose
//! ingredient name is non-empty. Measures are taken verbatim, trailing
//! whitespace included.

use barcat_common::time;
use barcat_common::{Cocktail, Ingredient};
use serde::{Deserialize, Deserializer};

use super::CodecError;

/// The `{ "drinks": [...] }` envelope returned by the snapshot endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DrinksEnvelope {
    #[serde(default, deserialize_with = "null_to_empty_vec")]
    pub drinks: Vec<SnapshotDrink>,
}

/// One drink record as served by the snapshot endpoint.
///
/// Every field is a string; absent or `null` values become `""`.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SnapshotDrink {
    #[serde(rename = "idDrink", default, deserialize_with = "null_to_empty")]
    pub id: String,
    #[serde(rename = "strDrink", default, deserialize_with = "null_to_empty")]
    pub name: String,
    #[serde(rename = "strDrinkAlternate", default, deserialize_with = "null_to_empty")]
    pub alternate: String,
    #[serde(rename = "strAlcoholic", default, deserialize_with = "null_to_empty")]
    pub alcoholic: String,
    #[serde(rename = "strCategory", default, deserialize_with = "null_to_empty")]
    pub category: String,
    #[serde(rename = "strInstructions", default, deserialize_with = "null_to_empty")]
    pub instructions: String,
    #[serde(rename = "strGlass", default, deserialize_with = "null_to_empty")]
    pub glass: String,
    #[serde(rename = "strIBA", default, deserialize_with = "null_to_empty")]
    pub iba: String,
    #[serde(rename = "strImageAttribution", default, deserialize_with = "null_to_empty")]
    pub image_attribution: String,
    #[serde(rename = "strImageSource", default, deserialize_with = "null_to_empty")]
    pub image_source: String,
    #[serde(rename = "strTags", default, deserialize_with = "null_to_empty")]
    pub tags: String,
    #[serde(rename = "strDrinkThumb", default, deserialize_with = "null_to_empty")]
    pub thumb: String,
    #[serde(rename = "strVideo", default, deserialize_with = "null_to_empty")]
    pub video: String,
    #[serde(rename = "dateModified", default, deserialize_with = "null_to_empty")]
    pub date_modified: String,

    #[serde(rename = "strIngredient1", default, deserialize_with = "null_to_empty")]
    pub ingredient1: String,
    #[serde(rename = "strIngredient2", default, deserialize_with = "null_to_empty")]
    pub ingredient2: String,
    #[serde(rename = "strIngredient3", default, deserialize_with = "null_to_empty")]
    pub ingredient3: String,
    #[serde(rename = "strIngredient4", default, deserialize_with = "null_to_empty")]
    pub ingredient4: String,
    #[serde(rename = "strIngredient5", default, deserialize_with = "null_to_empty")]
    pub ingredient5: String,
    #[serde(rename = "strIngredient6", default, deserialize_with = "null_to_empty")]
    pub ingredient6: String,
    #[serde(rename = "strIngredient7", default, deserialize_with = "null_to_empty")]
    pub ingredient7: String,
    #[serde(rename = "strIngredient8", default, deserialize_with = "null_to_empty")]
    pub ingredient8: String,
    #[serde(rename = "strIngredient9", default, deserialize_with = "null_to_empty")]
    pub ingredient9: String,
    #[serde(rename = "strIngredient10", default, deserialize_with = "null_to_empty")]
    pub ingredient10: String,
    #[serde(rename = "strIngredient11", default, deserialize_with = "null_to_empty")]
    pub ingredient11: String,
    #[serde(rename = "strIngredient12", default, deserialize_with = "null_to_empty")]
    pub ingredient12: String,
    #[serde(rename = "strIngredient13", default, deserialize_with = "null_to_empty")]
    pub ingredient13: String,
    #[serde(rename = "strIngredient14", default, deserialize_with = "null_to_empty")]
    pub ingredient14: String,
    #[serde(rename = "strIngredient15", default, deserialize_with = "null_to_empty")]
    pub ingredient15: String,

    #[serde(rename = "strMeasure1", default, deserialize_with = "null_to_empty")]
    pub measure1: String,
    #[serde(rename = "strMeasure2", default, deserialize_with = "null_to_empty")]
    pub measure2: String,
    #[serde(rename = "strMeasure3", default, deserialize_with = "null_to_empty")]
    pub measure3: String,
    #[serde(rename = "strMeasure4", default, deserialize_with = "null_to_empty")]
    pub measure4: String,
    #[serde(rename = "strMeasure5", default, deserialize_with = "null_to_empty")]
    pub measure5: String,
    #[serde(rename = "strMeasure6", default, deserialize_with = "null_to_empty")]
    pub measure6: String,
    #[serde(rename = "strMeasure7", default, deserialize_with = "null_to_empty")]
    pub measure7: String,
    #[serde(rename = "strMeasure8", default, deserialize_with = "null_to_empty")]
    pub measure8: String,
    #[serde(rename = "strMeasure9", default, deserialize_with = "null_to_empty")]
    pub measure9: String,
    #[serde(rename = "strMeasure10", default, deserialize_with = "null_to_empty")]
    pub measure10: String,
    #[serde(rename = "strMeasure11", default, deserialize_with = "null_to_empty")]
    pub measure11: String,
    #[serde(rename = "strMeasure12", default, deserialize_with = "null_to_empty")]
    pub measure12: String,
    #[serde(rename = "strMeasure13", default, deserialize_with = "null_to_empty")]
    pub measure13: String,
    #[serde(rename = "strMeasure14", default, deserialize_with = "null_to_empty")]
    pub measure14: String,
    #[serde(rename = "strMeasure15", default, deserialize_with = "null_to_empty")]
    pub measure15: String,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_to_empty_vec<'de, D>(deserializer: D) -> Result<Vec<SnapshotDrink>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SnapshotDrink>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SnapshotDrink {
    /// Parse the record into a `Cocktail`.
    ///
    /// `date_modified` maps to `src_date`; the catalog provenance stamps
    /// are left at the epoch placeholder for the reconciler to populate.
    pub fn parse(&self) -> Result<Cocktail, CodecError> {
        if *self == SnapshotDrink::default() {
            return Err(CodecError::EmptyRecord);
        }

        let id: i64 = self.id.parse()?;

        if self.name.is_empty() {
            return Err(CodecError::NameEmpty);
        }
        if self.instructions.is_empty() {
            return Err(CodecError::InstructionsEmpty);
        }

        let ingredients = self.ingredients();
        if ingredients.is_empty() {
            return Err(CodecError::IngredientsEmpty);
        }

        let src_date = time::parse_date_time(&self.date_modified)
            .map_err(|source| CodecError::Timestamp {
                field: "date modified",
                source,
            })?;

        Ok(Cocktail {
            id,
            name: self.name.clone(),
            alcoholic: self.alcoholic.clone(),
            category: self.category.clone(),
            ingredients,
            instructions: self.instructions.clone(),
            glass: self.glass.clone(),
            iba: self.iba.clone(),
            img_attribution: self.image_attribution.clone(),
            img_src: self.image_source.clone(),
            tags: self.tags.clone(),
            thumb: self.thumb.clone(),
            video: self.video.clone(),
            src_date,
            created_at: time::epoch(),
            updated_at: time::epoch(),
        })
    }

    /// The ordered ingredient list: pairs N = 1..15 whose ingredient name
    /// is non-empty, measures verbatim.
    fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredient_pairs()
            .into_iter()
            .filter(|(name, _)| !name.is_empty())
            .map(|(name, measure)| Ingredient {
                name: name.to_string(),
                measure: measure.to_string(),
            })
            .collect()
    }

    fn ingredient_pairs(&self) -> [(&str, &str); 15] {
        [
            (&self.ingredient1, &self.measure1),
            (&self.ingredient2, &self.measure2),
            (&self.ingredient3, &self.measure3),
            (&self.ingredient4, &self.measure4),
            (&self.ingredient5, &self.measure5),
            (&self.ingredient6, &self.measure6),
            (&self.ingredient7, &self.measure7),
            (&self.ingredient8, &self.measure8),
            (&self.ingredient9, &self.measure9),
            (&self.ingredient10, &self.measure10),
            (&self.ingredient11, &self.measure11),
            (&self.ingredient12, &self.measure12),
            (&self.ingredient13, &self.measure13),
            (&self.ingredient14, &self.measure14),
            (&self.ingredient15, &self.measure15),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acapulco_json() -> serde_json::Value {
        serde_json::json!({
            "idDrink": "11001",
            "strDrink": "Acapulco",
            "strDrinkAlternate": null,
            "strTags": null,
            "strVideo": null,
            "strCategory": "Ordinary Drink",
            "strIBA": null,
            "strAlcoholic": "Alcoholic",
            "strGlass": "Old-fashioned glass",
            "strInstructions": "Combine and shake all ingredients with ice.",
            "strDrinkThumb": "https://www.thecocktaildb.com/images/media/drink/il9e0r1582478841.jpg",
            "strIngredient1": "Light rum",
            "strIngredient2": "Triple sec",
            "strIngredient3": "Lime juice",
            "strIngredient4": null,
            "strMeasure1": "1 1/2 oz ",
            "strMeasure2": "1 1/2 tsp ",
            "strMeasure3": "1 tblsp ",
            "strMeasure4": null,
            "strImageSource": null,
            "strImageAttribution": null,
            "strCreativeCommonsConfirmed": "Yes",
            "dateModified": "2016-09-02 11:26:16"
        })
    }

    #[test]
    fn test_parse_maps_fields() {
        let drink: SnapshotDrink = serde_json::from_value(acapulco_json()).unwrap();
        let cocktail = drink.parse().unwrap();

        assert_eq!(cocktail.id, 11001);
        assert_eq!(cocktail.name, "Acapulco");
        assert_eq!(cocktail.alcoholic, "Alcoholic");
        assert_eq!(cocktail.category, "Ordinary Drink");
        assert_eq!(cocktail.glass, "Old-fashioned glass");
        // null fields arrive as empty strings
        assert_eq!(cocktail.iba, "");
        assert_eq!(cocktail.tags, "");
        assert_eq!(cocktail.img_src, "");
        assert_eq!(
            time::format_date_time(cocktail.src_date),
            "2016-09-02 11:26:16"
        );
        assert_eq!(cocktail.created_at, time::epoch());
        assert_eq!(cocktail.updated_at, time::epoch());
    }

    #[test]
    fn test_parse_keeps_ingredient_order_and_measure_whitespace() {
        let drink: SnapshotDrink = serde_json::from_value(acapulco_json()).unwrap();
        let cocktail = drink.parse().unwrap();

        let names: Vec<_> = cocktail.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Light rum", "Triple sec", "Lime juice"]);
        assert_eq!(cocktail.ingredients[0].measure, "1 1/2 oz ");
        assert_eq!(cocktail.ingredients[2].measure, "1 tblsp ");
    }

    #[test]
    fn test_parse_skips_gaps_in_ingredient_columns() {
        let mut value = acapulco_json();
        value["strIngredient2"] = serde_json::Value::Null;
        let drink: SnapshotDrink = serde_json::from_value(value).unwrap();
        let cocktail = drink.parse().unwrap();

        let names: Vec<_> = cocktail.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Light rum", "Lime juice"]);
    }

    #[test]
    fn test_parse_requires_ingredients() {
        let mut value = acapulco_json();
        for n in 1..=15 {
            value[format!("strIngredient{n}")] = serde_json::Value::Null;
            value[format!("strMeasure{n}")] = serde_json::Value::Null;
        }
        let drink: SnapshotDrink = serde_json::from_value(value).unwrap();
        assert!(matches!(drink.parse(), Err(CodecError::IngredientsEmpty)));
    }

    #[test]
    fn test_parse_rejects_empty_record() {
        let drink = SnapshotDrink::default();
        assert!(matches!(drink.parse(), Err(CodecError::EmptyRecord)));
    }

    #[test]
    fn test_parse_rejects_bad_id_and_missing_fields() {
        let mut value = acapulco_json();
        value["idDrink"] = serde_json::json!("abc");
        let drink: SnapshotDrink = serde_json::from_value(value).unwrap();
        assert!(matches!(drink.parse(), Err(CodecError::Id(_))));

        let mut value = acapulco_json();
        value["strDrink"] = serde_json::Value::Null;
        let drink: SnapshotDrink = serde_json::from_value(value).unwrap();
        assert!(matches!(drink.parse(), Err(CodecError::NameEmpty)));

        let mut value = acapulco_json();
        value["strInstructions"] = serde_json::json!("");
        let drink: SnapshotDrink = serde_json::from_value(value).unwrap();
        assert!(matches!(drink.parse(), Err(CodecError::InstructionsEmpty)));

        let mut value = acapulco_json();
        value["dateModified"] = serde_json::json!("02/09/2016");
        let drink: SnapshotDrink = serde_json::from_value(value).unwrap();
        assert!(matches!(drink.parse(), Err(CodecError::Timestamp { .. })));
    }

    #[test]
    fn test_envelope_tolerates_null_drinks() {
        let envelope: DrinksEnvelope = serde_json::from_str(r#"{"drinks":null}"#).unwrap();
        assert!(envelope.drinks.is_empty());

        let envelope: DrinksEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.drinks.is_empty());
    }
}

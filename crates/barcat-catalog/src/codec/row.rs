//! Codec between the 16-column catalog row and the domain entity.

use barcat_common::time;
use barcat_common::{Cocktail, Ingredient};
use csv::StringRecord;
use tracing::warn;

use super::CodecError;

// Column positions within a catalog row.
const IDX_ID: usize = 0;
const IDX_NAME: usize = 1;
const IDX_ALCOHOLIC: usize = 2;
const IDX_CATEGORY: usize = 3;
const IDX_INGREDIENTS: usize = 4;
const IDX_INSTRUCTIONS: usize = 5;
const IDX_GLASS: usize = 6;
const IDX_IBA: usize = 7;
const IDX_IMG_ATTRIBUTION: usize = 8;
const IDX_IMG_SRC: usize = 9;
const IDX_TAGS: usize = 10;
const IDX_THUMB: usize = 11;
const IDX_VIDEO: usize = 12;
const IDX_SRC_DATE: usize = 13;
const IDX_CREATED_AT: usize = 14;
const IDX_UPDATED_AT: usize = 15;

/// Number of columns in a catalog row.
pub const COLUMNS: usize = 16;

/// Parse one catalog row into a `Cocktail`.
///
/// Rows shorter than [`COLUMNS`] are right-padded with empty fields before
/// lookup; longer rows are permitted and the excess is ignored. Leading
/// whitespace in a field is ignored; trailing whitespace is kept verbatim.
/// Required checks, in order: non-empty row, integer id, non-empty name,
/// non-empty ingredients JSON, non-empty instructions, three parseable
/// timestamps.
pub fn parse_row(record: &StringRecord) -> Result<Cocktail, CodecError> {
    if record.is_empty() {
        return Err(CodecError::EmptyRecord);
    }
    if record.len() != COLUMNS {
        warn!(
            fields = record.len(),
            expected = COLUMNS,
            record = %join_fields(record),
            "row has wrong number of fields"
        );
    }

    let field = |idx: usize| record.get(idx).unwrap_or("").trim_start();

    let id: i64 = field(IDX_ID).parse()?;

    let name = field(IDX_NAME);
    if name.is_empty() {
        return Err(CodecError::NameEmpty);
    }

    let ingredients: Vec<Ingredient> = serde_json::from_str(field(IDX_INGREDIENTS))?;
    if ingredients.is_empty() {
        return Err(CodecError::IngredientsEmpty);
    }

    let instructions = field(IDX_INSTRUCTIONS);
    if instructions.is_empty() {
        return Err(CodecError::InstructionsEmpty);
    }

    let src_date = parse_timestamp(field(IDX_SRC_DATE), "source date")?;
    let created_at = parse_timestamp(field(IDX_CREATED_AT), "created at")?;
    let updated_at = parse_timestamp(field(IDX_UPDATED_AT), "updated at")?;

    Ok(Cocktail {
        id,
        name: name.to_string(),
        alcoholic: field(IDX_ALCOHOLIC).to_string(),
        category: field(IDX_CATEGORY).to_string(),
        ingredients,
        instructions: instructions.to_string(),
        glass: field(IDX_GLASS).to_string(),
        iba: field(IDX_IBA).to_string(),
        img_attribution: field(IDX_IMG_ATTRIBUTION).to_string(),
        img_src: field(IDX_IMG_SRC).to_string(),
        tags: field(IDX_TAGS).to_string(),
        thumb: field(IDX_THUMB).to_string(),
        video: field(IDX_VIDEO).to_string(),
        src_date,
        created_at,
        updated_at,
    })
}

/// Emit a `Cocktail` as the 16 columns of a catalog row.
///
/// Fails only if the ingredient list cannot be serialized to JSON.
pub fn emit_row(cocktail: &Cocktail) -> Result<Vec<String>, CodecError> {
    let ingredients = serde_json::to_string(&cocktail.ingredients)?;

    let mut rec = vec![String::new(); COLUMNS];
    rec[IDX_ID] = cocktail.id.to_string();
    rec[IDX_NAME] = cocktail.name.clone();
    rec[IDX_ALCOHOLIC] = cocktail.alcoholic.clone();
    rec[IDX_CATEGORY] = cocktail.category.clone();
    rec[IDX_INGREDIENTS] = ingredients;
    rec[IDX_INSTRUCTIONS] = cocktail.instructions.clone();
    rec[IDX_GLASS] = cocktail.glass.clone();
    rec[IDX_IBA] = cocktail.iba.clone();
    rec[IDX_IMG_ATTRIBUTION] = cocktail.img_attribution.clone();
    rec[IDX_IMG_SRC] = cocktail.img_src.clone();
    rec[IDX_TAGS] = cocktail.tags.clone();
    rec[IDX_THUMB] = cocktail.thumb.clone();
    rec[IDX_VIDEO] = cocktail.video.clone();
    rec[IDX_SRC_DATE] = time::format_date_time(cocktail.src_date);
    rec[IDX_CREATED_AT] = time::format_date_time(cocktail.created_at);
    rec[IDX_UPDATED_AT] = time::format_date_time(cocktail.updated_at);
    Ok(rec)
}

fn parse_timestamp(
    value: &str,
    field: &'static str,
) -> Result<chrono::NaiveDateTime, CodecError> {
    time::parse_date_time(value).map_err(|source| CodecError::Timestamp { field, source })
}

fn join_fields(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

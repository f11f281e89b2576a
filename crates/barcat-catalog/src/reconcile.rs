//! Reconciliation of the upstream snapshot into the local catalog.
//!
//! Per external record, against the current catalog:
//!
//! 1. id unknown locally: insert, stamping `created_at = updated_at = now`.
//! 2. known and the external `src_date` is strictly later: replace,
//!    keeping the local `created_at` and stamping `updated_at = now`.
//! 3. known, `src_date` equal, but any compared field differs: replace the
//!    same way.
//! 4. otherwise: leave the record alone.
//!
//! Local records the snapshot does not mention are always preserved; a
//! reconciliation pass never deletes. The file is rewritten only when at
//! least one insert or replacement happened.

use chrono::Utc;
use tracing::{debug, info};

use barcat_common::{time, Cocktail, Ingredient, OpsSummary};

use crate::error::Result;
use crate::store::CatalogStore;

/// Summary status when the pass changed the catalog.
pub const STATUS_UPDATED: &str = "database updated successfully";

/// Summary status when nothing changed and no write was performed.
pub const STATUS_NO_CHANGES: &str = "no changes";

/// Run one reconciliation pass and report what happened.
///
/// The first error from any sub-operation aborts the pass; partial
/// progress is discarded.
pub async fn reconcile(store: &CatalogStore) -> Result<OpsSummary> {
    let mut records = store.read_all().await?;
    let external = store.fetch_snapshot().await?;

    let start = Utc::now();
    let mut new_recs = 0usize;
    let mut modified_recs = 0usize;

    for mut rec in external {
        match records.iter().position(|c| c.id == rec.id) {
            None => {
                rec.created_at = time::now_utc();
                rec.updated_at = rec.created_at;
                debug!(id = rec.id, name = %rec.name, "inserting record");
                records.push(rec);
                new_recs += 1;
            },
            Some(index) => {
                let local = &records[index];
                let supersedes = rec.src_date > local.src_date;
                if supersedes || (rec.src_date == local.src_date && !content_eq(&rec, local)) {
                    rec.created_at = local.created_at;
                    rec.updated_at = time::now_utc();
                    debug!(id = rec.id, name = %rec.name, supersedes, "replacing record");
                    records[index] = rec;
                    modified_recs += 1;
                }
            },
        }
    }

    let total_ops = new_recs + modified_recs;
    let status = if total_ops > 0 {
        store.replace_all(&records).await?;
        STATUS_UPDATED
    } else {
        STATUS_NO_CHANGES
    };

    let end = Utc::now();
    let duration = (end - start).to_std().unwrap_or_default();
    info!(status, new_recs, modified_recs, total = records.len(), "reconciliation finished");

    Ok(OpsSummary {
        status: status.to_string(),
        start_time: start,
        end_time: end,
        duration: format!("{duration:?}"),
        new_recs,
        modified_recs,
        total_ops,
        total_recs: records.len(),
    })
}

/// Field equality for the replace decision.
///
/// Compares every field except id, `src_date` and the provenance stamps.
/// The ingredient comparison is set-style: equal lengths and every element
/// of `a` appearing somewhere in `b`, so a pure reordering does not count
/// as a change.
fn content_eq(a: &Cocktail, b: &Cocktail) -> bool {
    a.name == b.name
        && a.alcoholic == b.alcoholic
        && a.category == b.category
        && a.instructions == b.instructions
        && a.glass == b.glass
        && a.iba == b.iba
        && a.img_attribution == b.img_attribution
        && a.img_src == b.img_src
        && a.tags == b.tags
        && a.thumb == b.thumb
        && a.video == b.video
        && ingredients_eq(&a.ingredients, &b.ingredients)
}

fn ingredients_eq(a: &[Ingredient], b: &[Ingredient]) -> bool {
    a.len() == b.len() && a.iter().all(|ingredient| b.contains(ingredient))
}

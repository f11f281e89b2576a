//! Catalog reconciliation report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one reconciliation pass over the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpsSummary {
    /// `"database updated successfully"` when at least one record was
    /// inserted or modified, `"no changes"` otherwise.
    pub status: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Human-readable elapsed time, e.g. `"1.532ms"`.
    pub duration: String,
    pub new_recs: usize,
    pub modified_recs: usize,
    pub total_ops: usize,
    /// Record count in the catalog after the pass.
    pub total_recs: usize,
}

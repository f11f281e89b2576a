//! The catalog data plane: codecs between the tabular row, the upstream
//! snapshot record and the domain entity; the flat-file store with its
//! bounded concurrent reader; and the snapshot reconciliation pass.

pub mod codec;
pub mod error;
pub mod reconcile;
pub mod store;

pub use error::{CatalogError, CsvError, DataApiError, InvalidWorkerArgs};
pub use store::CatalogStore;

//! The catalog store: a flat CSV file plus the upstream snapshot endpoint.
//!
//! The file is headerless with the 16-column layout of [`crate::codec::row`].
//! Every read parses row by row, dropping (and logging) records that fail
//! the codec; file-level failures surface as [`CsvError`].

mod pool;

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use barcat_common::Cocktail;

use crate::codec::row::{emit_row, parse_row};
use crate::codec::snapshot::DrinksEnvelope;
use crate::error::{CsvError, DataApiError, Result};

/// Handle to the catalog file and the snapshot endpoint.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
    snapshot_url: String,
    client: reqwest::Client,
}

impl CatalogStore {
    /// Open a store over `path`, backed by the snapshot endpoint at
    /// `snapshot_url`.
    ///
    /// Creates the data directory and an empty catalog file when missing
    /// (an existing file is left untouched), and probes the endpoint with
    /// a GET that must answer 200. A failed probe fails construction.
    pub async fn connect(
        path: impl Into<PathBuf>,
        snapshot_url: impl Into<String>,
    ) -> Result<Self> {
        let path = path.into();
        let snapshot_url = snapshot_url.into();
        let client = reqwest::Client::new();

        probe_endpoint(&client, &snapshot_url).await?;
        create_catalog_file(&path).map_err(CsvError::Io)?;

        debug!(path = %path.display(), snapshot_url = %snapshot_url, "catalog store ready");
        Ok(Self {
            path,
            snapshot_url,
            client,
        })
    }

    /// The catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record of the catalog, in source order.
    ///
    /// Rows that cannot be read or parsed are logged and skipped.
    pub async fn read_all(&self) -> Result<Vec<Cocktail>> {
        let file = File::open(&self.path).map_err(|err| {
            error!(error = %err, path = %self.path.display(), "open catalog file failed");
            CsvError::Io(err)
        })?;

        let mut reader = csv_reader(file);
        let mut cocktails = Vec::new();
        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    warn!(error = %err, "unreadable catalog row skipped");
                    continue;
                },
            };
            match parse_row(&record) {
                Ok(cocktail) => cocktails.push(cocktail),
                Err(err) => {
                    error!(error = %err, record = ?record, "row parse failed, skipped");
                },
            }
        }

        Ok(cocktails)
    }

    /// Fetch the upstream snapshot and parse it into catalog records.
    ///
    /// Records that fail the snapshot codec are logged and skipped.
    pub async fn fetch_snapshot(&self) -> Result<Vec<Cocktail>> {
        let response = self
            .client
            .get(&self.snapshot_url)
            .send()
            .await
            .map_err(DataApiError::Request)?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            error!(code = status.as_u16(), "snapshot fetch: bad status code, expected 200");
            return Err(DataApiError::InvalidResponseCode(status.as_u16()).into());
        }

        let body = response.text().await.map_err(DataApiError::Request)?;
        let envelope: DrinksEnvelope =
            serde_json::from_str(&body).map_err(DataApiError::Decode)?;

        let mut cocktails = Vec::new();
        for (line, drink) in envelope.drinks.iter().enumerate() {
            match drink.parse() {
                Ok(cocktail) => cocktails.push(cocktail),
                Err(err) => {
                    error!(
                        error = %err,
                        line = line + 1,
                        id = %drink.id,
                        name = %drink.name,
                        "snapshot record parse failed, skipped"
                    );
                },
            }
        }

        Ok(cocktails)
    }

    /// Replace the catalog file contents with the given records.
    ///
    /// The file is truncated in place. A record whose emit fails is logged
    /// and dropped without aborting the write; an I/O failure aborts the
    /// whole call.
    pub async fn replace_all(&self, records: &[Cocktail]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|err| {
                error!(error = %err, path = %self.path.display(), "open catalog file for rewrite failed");
                CsvError::Io(err)
            })?;

        let mut writer = csv::Writer::from_writer(file);
        for (index, cocktail) in records.iter().enumerate() {
            let row = match emit_row(cocktail) {
                Ok(row) => row,
                Err(err) => {
                    error!(
                        error = %err,
                        index,
                        id = cocktail.id,
                        name = %cocktail.name,
                        "emit failed, record discarded"
                    );
                    continue;
                },
            };
            if let Err(err) = writer.write_record(&row) {
                error!(error = %err, index, id = cocktail.id, "write failed, record discarded");
            }
        }

        writer.flush().map_err(CsvError::Io)?;
        Ok(())
    }
}

fn csv_reader<R: std::io::Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr)
}

/// GET the endpoint and require a 200 answer.
async fn probe_endpoint(client: &reqwest::Client, url: &str) -> Result<()> {
    let response = client.get(url).send().await.map_err(DataApiError::Request)?;
    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(DataApiError::InvalidResponseCode(status.as_u16()).into());
    }
    Ok(())
}

/// Create the data directory and catalog file when missing.
fn create_catalog_file(path: &Path) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    OpenOptions::new().append(true).create(true).open(path)?;
    Ok(())
}

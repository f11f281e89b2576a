//! Bounded concurrent catalog reader.
//!
//! A single producer reads raw rows off the file and feeds a bounded
//! `jobs` channel; `ceil(job_budget / per_worker)` workers parse and
//! filter, pushing matches onto a bounded `results` channel that the
//! calling task drains. Both channels hold at most `job_budget` items, so
//! a balanced run never parks on send.

use std::fs::File;
use std::sync::Arc;

use csv::StringRecord;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, warn};

use barcat_common::{Cocktail, NumericClass};

use crate::codec::row::parse_row;
use crate::error::{CsvError, InvalidWorkerArgs, Result};

use super::{csv_reader, CatalogStore};

impl CatalogStore {
    /// Read up to `job_budget` rows through a worker pool, keeping the
    /// records whose id belongs to `class`.
    ///
    /// `per_worker` is the number of receives a single worker attempts
    /// before exiting; it must be between 1 and `job_budget`. Rows that
    /// fail to read or parse are logged and dropped. The returned order is
    /// unspecified: workers race.
    ///
    /// Every task spawned here is joined before the call returns.
    pub async fn read_bounded(
        &self,
        class: NumericClass,
        job_budget: usize,
        per_worker: usize,
    ) -> Result<Vec<Cocktail>> {
        let file = File::open(&self.path).map_err(|err| {
            error!(error = %err, path = %self.path.display(), "open catalog file failed");
            CsvError::Io(err)
        })?;

        if job_budget == 0 || per_worker == 0 || per_worker > job_budget {
            return Err(CsvError::from(InvalidWorkerArgs {
                job_budget,
                per_worker,
            })
            .into());
        }

        let workers = job_budget.div_ceil(per_worker);
        debug!(%class, job_budget, per_worker, workers, "bounded read starting");

        let (jobs_tx, jobs_rx) = mpsc::channel::<StringRecord>(job_budget);
        let (results_tx, mut results_rx) = mpsc::channel::<Cocktail>(job_budget);
        let jobs_rx = Arc::new(Mutex::new(jobs_rx));

        // All workers are launched before the first row is produced. The
        // results channel closes once the last worker drops its sender.
        let mut worker_handles = Vec::with_capacity(workers);
        for id in 0..workers {
            worker_handles.push(tokio::spawn(run_worker(
                id,
                class,
                per_worker,
                Arc::clone(&jobs_rx),
                results_tx.clone(),
            )));
        }
        drop(results_tx);

        let producer =
            tokio::task::spawn_blocking(move || produce_jobs(file, job_budget, jobs_tx));

        let mut cocktails = Vec::new();
        for _ in 0..job_budget {
            match results_rx.recv().await {
                Some(cocktail) => cocktails.push(cocktail),
                None => break,
            }
        }

        producer.await.map_err(CsvError::Task)?;
        for handle in worker_handles {
            handle.await.map_err(CsvError::Task)?;
        }

        Ok(cocktails)
    }
}

/// Read raw rows sequentially and push them onto `jobs`, stopping at the
/// budget or end of file. Unreadable rows are skipped and do not count.
fn produce_jobs(file: File, job_budget: usize, jobs: mpsc::Sender<StringRecord>) {
    let mut reader = csv_reader(file);
    let mut records = reader.records();
    let mut sent = 0usize;

    while sent < job_budget {
        match records.next() {
            None => break,
            Some(Ok(record)) => {
                if jobs.blocking_send(record).is_err() {
                    // every worker is gone; nothing left to feed
                    break;
                }
                sent += 1;
            },
            Some(Err(err)) => {
                warn!(error = %err, "unreadable catalog row skipped");
            },
        }
    }
    // dropping the sender closes the jobs channel
}

/// Attempt up to `per_worker` receives; parse each row and forward the
/// records whose id matches `class`. Exits early when `jobs` closes, and
/// never retries once its quota is spent.
async fn run_worker(
    id: usize,
    class: NumericClass,
    per_worker: usize,
    jobs: Arc<Mutex<mpsc::Receiver<StringRecord>>>,
    results: mpsc::Sender<Cocktail>,
) {
    for _ in 0..per_worker {
        let job = { jobs.lock().await.recv().await };
        let Some(record) = job else { break };

        match parse_row(&record) {
            Ok(cocktail) => {
                if class.matches(cocktail.id) && results.send(cocktail).await.is_err() {
                    break;
                }
            },
            Err(err) => {
                error!(worker = id, error = %err, record = ?record, "row parse failed, skipped");
            },
        }
    }
}

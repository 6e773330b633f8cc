use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::EnrichConfig;
use crate::core::lookup::{LookupOutcome, MovieLookup};
use crate::core::table::{Table, Value};
use crate::utils::MovieDataResult;

pub const ID_COLUMN: &str = "id_x";
pub const GENRE_COLUMN: &str = "primary_genre";
pub const FRANCHISE_COLUMN: &str = "franchise";
pub const COLLECTION_COLUMN: &str = "collection";

/// Written into the genre column when no genre could be determined.
pub const GENRE_NOT_FOUND: &str = "not found";

#[derive(Debug, Clone)]
pub struct EnrichOptions {
    pub concurrency: usize,
    pub skip_existing: bool,
    pub record_failures: bool,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            skip_existing: false,
            record_failures: true,
        }
    }
}

impl From<&EnrichConfig> for EnrichOptions {
    fn from(cfg: &EnrichConfig) -> Self {
        Self {
            concurrency: cfg.concurrency,
            skip_existing: cfg.skip_existing,
            record_failures: cfg.record_failures,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    pub looked_up: usize,
    pub found: usize,
    pub absent: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl EnrichReport {
    fn record<T>(&mut self, outcome: &LookupOutcome<T>) {
        self.looked_up += 1;
        match outcome {
            LookupOutcome::Found(_) => self.found += 1,
            LookupOutcome::ConfirmedAbsent => self.absent += 1,
            LookupOutcome::Failed(_) => self.failed += 1,
        }
    }
}

pub struct Enricher {
    lookup: Arc<dyn MovieLookup>,
    options: EnrichOptions,
}

impl Enricher {
    pub fn new(lookup: Arc<dyn MovieLookup>, options: EnrichOptions) -> Self {
        Self { lookup, options }
    }

    /// Look up a genre for every row whose genre is empty.
    pub async fn fill_missing_genres(&self, table: &mut Table) -> MovieDataResult<EnrichReport> {
        let id_col = table.column_index(ID_COLUMN)?;
        let genre_col = table.column_index(GENRE_COLUMN)?;

        let mut report = EnrichReport::default();
        let mut jobs = Vec::new();
        for (row, cells) in table.rows().enumerate() {
            if !cells[genre_col].is_null() {
                continue;
            }
            match cells[id_col].as_identifier() {
                Some(id) => jobs.push((row, id)),
                None => report.skipped += 1,
            }
        }

        let record_failures = self.options.record_failures;
        self.run_lookups(
            jobs,
            |lookup, id| async move { lookup.fetch_genre(&id).await },
            |row, id, outcome| {
                report.record(&outcome);
                let genre = match outcome {
                    LookupOutcome::Found(genre) => genre,
                    LookupOutcome::ConfirmedAbsent => GENRE_NOT_FOUND.to_string(),
                    LookupOutcome::Failed(_) if record_failures => GENRE_NOT_FOUND.to_string(),
                    LookupOutcome::Failed(_) => {
                        info!("Could not find genre for movie_id {id}, leaving it empty");
                        return;
                    }
                };
                info!("Updated genre for movie_id {id}: {genre}");
                table.set(row, genre_col, Value::Text(genre));
            },
        )
        .await?;

        info!(
            "Genre pass done: {} looked up, {} found, {} without genre, {} failed, {} skipped",
            report.looked_up, report.found, report.absent, report.failed, report.skipped
        );
        Ok(report)
    }

    /// Look up franchise membership for every row with an identifier.
    pub async fn fill_franchise_info(&self, table: &mut Table) -> MovieDataResult<EnrichReport> {
        let id_col = table.column_index(ID_COLUMN)?;
        let franchise_col = table.ensure_column(FRANCHISE_COLUMN);
        let collection_col = table.ensure_column(COLLECTION_COLUMN);

        let mut report = EnrichReport::default();
        let mut jobs = Vec::new();
        for (row, cells) in table.rows().enumerate() {
            let Some(id) = cells[id_col].as_identifier() else {
                report.skipped += 1;
                continue;
            };
            if self.options.skip_existing && !cells[franchise_col].is_null() {
                report.skipped += 1;
                continue;
            }
            jobs.push((row, id));
        }

        let record_failures = self.options.record_failures;
        self.run_lookups(
            jobs,
            |lookup, id| async move { lookup.fetch_franchise(&id).await },
            |row, id, outcome| {
                report.record(&outcome);
                let (franchise, collection) = match outcome {
                    LookupOutcome::Found(name) => (true, Value::Text(name)),
                    LookupOutcome::ConfirmedAbsent => (false, Value::Null),
                    LookupOutcome::Failed(_) if record_failures => (false, Value::Null),
                    LookupOutcome::Failed(_) => {
                        info!("Could not fetch franchise info for movie_id {id}, leaving row as is");
                        return;
                    }
                };
                info!("Updated movie_id {id}: Franchise: {franchise}, Collection: {collection}");
                table.set(row, franchise_col, Value::Bool(franchise));
                table.set(row, collection_col, collection);
            },
        )
        .await?;

        info!(
            "Franchise pass done: {} looked up, {} in a collection, {} standalone, {} failed, {} skipped",
            report.looked_up, report.found, report.absent, report.failed, report.skipped
        );
        Ok(report)
    }

    /// Issue lookups in job order with at most `concurrency` in flight, handing
    /// each outcome to `apply` as soon as every earlier job has been applied.
    async fn run_lookups<T, F, Fut, A>(
        &self,
        jobs: Vec<(usize, String)>,
        fetch: F,
        mut apply: A,
    ) -> MovieDataResult<()>
    where
        T: Send + 'static,
        F: Fn(Arc<dyn MovieLookup>, String) -> Fut,
        Fut: Future<Output = LookupOutcome<T>> + Send + 'static,
        A: FnMut(usize, String, LookupOutcome<T>),
    {
        let limit = self.options.concurrency.max(1);
        debug!("Running {} lookups with up to {} in flight", jobs.len(), limit);

        let mut in_flight = JoinSet::new();
        let mut ready = ReadyQueue::default();
        for (seq, (row, id)) in jobs.into_iter().enumerate() {
            while in_flight.len() >= limit {
                if let Some(done) = in_flight.join_next().await {
                    ready.push(done?, &mut apply);
                }
            }
            let pending = fetch(Arc::clone(&self.lookup), id.clone());
            in_flight.spawn(async move { (seq, row, id, pending.await) });
        }
        while let Some(done) = in_flight.join_next().await {
            ready.push(done?, &mut apply);
        }
        Ok(())
    }
}

/// Completed lookups waiting for earlier jobs to finish.
struct ReadyQueue<T> {
    next: usize,
    waiting: BTreeMap<usize, (usize, String, LookupOutcome<T>)>,
}

impl<T> Default for ReadyQueue<T> {
    fn default() -> Self {
        Self { next: 0, waiting: BTreeMap::new() }
    }
}

impl<T> ReadyQueue<T> {
    fn push<A>(&mut self, done: (usize, usize, String, LookupOutcome<T>), apply: &mut A)
    where
        A: FnMut(usize, String, LookupOutcome<T>),
    {
        let (seq, row, id, outcome) = done;
        self.waiting.insert(seq, (row, id, outcome));
        while let Some((row, id, outcome)) = self.waiting.remove(&self.next) {
            apply(row, id, outcome);
            self.next += 1;
        }
    }
}

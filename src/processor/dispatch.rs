//! Parallel dispatch of per-record work
//!
//! Fans a blocking worker function out over a bounded pool and joins the
//! results into one identifier keyed mapping once every item is done.

use crate::constants::{PROGRESS_CHARS, PROGRESS_TEMPLATE};
use crate::error::{Result, StratifyError};

use futures::stream::{self, StreamExt, TryStreamExt};
use indexmap::IndexMap;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::task;
use tracing::{debug, error};

/// Bounded worker pool for per-record extraction
#[derive(Debug, Clone)]
pub struct ParallelDispatcher {
    concurrency: usize,
    show_progress: bool,
}

impl ParallelDispatcher {
    /// Create a dispatcher running at most `concurrency` workers at once
    pub fn new(concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(StratifyError::configuration(
                "worker pool size must be at least 1",
            ));
        }

        Ok(Self {
            concurrency,
            show_progress: false,
        })
    }

    /// Show a progress bar while dispatching
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `worker` once per item and join the results by identifier.
    ///
    /// Workers run on the blocking thread pool with no shared state. Results
    /// arrive in completion order and are inserted as they come, so a
    /// duplicate identifier keeps whichever result finished last. The first
    /// failure stops the dispatch and is returned.
    pub async fn dispatch<L, T, F>(
        &self,
        items: Vec<(String, L)>,
        worker: F,
    ) -> Result<IndexMap<String, T>>
    where
        L: Send + 'static,
        T: Send + 'static,
        F: Fn(String, L) -> Result<(String, T)> + Send + Sync + 'static,
    {
        let total = items.len();
        let pb = self.progress_bar(total);
        let worker = Arc::new(worker);

        debug!(
            "Dispatching {} items across {} workers",
            total, self.concurrency
        );

        let result = stream::iter(items)
            .map(|(id, locator)| {
                let worker = Arc::clone(&worker);
                let pb = pb.clone();
                async move {
                    let outcome = task::spawn_blocking(move || worker(id, locator))
                        .await
                        .map_err(|e| StratifyError::WorkerFailed {
                            reason: e.to_string(),
                        })?;
                    pb.inc(1);
                    outcome
                }
            })
            .buffer_unordered(self.concurrency)
            .try_fold(
                IndexMap::with_capacity(total),
                |mut joined, (id, value)| async move {
                    joined.insert(id, value);
                    Ok(joined)
                },
            )
            .await;

        match &result {
            Ok(joined) => {
                pb.finish_with_message("All records extracted");
                debug!("Joined {} results from {} items", joined.len(), total);
            }
            Err(e) => {
                pb.abandon_with_message("Extraction aborted");
                error!("Dispatch aborted: {:#}", e);
            }
        }

        result
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            pb.set_style(style.progress_chars(PROGRESS_CHARS));
        }
        pb.set_message("Extracting taxonomy");
        pb
    }
}

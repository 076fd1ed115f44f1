//! Batch aggregation for independent parallel calls.
//!
//! Dashboard-style callers fetch several resources at once and must not let
//! one failed sub-request block the others. [`settle`] runs every future to
//! completion, preserves input order, and lets the caller classify the batch
//! to pick user-facing messaging.

use crate::Result;
use futures::future::join_all;
use std::future::Future;

/// Outcome classification of a settled batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    AllSucceeded,
    SomeFailed,
    AllFailed,
}

impl BatchStatus {
    /// Classification from success/failure counts. An empty batch counts as
    /// all-succeeded.
    pub fn from_counts(ok: usize, failed: usize) -> Self {
        if failed == 0 {
            BatchStatus::AllSucceeded
        } else if ok == 0 {
            BatchStatus::AllFailed
        } else {
            BatchStatus::SomeFailed
        }
    }
}

/// Results of a settled batch, in input order.
#[derive(Debug)]
pub struct Settled<T> {
    pub results: Vec<Result<T>>,
}

impl<T> Settled<T> {
    pub fn status(&self) -> BatchStatus {
        let ok = self.results.iter().filter(|r| r.is_ok()).count();
        BatchStatus::from_counts(ok, self.results.len() - ok)
    }

    /// Successful values, in input order.
    pub fn oks(self) -> Vec<T> {
        self.results.into_iter().filter_map(|r| r.ok()).collect()
    }

    /// Errors from failed entries, in input order.
    pub fn errors(&self) -> Vec<&crate::Error> {
        self.results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .collect()
    }
}

/// Run every future to completion concurrently. No failure aborts the batch
/// and no error escapes the combinator; each outcome is observed
/// independently through [`Settled`].
pub async fn settle<T, F>(futures: Vec<F>) -> Settled<T>
where
    F: Future<Output = Result<T>>,
{
    Settled {
        results: join_all(futures).await,
    }
}

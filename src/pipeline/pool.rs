//! Worker pool for read-only, per-card analysis after normalization.
//!
//! Spawns a fixed number of worker threads that pull tasks from a bounded
//! `async-channel` queue sized to the corpus. Each worker owns a clone of
//! the receiver, so no lock is shared between them. Each task carries its
//! own copy of the card; workers never touch the registry. Results come
//! back over a separate bounded channel and are correlated to cards by
//! name, in no particular order.
//!
//! A task that panics, or whose result doesn't fit in the result channel,
//! yields an absent result for that card. The pool always runs every task
//! and joins all workers before results are collected.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use async_channel::TrySendError;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::NormalizerConfig;

/// Worker pool configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Number of worker threads (at least one).
    pub workers: usize,
    /// Result channel capacity (at least one). `None` sizes it to the
    /// corpus.
    pub result_capacity: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            result_capacity: None,
        }
    }
}

impl PoolConfig {
    /// Set the worker count (builder pattern).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the result channel capacity (builder pattern).
    #[must_use]
    pub fn with_result_capacity(mut self, capacity: usize) -> Self {
        self.result_capacity = Some(capacity.max(1));
        self
    }
}

impl From<&NormalizerConfig> for PoolConfig {
    fn from(config: &NormalizerConfig) -> Self {
        PoolConfig::default().with_workers(config.workers)
    }
}

/// One unit of work: a card, by name, with its own copy of the data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisTask {
    pub name: String,
    pub card: Card,
}

impl AnalysisTask {
    #[must_use]
    pub fn new(card: &Card) -> Self {
        Self {
            name: card.name.clone(),
            card: card.clone(),
        }
    }
}

/// The outcome of one task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult<R> {
    /// Name of the card the task ran on.
    pub name: String,
    /// The analysis output, absent on failure.
    pub output: Option<R>,
    /// What went wrong, when `output` is absent.
    pub error: Option<String>,
}

impl<R> TaskResult<R> {
    /// A successful result.
    pub fn ok(name: impl Into<String>, output: R) -> Self {
        Self {
            name: name.into(),
            output: Some(output),
            error: None,
        }
    }

    /// An absent result.
    pub fn absent(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: None,
            error: Some(error.into()),
        }
    }

    /// Did the task produce an output?
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.output.is_some()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn run_task<R, F>(task: &AnalysisTask, analyze: &F) -> TaskResult<R>
where
    F: Fn(&Card) -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(|| analyze(&task.card))) {
        Ok(output) => TaskResult::ok(task.name.clone(), output),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            log::error!("Analysis of {} failed: {}", task.name, message);
            TaskResult::absent(task.name.clone(), message)
        }
    }
}

/// A fixed-size pool of analysis workers.
///
/// ## Example
///
/// ```
/// use cardtext::cards::{Card, CardId};
/// use cardtext::pipeline::{AnalysisPool, PoolConfig};
///
/// let cards = vec![
///     Card::new(CardId::new(0), "Opt", "Instant").with_rules("Scry 1.\nDraw a card."),
///     Card::new(CardId::new(1), "Juggernaut", "Artifact Creature"),
/// ];
/// let pool = AnalysisPool::new(PoolConfig::default().with_workers(2));
/// let results = pool.run(&cards, |card| card.rules_lines().count());
///
/// assert_eq!(results.len(), 2);
/// assert!(results.iter().all(|r| r.is_ok()));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalysisPool {
    config: PoolConfig,
}

impl AnalysisPool {
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }

    /// Run `analyze` over every card and return one result per card.
    pub fn run<R, F>(&self, cards: &[Card], analyze: F) -> Vec<TaskResult<R>>
    where
        R: Send,
        F: Fn(&Card) -> R + Sync,
    {
        let total = cards.len();
        if total == 0 {
            return Vec::new();
        }

        let (work_tx, work_rx) = async_channel::bounded::<AnalysisTask>(total);
        for card in cards {
            if work_tx.send_blocking(AnalysisTask::new(card)).is_err() {
                break;
            }
        }
        // Closing the queue lets workers exit once it drains.
        drop(work_tx);

        let capacity = self.config.result_capacity.unwrap_or(total).max(1);
        let (result_tx, result_rx) = async_channel::bounded::<TaskResult<R>>(capacity);
        let workers = self.config.workers.clamp(1, total);
        log::debug!("Analyzing {} cards on {} workers", total, workers);

        thread::scope(|scope| {
            for _ in 0..workers {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let analyze = &analyze;
                scope.spawn(move || {
                    while let Ok(task) = work_rx.recv_blocking() {
                        match result_tx.try_send(run_task(&task, analyze)) {
                            Ok(()) => {}
                            Err(TrySendError::Full(result)) => {
                                log::error!("Result channel full; dropping result for {}", result.name);
                            }
                            Err(TrySendError::Closed(_)) => break,
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut results: Vec<TaskResult<R>> = std::iter::from_fn(|| result_rx.try_recv().ok()).collect();
        let returned: FxHashSet<String> = results.iter().map(|r| r.name.clone()).collect();
        for card in cards {
            if !returned.contains(&card.name) {
                results.push(TaskResult::absent(card.name.clone(), "result channel full"));
            }
        }
        results
    }
}

//! Corpus processing.
//!
//! ## Key Types
//!
//! - `CorpusPipeline`: Normalizes every legal card, one at a time
//! - `AnalysisPool`: Runs read-only per-card analysis on worker threads
//! - `ProgressReporter`: Observes the corpus run
//!
//! ## Threading
//!
//! Normalization is single-threaded. Token names discovered on one card
//! must be visible when later cards are normalized, and the registry is
//! borrowed mutably for the whole run. Only analysis of already
//! normalized text fans out to the pool, and its results are merged back
//! by the caller with [`CardRegistry::merge_results`].

pub mod pool;
pub mod progress;

pub use pool::{AnalysisPool, AnalysisTask, PoolConfig, TaskResult};
pub use progress::{BarProgress, LogProgress, ProgressIter, ProgressReporter, SilentProgress};

use crate::cards::{Card, CardId, CardRegistry};
use crate::config::NormalizerConfig;
use crate::text::Normalizer;

/// Counts from one corpus run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    /// Cards processed.
    pub cards: usize,
    /// Cards whose rules text changed.
    pub changed: usize,
    /// Token names discovered during the run.
    pub new_names: usize,
}

/// Drives normalization across a registry.
///
/// ## Example
///
/// ```
/// use cardtext::cards::{CardRegistry, RawRecord};
/// use cardtext::config::NormalizerConfig;
/// use cardtext::pipeline::{CorpusPipeline, SilentProgress};
///
/// let mut registry = CardRegistry::new();
/// registry
///     .ingest(&RawRecord::new("Juggernaut", "Artifact Creature").with_rules("Juggernaut attacks each combat if able."))
///     .unwrap();
///
/// let pipeline = CorpusPipeline::new(NormalizerConfig::default());
/// let summary = pipeline.run(&mut registry, &SilentProgress);
///
/// assert_eq!(summary.changed, 1);
/// assert_eq!(
///     registry.get_by_name("Juggernaut").unwrap().rules,
///     "SELF attacks each combat if able."
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct CorpusPipeline {
    config: NormalizerConfig,
}

impl CorpusPipeline {
    #[must_use]
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// The pipeline's configuration.
    #[must_use]
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize every legal card's rules text in place, in registration
    /// order.
    pub fn run(&self, registry: &mut CardRegistry, reporter: &dyn ProgressReporter) -> CorpusSummary {
        let ids = registry.legal_cards(&self.config);
        let total = ids.len();
        let named: Vec<(CardId, String)> = ids
            .into_iter()
            .filter_map(|id| registry.get(id).map(|c| (id, c.name.clone())))
            .collect();
        let names_before = registry.name_count();
        log::info!("Processing {} cards for card names", total);

        let mut summary = CorpusSummary::default();
        let mut normalizer = Normalizer::new(registry, &self.config);
        for id in ProgressIter::new(named.into_iter(), total, reporter) {
            match normalizer.normalize_card(id) {
                Ok(changed) => {
                    summary.cards += 1;
                    if changed {
                        summary.changed += 1;
                    }
                }
                Err(e) => log::error!("Skipping {}: {}", id, e),
            }
        }
        summary.new_names = registry.name_count() - names_before;

        reporter.on_complete(&format!(
            "Normalized {} cards: {} changed, {} new token names",
            summary.cards, summary.changed, summary.new_names
        ));
        summary
    }

    /// Run read-only analysis over every legal card on the worker pool.
    pub fn analyze<R, F>(&self, registry: &CardRegistry, analyze: F) -> Vec<TaskResult<R>>
    where
        R: Send,
        F: Fn(&Card) -> R + Sync,
    {
        let cards: Vec<Card> = registry
            .legal_cards(&self.config)
            .into_iter()
            .filter_map(|id| registry.get(id).cloned())
            .collect();
        AnalysisPool::new(PoolConfig::from(&self.config)).run(&cards, analyze)
    }
}

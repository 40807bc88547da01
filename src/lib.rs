//! # cardtext
//!
//! Card-name recognition and rules-text normalization for card game
//! corpora.
//!
//! Turns free-form card text into a canonical, tokenizable form: card
//! names become `NAME_*` tokens, a card's references to itself become
//! `SELF`, references to the card granting an ability become `PARENT`,
//! reminder text is stripped and prose is lowercased.
//!
//! ## Design Principles
//!
//! 1. **Explicit Registry**: All name knowledge lives in one
//!    `CardRegistry`, passed by reference to whatever needs it. There is
//!    no process-wide state.
//!
//! 2. **Dictionary Only**: Names are recognized using the registry, a few
//!    word lists from `NormalizerConfig`, and position. No language model.
//!
//! 3. **Best Effort**: Corpus data is inconsistent. Bad links, unknown
//!    rarities and uninterpretable names are logged and recovered from;
//!    only API misuse returns an error.
//!
//! ## Modules
//!
//! - `cards`: Card data, ingestion records, multi-face links, registry
//! - `text`: Reminder stripping, name candidates, resolution,
//!   substitution, SELF/PARENT rewriting, capitalization
//! - `pipeline`: Corpus run, progress reporting, analysis worker pool
//! - `config`: Word lists and policies
//! - `error`: Crate error type

pub mod cards;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod text;

// Re-export commonly used types
pub use crate::cards::{
    construct_uname, Card, CardId, CardRegistry, LinkReport, MeldRole, MultiFace, MultiKind,
    RawRecord, SourceCard,
};

pub use crate::config::{FallbackPolicy, NormalizerConfig};

pub use crate::error::{CardTextError, Result};

pub use crate::pipeline::{
    AnalysisPool, CorpusPipeline, CorpusSummary, PoolConfig, ProgressReporter, TaskResult,
};

pub use crate::text::{Normalizer, Resolution, PARENT_TOKEN, SELF_TOKEN};

//! Rules-text normalization.
//!
//! Each line of a card's rules text goes through, in order:
//!
//! 1. Reminder-text stripping
//! 2. Name recognition and substitution (`NAME_` tokens, SELF, PARENT)
//! 3. Capitalization and `non-` hyphenation
//!
//! Name substitution registers newly discovered token names in the
//! registry, so lines and cards must be processed one at a time against a
//! single registry.
//!
//! ## Example
//!
//! ```
//! use cardtext::cards::{CardRegistry, RawRecord};
//! use cardtext::config::NormalizerConfig;
//! use cardtext::text::Normalizer;
//!
//! let mut registry = CardRegistry::new();
//! registry.ingest(&RawRecord::new("Serra Angel", "Creature — Angel")).unwrap();
//! let config = NormalizerConfig::default();
//!
//! let mut normalizer = Normalizer::new(&mut registry, &config);
//! let line = normalizer.normalize_line(
//!     "When Serra Angel enters the battlefield, draw a card. (Reminder.)",
//!     &["Serra Angel".to_string()],
//! );
//! assert_eq!(line, "when SELF enters the battlefield, draw a card.");
//! ```

pub mod candidates;
pub mod capitals;
pub mod reminder;
pub mod resolver;
pub mod self_parent;
pub mod substitute;

pub use candidates::{Candidate, NameCandidates};
pub use capitals::{hyphenate_non, normalize_capitals};
pub use reminder::strip_reminder;
pub use resolver::{NameResolver, Resolution};
pub use self_parent::{
    attribute_granted, replace_whole_word, rewrite_self_parent, Attribution, PARENT_TOKEN,
    SELF_TOKEN,
};
pub use substitute::substitute;

use crate::cards::{CardId, CardRegistry};
use crate::config::NormalizerConfig;
use crate::error::{CardTextError, Result};

/// Applies the normalization stages against one registry.
#[derive(Debug)]
pub struct Normalizer<'a> {
    registry: &'a mut CardRegistry,
    config: &'a NormalizerConfig,
}

impl<'a> Normalizer<'a> {
    /// Create a normalizer over a registry.
    pub fn new(registry: &'a mut CardRegistry, config: &'a NormalizerConfig) -> Self {
        Self { registry, config }
    }

    /// The registry being normalized against.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &*self.registry
    }

    /// Normalize one line of a card whose own names are `self_names`.
    pub fn normalize_line(&mut self, line: &str, self_names: &[String]) -> String {
        let text = strip_reminder(line);
        let text = self.rewrite_names(&text, self_names, &[]);
        let text = normalize_capitals(&text);
        hyphenate_non(&text)
    }

    /// Normalize a whole rules text, line by line.
    pub fn normalize_rules(&mut self, rules: &str, self_names: &[String]) -> String {
        let mut lines = Vec::new();
        for line in rules.split('\n') {
            lines.push(self.normalize_line(line, self_names));
        }
        lines.join("\n")
    }

    /// Normalize a registered card's rules text in place.
    /// Returns whether the text changed.
    pub fn normalize_card(&mut self, id: CardId) -> Result<bool> {
        let card = self
            .registry
            .get(id)
            .ok_or_else(|| CardTextError::UnknownCard(id.to_string()))?;
        let self_names = card.self_names();
        let rules = card.rules.clone();

        let normalized = self.normalize_rules(&rules, &self_names);
        let changed = normalized != rules;
        if let Some(card) = self.registry.get_mut(id) {
            card.rules = normalized;
        }
        Ok(changed)
    }
}

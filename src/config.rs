//! Normalizer configuration.
//!
//! Every word list and policy the name scanner relies on lives here, so a
//! corpus with different conventions can be handled without code changes.
//! The defaults describe the printed English card corpus.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Which "bad" candidate to substitute when no candidate fully resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Take the first (longest, most specific) unresolved candidate.
    First,
    /// Take the last generated unresolved candidate.
    #[default]
    Last,
}

/// Configuration for name recognition and corpus normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Phrases after which a card or token name is expected.
    /// Each marker includes its trailing space.
    pub markers: Vec<String>,

    /// Lowercase words that may sit inside a multi-word name
    /// ("Jedit Ojanen of Efrava").
    pub connector_words: Vec<String>,

    /// Coordinating words that may join several names into a list.
    pub list_words: Vec<String>,

    /// Words that mark a quoted ability as granted to another object.
    pub parent_words: Vec<String>,

    /// Candidate choice when nothing resolves.
    pub fallback: FallbackPolicy,

    /// Cards excluded from corpus runs.
    pub excluded_cards: Vec<String>,

    /// Worker threads for post-normalization analysis.
    pub workers: usize,
}

fn strings(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            markers: strings(&["named ", "transforms into "]),
            connector_words: strings(&["of", "from", "to", "in", "on", "the", "a"]),
            list_words: strings(&["and", "or"]),
            parent_words: strings(&["equipped", "enchanted", "fortified", "create", "each"]),
            fallback: FallbackPolicy::Last,
            excluded_cards: strings(&[
                "Chaos Orb",
                "Falling Star",
                "Tempest Efreet",
                "Timmerian Fiends",
            ]),
            workers: 4,
        }
    }
}

impl NormalizerConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a name-introducing marker (e.g. `"create "`).
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    /// Set the fallback policy.
    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Replace the excluded-card list.
    #[must_use]
    pub fn with_excluded(mut self, names: Vec<String>) -> Self {
        self.excluded_cards = names;
        self
    }

    /// Set the analysis worker count (at least one).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Is this a connector word that may appear inside a name?
    #[must_use]
    pub fn is_connector(&self, word: &str) -> bool {
        self.connector_words.iter().any(|w| w == word)
    }

    /// Is this a list-forming word (`and`/`or`)?
    #[must_use]
    pub fn is_list_word(&self, word: &str) -> bool {
        self.list_words.iter().any(|w| w == word)
    }

    /// Does this word mark a granted ability?
    #[must_use]
    pub fn is_parent_word(&self, word: &str) -> bool {
        self.parent_words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    /// Is this card excluded from corpus runs?
    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_cards.iter().any(|n| n == name)
    }
}

//! Candidate selection.
//!
//! A candidate is "good" when every name in it is known, either to the
//! registry or as one of the reserved self/parent names of the current
//! scope. The first good candidate wins; when none is good the configured
//! fallback picks one of the bad ones.

use super::candidates::Candidate;
use crate::cards::CardRegistry;
use crate::config::FallbackPolicy;

/// The outcome of resolving one name run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one candidate resolved.
    Unique(Candidate),
    /// Several candidates resolved; the most specific was chosen.
    Ambiguous {
        chosen: Candidate,
        alternatives: Vec<Candidate>,
    },
    /// Nothing resolved; a best-effort candidate was chosen.
    Fallback(Candidate),
    /// There were no candidates at all.
    Unresolved,
}

impl Resolution {
    /// The chosen names, if any.
    #[must_use]
    pub fn names(&self) -> Option<&Candidate> {
        match self {
            Resolution::Unique(c) | Resolution::Fallback(c) => Some(c),
            Resolution::Ambiguous { chosen, .. } => Some(chosen),
            Resolution::Unresolved => None,
        }
    }

    /// Take the chosen names.
    #[must_use]
    pub fn into_names(self) -> Option<Candidate> {
        match self {
            Resolution::Unique(c) | Resolution::Fallback(c) => Some(c),
            Resolution::Ambiguous { chosen, .. } => Some(chosen),
            Resolution::Unresolved => None,
        }
    }

    /// Did every name in the choice resolve?
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Unique(_) | Resolution::Ambiguous { .. })
    }
}

/// Checks candidates against the known names.
#[derive(Clone, Copy, Debug)]
pub struct NameResolver<'a> {
    registry: &'a CardRegistry,
    reserved: &'a [String],
    fallback: FallbackPolicy,
}

impl<'a> NameResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a CardRegistry, reserved: &'a [String], fallback: FallbackPolicy) -> Self {
        Self {
            registry,
            reserved,
            fallback,
        }
    }

    /// Is this name known in the current scope?
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.reserved.iter().any(|r| r == name) || self.registry.is_known(name)
    }

    /// Pick a grouping from the candidates, in the order given.
    pub fn resolve(&self, candidates: impl IntoIterator<Item = Candidate>) -> Resolution {
        let (good, bad): (Vec<Candidate>, Vec<Candidate>) = candidates
            .into_iter()
            .partition(|c| c.iter().all(|name| self.is_known(name)));

        let mut good = good.into_iter();
        if let Some(chosen) = good.next() {
            let alternatives: Vec<Candidate> = good.collect();
            if alternatives.is_empty() {
                return Resolution::Unique(chosen);
            }
            log::warn!(
                "Multiple name splits possible: {}; {}",
                chosen.join(" / "),
                alternatives
                    .iter()
                    .map(|c| c.join(" / "))
                    .collect::<Vec<_>>()
                    .join("; ")
            );
            return Resolution::Ambiguous {
                chosen,
                alternatives,
            };
        }

        let fallback = match self.fallback {
            FallbackPolicy::First => bad.into_iter().next(),
            FallbackPolicy::Last => bad.into_iter().last(),
        };
        match fallback {
            Some(chosen) => Resolution::Fallback(chosen),
            None => Resolution::Unresolved,
        }
    }
}

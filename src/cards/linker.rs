//! Multi-face linking.
//!
//! Siblings arrive in any order. When a face is registered the linker:
//!
//! 1. Checks the expectations earlier siblings left for it, adopting the
//!    expected link if the face carries none of its own.
//! 2. Derives what each of its own siblings must record in return, and
//!    either checks that against the registered sibling or leaves it
//!    pending until the sibling appears.
//!
//! Disagreements are data-integrity errors: they are logged and recorded,
//! and linking carries on with whatever each face already had.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::definition::{Card, CardId};
use super::multiface::{MeldRole, MultiFace, MultiKind};

/// A link a registered face expects from a face not yet registered.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingLink {
    from: String,
    expected: MultiFace,
}

/// A sibling whose own link disagrees with what another face expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkIssue {
    /// The face whose link disagreed.
    pub card: String,
    /// The face that expected something else.
    pub from: String,
    pub expected: MultiFace,
    pub found: MultiFace,
}

/// Summary of multi-face consistency across the registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    /// Registered faces.
    pub faces: usize,
    /// Physical cards: faces minus back halves and melded results.
    pub physical: usize,
    pub split: usize,
    pub flip: usize,
    pub transform: usize,
    pub meld: usize,
    /// `(card, sibling)` pairs where the sibling never got registered.
    pub dangling: Vec<(String, String)>,
    /// Every disagreement seen while linking.
    pub issues: Vec<LinkIssue>,
}

impl LinkReport {
    /// Did every link resolve symmetrically?
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.dangling.is_empty() && self.issues.is_empty()
    }
}

/// Establishes and validates sibling relationships as faces register.
#[derive(Clone, Debug, Default)]
pub struct MulticardLinker {
    pending: FxHashMap<String, Vec<PendingLink>>,
    issues: Vec<LinkIssue>,
}

impl MulticardLinker {
    /// Create an empty linker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link a newly registered face against its siblings.
    pub fn link(&mut self, id: CardId, cards: &mut [Card], by_name: &FxHashMap<String, CardId>) {
        let name = cards[id.index()].name.clone();

        if let Some(expectations) = self.pending.remove(&name) {
            for pending in expectations {
                self.reconcile(&mut cards[id.index()], &pending.from, pending.expected);
            }
        }

        let expected_links = cards[id.index()].multi.expected_links(&name);
        for (other, expected) in expected_links {
            match by_name.get(&other) {
                Some(&other_id) => {
                    self.reconcile(&mut cards[other_id.index()], &name, expected);
                }
                None => {
                    log::debug!("{}: expecting {} to link back later", name, other);
                    self.pending.entry(other).or_default().push(PendingLink {
                        from: name.clone(),
                        expected,
                    });
                }
            }
        }
    }

    fn reconcile(&mut self, target: &mut Card, from: &str, expected: MultiFace) {
        if target.multi == expected {
            return;
        }
        if target.multi.is_none() {
            log::debug!(
                "Linking {} to {} as {}",
                target.name,
                from,
                expected.kind()
            );
            target.multi = expected;
            return;
        }
        log::error!(
            "Link mismatch: {} expects {} to be {:?}, but it is {:?}",
            from,
            target.name,
            expected,
            target.multi
        );
        self.issues.push(LinkIssue {
            card: target.name.clone(),
            from: from.to_string(),
            expected,
            found: target.multi.clone(),
        });
    }

    /// Names that some face expects but that were never registered.
    #[must_use]
    pub fn pending_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pending.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Disagreements recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[LinkIssue] {
        &self.issues
    }

    /// Build a consistency report over all registered faces.
    #[must_use]
    pub fn report(&self, cards: &[Card], by_name: &FxHashMap<String, CardId>) -> LinkReport {
        let mut report = LinkReport {
            faces: cards.len(),
            issues: self.issues.clone(),
            ..LinkReport::default()
        };
        let mut meld_results = 0;

        for card in cards {
            match card.multitype() {
                MultiKind::None => {}
                MultiKind::Split => report.split += 1,
                MultiKind::Flip => report.flip += 1,
                MultiKind::Transform => report.transform += 1,
                MultiKind::Meld => {
                    report.meld += 1;
                    if matches!(card.multi, MultiFace::Meld(MeldRole::Result { .. })) {
                        meld_results += 1;
                    }
                }
            }
            for other in card.multi.related() {
                if !by_name.contains_key(other) {
                    report.dangling.push((card.name.clone(), other.to_string()));
                }
            }
        }

        report.physical = report.faces
            - report.split / 2
            - report.flip / 2
            - report.transform / 2
            - meld_results;

        log::info!(
            "{} unique physical cards from {} faces: {} split, {} flip, {} transform, {} meld",
            report.physical,
            report.faces,
            report.split / 2,
            report.flip / 2,
            report.transform / 2,
            meld_results
        );
        for (card, other) in &report.dangling {
            log::error!("{} links to {}, which was never registered", card, other);
        }
        report
    }
}

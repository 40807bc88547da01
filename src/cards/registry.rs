//! Card registry: the canonical store of every known name.
//!
//! The `CardRegistry` owns every ingested card plus the name tables the
//! normalizer consults:
//!
//! - name → uname and uname → name (cards and discovered token names)
//! - shortname → full name
//! - set code → card names
//!
//! All tables are append-only. Names discovered during normalization
//! (tokens created by an ability) are added as they are first seen, so a
//! single registry must be threaded through the whole corpus run.

use std::collections::BTreeSet;

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;

use super::attributes::{parse_printings, Printing, Stats};
use super::definition::{construct_uname, Card, CardId};
use super::linker::{LinkIssue, LinkReport, MulticardLinker};
use super::multiface::{MeldRole, MultiFace, MultiKind};
use super::raw::RawRecord;
use super::shortname::shortname_for;
use crate::config::NormalizerConfig;
use crate::error::{CardTextError, Result};
use crate::pipeline::TaskResult;

lazy_static! {
    /// `"Fire // Ice (Ice)"`: both halves, then the face this record is for.
    static ref SPLIT_NAME: Regex = Regex::new(r"^([^/]+) // ([^()]+) \(([^()]+)\)$").unwrap();
    /// `"Bushi Tenderfoot (Kenzo the Hardhearted)"`: sibling, then this face.
    static ref FLIP_NAME: Regex = Regex::new(r"^([^()]+) \(([^()]+)\)$").unwrap();
}

/// Line separating an embedded flip face from the front face's text.
const FLIP_SEPARATOR: &str = "----";

/// Outcome of folding analysis results back into the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub merged: usize,
    /// Tasks that produced no result.
    pub absent: usize,
    /// Results naming a card the registry doesn't have.
    pub unknown: usize,
}

/// Registry of every card and name.
///
/// ## Example
///
/// ```
/// use cardtext::cards::{CardRegistry, RawRecord};
///
/// let mut registry = CardRegistry::new();
/// let id = registry
///     .ingest(&RawRecord::new("Serra Angel", "Creature — Angel").with_sets("LEA-U"))
///     .unwrap();
///
/// assert_eq!(registry.uname_for("Serra Angel"), Some("NAME_Serra_Angel"));
/// assert_eq!(registry.name_for_uname("NAME_Serra_Angel"), Some("Serra Angel"));
/// assert_eq!(registry.get(id).unwrap().name, "Serra Angel");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: Vec<Card>,
    by_name: FxHashMap<String, CardId>,
    names: FxHashMap<String, String>,
    unames: FxHashMap<String, String>,
    shortnames: FxHashMap<String, String>,
    sets: FxHashMap<String, BTreeSet<String>>,
    linker: MulticardLinker,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a card from a raw record and register it.
    ///
    /// Handles the multi-face conventions of raw records: split and flip
    /// naming, explicit `M-type` metadata, and flip faces embedded after a
    /// `----` line (the back face is registered as its own card).
    /// Re-ingesting a record for a known name returns the existing card.
    pub fn ingest(&mut self, raw: &RawRecord) -> Result<CardId> {
        let mut name = raw.name.trim().to_string();
        let mut rules = raw.rules.trim().to_string();
        let mut multi = MultiFace::None;

        if let Some(caps) = SPLIT_NAME.captures(&name) {
            let (first, second, own) = (&caps[1], &caps[2], &caps[3]);
            if own == first || own == second {
                let other = if own == first { second } else { first };
                multi = MultiFace::Split(other.to_string());
                name = own.to_string();
            }
        } else if let Some(caps) = FLIP_NAME.captures(&name) {
            multi = MultiFace::Flip(caps[1].to_string());
            name = caps[2].to_string();
        }

        if multi.is_none() {
            multi = self.multi_from_metadata(&name, raw);
        }

        if multi.is_none() && !self.by_name.contains_key(&name) {
            if let Some((front, back)) = split_embedded_flip(&name, &rules, raw) {
                let back_name = back.name.clone();
                self.ingest(&back)?;
                rules = front;
                multi = MultiFace::Flip(back_name);
            }
        }

        let mut card = Card::new(CardId::new(0), name, raw.typeline.trim())
            .with_cost(raw.cost.trim())
            .with_rules(rules)
            .with_multi(multi);
        if let Some(pt) = &raw.power_toughness {
            card.stats = Some(Stats::PowerToughness(pt.clone()));
        } else if let Some(loyalty) = &raw.loyalty {
            card.stats = Some(Stats::Loyalty(loyalty.clone()));
        }
        card.printings = parse_printings(&card.name, &raw.set_rarity);
        card.shortname = shortname_for(&card.name, &card.typeline);
        if let Some(short) = &card.shortname {
            log::debug!("Shortname for {} set to {}", card.name, short);
        }

        self.register(card)
    }

    fn multi_from_metadata(&self, name: &str, raw: &RawRecord) -> MultiFace {
        let Some(label) = raw.multitype.as_deref() else {
            return MultiFace::None;
        };
        let Some(kind) = MultiKind::from_label(label) else {
            log::error!("{}: unknown multi-face type {:?}", name, label);
            return MultiFace::None;
        };
        match kind {
            MultiKind::None => MultiFace::None,
            MultiKind::Split | MultiKind::Flip | MultiKind::Transform => {
                match raw.multicard.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
                    Some(other) => MultiFace::pair(kind, other).unwrap_or_default(),
                    None => {
                        log::error!("{}: {} card without a linked card", name, kind);
                        MultiFace::None
                    }
                }
            }
            MultiKind::Meld => meld_from_metadata(name, raw),
        }
    }

    /// Register a fully built card.
    ///
    /// A card whose name is already registered with the same type line,
    /// cost and stats is treated as another printing: its printings are
    /// merged and the existing ID is returned. Anything else under a known
    /// name is a `DuplicateName` error.
    pub fn register(&mut self, mut card: Card) -> Result<CardId> {
        if let Some(&id) = self.by_name.get(&card.name) {
            let existing = &self.cards[id.index()];
            let same = existing.typeline == card.typeline
                && existing.cost == card.cost
                && existing.stats == card.stats;
            if !same {
                return Err(CardTextError::DuplicateName { name: card.name });
            }
            log::debug!("Previously saw {}", card.name);
            for printing in card.printings {
                self.add_printing(id, printing);
            }
            return Ok(id);
        }

        let id = CardId::new(self.cards.len() as u32);
        card.id = id;
        card.uname = match self.names.get(&card.name) {
            Some(uname) => uname.clone(),
            None => self.allocate_uname(&card.name),
        };

        if let Some(short) = &card.shortname {
            match self.shortnames.get(short) {
                Some(full) if *full != card.name => {
                    log::debug!("Shortname {} already refers to {}", short, full);
                }
                _ => {
                    self.shortnames.insert(short.clone(), card.name.clone());
                }
            }
        }
        for printing in &card.printings {
            self.sets
                .entry(printing.set.clone())
                .or_default()
                .insert(card.name.clone());
        }

        log::debug!("Registered {} as {}", card.name, card.uname);
        self.by_name.insert(card.name.clone(), id);
        self.cards.push(card);
        self.linker.link(id, &mut self.cards, &self.by_name);
        Ok(id)
    }

    fn add_printing(&mut self, id: CardId, printing: Printing) {
        let card = &mut self.cards[id.index()];
        self.sets
            .entry(printing.set.clone())
            .or_default()
            .insert(card.name.clone());
        if !card.in_set(&printing.set) {
            card.printings.push(printing);
        }
    }

    /// Pick a uname for a new name, keeping the mapping one-to-one even
    /// when two names sanitize to the same identifier.
    fn allocate_uname(&mut self, name: &str) -> String {
        let base = construct_uname(name);
        let mut uname = base.clone();
        let mut n = 2;
        while let Some(other) = self.unames.get(&uname) {
            log::error!("uname {} for {:?} already belongs to {:?}", uname, name, other);
            uname = format!("{}_{}", base, n);
            n += 1;
        }
        self.names.insert(name.to_string(), uname.clone());
        self.unames.insert(uname.clone(), name.to_string());
        uname
    }

    /// Register a name with no card behind it (a token named by another
    /// card's text) and return its uname. Known names return their
    /// existing uname.
    pub fn register_token(&mut self, name: &str) -> String {
        if let Some(uname) = self.uname_for(name) {
            return uname.to_string();
        }
        log::info!("Found token name: {}", name);
        self.allocate_uname(name)
    }

    /// Is this a known card name, shortname or token name?
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.names.contains_key(name) || self.shortnames.contains_key(name)
    }

    /// The uname for a name, shortname or token name.
    #[must_use]
    pub fn uname_for(&self, name: &str) -> Option<&str> {
        self.names
            .get(name)
            .or_else(|| self.shortnames.get(name).and_then(|full| self.names.get(full)))
            .map(String::as_str)
    }

    /// The display name for a uname.
    #[must_use]
    pub fn name_for_uname(&self, uname: &str) -> Option<&str> {
        self.unames.get(uname).map(String::as_str)
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Get a mutable card by ID.
    pub fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.index())
    }

    /// Replace a card's rules text.
    pub fn set_rules(&mut self, name: &str, rules: impl Into<String>) -> Result<()> {
        let id = *self
            .by_name
            .get(name)
            .ok_or_else(|| CardTextError::UnknownCard(name.to_string()))?;
        self.cards[id.index()].rules = rules.into();
        Ok(())
    }

    /// Look up a card by exact name or shortname.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&Card> {
        let id = self
            .by_name
            .get(name)
            .or_else(|| self.shortnames.get(name).and_then(|full| self.by_name.get(full)))?;
        self.get(*id)
    }

    /// Look up a card by its uname.
    #[must_use]
    pub fn get_by_uname(&self, uname: &str) -> Option<&Card> {
        self.name_for_uname(uname).and_then(|name| self.get_by_name(name))
    }

    /// Full name a shortname refers to.
    #[must_use]
    pub fn full_name(&self, shortname: &str) -> Option<&str> {
        self.shortnames.get(shortname).map(String::as_str)
    }

    /// Number of known names, card and token names alike.
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Check if a card with this exact name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards printed in a set, in registration order.
    pub fn cards_in_set<'a>(&'a self, set: &str) -> impl Iterator<Item = &'a Card> + 'a {
        let names = self.sets.get(set);
        self.cards
            .iter()
            .filter(move |c| names.is_some_and(|n| n.contains(&c.name)))
    }

    /// Card names printed in a set.
    #[must_use]
    pub fn set_names(&self, set: &str) -> Option<&BTreeSet<String>> {
        self.sets.get(set)
    }

    /// IDs of every card not excluded by the configuration.
    #[must_use]
    pub fn legal_cards(&self, config: &NormalizerConfig) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| !config.is_excluded(&c.name))
            .map(|c| c.id)
            .collect()
    }

    /// Link disagreements recorded during registration.
    #[must_use]
    pub fn link_issues(&self) -> &[LinkIssue] {
        self.linker.issues()
    }

    /// Check multi-face consistency across the registry.
    #[must_use]
    pub fn verify_links(&self) -> LinkReport {
        for name in self.linker.pending_names() {
            log::error!("{} was referenced as a sibling but never registered", name);
        }
        self.linker.report(&self.cards, &self.by_name)
    }

    /// Fold worker-pool results back into the cards they were computed for.
    pub fn merge_results<R>(
        &mut self,
        results: Vec<TaskResult<R>>,
        mut merge: impl FnMut(&mut Card, R),
    ) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for result in results {
            let Some(output) = result.output else {
                summary.absent += 1;
                continue;
            };
            match self.by_name.get(&result.name) {
                Some(&id) => {
                    merge(&mut self.cards[id.index()], output);
                    summary.merged += 1;
                }
                None => {
                    log::error!("Result for unknown card {}", result.name);
                    summary.unknown += 1;
                }
            }
        }
        summary
    }

    fn subset<'a>(&'a self, ids: Option<&'a [CardId]>) -> Box<dyn Iterator<Item = &'a Card> + 'a> {
        match ids {
            Some(ids) => Box::new(ids.iter().filter_map(move |id| self.get(*id))),
            None => Box::new(self.cards.iter()),
        }
    }

    /// Every `(card name, line)` whose line matches `pattern`
    /// (case-insensitive). Restrict to `ids` when given.
    pub fn search_text(&self, pattern: &str, ids: Option<&[CardId]>) -> Result<Vec<(String, String)>> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(self
            .subset(ids)
            .flat_map(|c| {
                c.rules_lines()
                    .filter(|line| re.is_match(line))
                    .map(move |line| (c.name.clone(), line.to_string()))
            })
            .collect())
    }

    /// Words that appear immediately before `pattern` anywhere in rules text.
    pub fn preceding_words(&self, pattern: &str, ids: Option<&[CardId]>) -> Result<BTreeSet<String>> {
        self.adjacent_words(&format!(r"(?P<word>[\w'-]+) (?:{})", pattern), ids)
    }

    /// Words that appear immediately after `pattern` anywhere in rules text.
    pub fn following_words(&self, pattern: &str, ids: Option<&[CardId]>) -> Result<BTreeSet<String>> {
        self.adjacent_words(&format!(r"(?:{}) (?P<word>[\w'-]+)", pattern), ids)
    }

    fn adjacent_words(&self, pattern: &str, ids: Option<&[CardId]>) -> Result<BTreeSet<String>> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        let mut words = BTreeSet::new();
        for card in self.subset(ids) {
            for caps in re.captures_iter(&card.rules) {
                if let Some(word) = caps.name("word") {
                    words.insert(word.as_str().to_string());
                }
            }
        }
        Ok(words)
    }
}

fn meld_from_metadata(name: &str, raw: &RawRecord) -> MultiFace {
    let pair: Vec<&str> = raw
        .meld_pair
        .as_deref()
        .unwrap_or("")
        .split(" // ")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let melded = raw.melded.as_deref().map(str::trim).filter(|m| !m.is_empty());

    match (melded, pair.as_slice()) {
        (Some(result), [partner]) => MultiFace::Meld(MeldRole::Component {
            partner: (*partner).to_string(),
            result: result.to_string(),
        }),
        (None, [a, b]) => MultiFace::Meld(MeldRole::result(*a, *b)),
        _ => {
            log::error!(
                "{}: malformed meld triple (pair {:?}, melded {:?})",
                name,
                pair,
                melded
            );
            MultiFace::None
        }
    }
}

/// Split out a flip face embedded after a `----` line.
///
/// Returns the front face's remaining rules and the back face's record.
fn split_embedded_flip(name: &str, rules: &str, raw: &RawRecord) -> Option<(String, RawRecord)> {
    let at = rules.find(FLIP_SEPARATOR)?;
    let front = rules[..at].trim().to_string();
    let mut lines = rules[at + FLIP_SEPARATOR.len()..]
        .trim()
        .lines()
        .map(str::trim);

    let back_lines: Vec<&str> = lines.by_ref().take(3).collect();
    if back_lines.len() < 3 {
        log::error!(
            "Expected flip card for {} but only {} lines found",
            name,
            back_lines.len()
        );
        return None;
    }
    let back_rules: Vec<&str> = lines.collect();
    let back = RawRecord {
        name: back_lines[0].to_string(),
        typeline: back_lines[1].to_string(),
        power_toughness: Some(back_lines[2].to_string()).filter(|p| !p.is_empty()),
        rules: back_rules.join("\n"),
        set_rarity: raw.set_rarity.clone(),
        multitype: Some(MultiKind::Flip.label().to_string()),
        multicard: Some(name.to_string()),
        ..RawRecord::default()
    };
    Some((front, back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rarity;

    fn record(name: &str, typeline: &str) -> RawRecord {
        RawRecord::new(name, typeline)
    }

    #[test]
    fn test_ingest_and_lookup() {
        let mut registry = CardRegistry::new();
        let id = registry
            .ingest(&record("Serra Angel", "Creature — Angel").with_sets("LEA-U, 10E-U"))
            .unwrap();

        let card = registry.get(id).unwrap();
        assert_eq!(card.name, "Serra Angel");
        assert_eq!(card.printings[0].rarity, Some(Rarity::Uncommon));
        assert!(registry.contains("Serra Angel"));
        assert!(registry.get_by_uname("NAME_Serra_Angel").is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reingest_returns_existing_and_merges_sets() {
        let mut registry = CardRegistry::new();
        let a = registry
            .ingest(&record("Juggernaut", "Artifact Creature").with_sets("LEA-U"))
            .unwrap();
        let b = registry
            .ingest(&record("Juggernaut", "Artifact Creature").with_sets("ATQ-U"))
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(a).unwrap().printings.len(), 2);
        assert_eq!(registry.cards_in_set("ATQ").count(), 1);
    }

    #[test]
    fn test_conflicting_duplicate_is_error() {
        let mut registry = CardRegistry::new();
        registry.ingest(&record("Juggernaut", "Artifact Creature")).unwrap();
        let err = registry.ingest(&record("Juggernaut", "Instant")).unwrap_err();
        assert!(matches!(err, CardTextError::DuplicateName { .. }));
    }

    #[test]
    fn test_split_name_form() {
        let mut registry = CardRegistry::new();
        registry.ingest(&record("Fire // Ice (Fire)", "Instant")).unwrap();
        registry.ingest(&record("Fire // Ice (Ice)", "Instant")).unwrap();

        let fire = registry.get_by_name("Fire").unwrap();
        let ice = registry.get_by_name("Ice").unwrap();
        assert_eq!(fire.multi, MultiFace::Split("Ice".into()));
        assert_eq!(ice.multi, MultiFace::Split("Fire".into()));
    }

    #[test]
    fn test_flip_name_form() {
        let mut registry = CardRegistry::new();
        registry
            .ingest(&record("Bushi Tenderfoot (Kenzo the Hardhearted)", "Legendary Creature"))
            .unwrap();
        let kenzo = registry.get_by_name("Kenzo the Hardhearted").unwrap();
        assert_eq!(kenzo.multi, MultiFace::Flip("Bushi Tenderfoot".into()));
        assert!(registry.verify_links().dangling.len() == 1);
    }

    #[test]
    fn test_embedded_flip_face() {
        let mut registry = CardRegistry::new();
        let rules = "Whenever a creature dealt damage this turn dies, flip Bushi Tenderfoot.\n\
                     ----\n\
                     Kenzo the Hardhearted\n\
                     Legendary Creature — Human Samurai\n\
                     3/4\n\
                     Double strike; bushido 2";
        let id = registry
            .ingest(&record("Bushi Tenderfoot", "Creature — Human Soldier").with_rules(rules).with_sets("CHK-U"))
            .unwrap();

        let bushi = registry.get(id).unwrap();
        assert_eq!(
            bushi.rules,
            "Whenever a creature dealt damage this turn dies, flip Bushi Tenderfoot."
        );
        assert_eq!(bushi.multi, MultiFace::Flip("Kenzo the Hardhearted".into()));

        let kenzo = registry.get_by_name("Kenzo").unwrap();
        assert_eq!(kenzo.name, "Kenzo the Hardhearted");
        assert_eq!(kenzo.rules, "Double strike; bushido 2");
        assert_eq!(kenzo.multi, MultiFace::Flip("Bushi Tenderfoot".into()));
        assert!(kenzo.in_set("CHK"));
        assert!(registry.verify_links().is_consistent());
    }

    #[test]
    fn test_embedded_flip_too_short() {
        let mut registry = CardRegistry::new();
        let id = registry
            .ingest(&record("Broken", "Creature").with_rules("Text\n----\nOnly Name"))
            .unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(id).unwrap().multi.is_none());
    }

    #[test]
    fn test_meld_metadata() {
        let mut registry = CardRegistry::new();
        registry
            .ingest(&record("Bruna, the Fading Light", "Legendary Creature").with_meld(
                "Gisela, the Broken Blade",
                Some("Brisela, Voice of Nightmares".into()),
            ))
            .unwrap();
        registry
            .ingest(&record("Brisela, Voice of Nightmares", "Legendary Creature").with_meld(
                "Bruna, the Fading Light // Gisela, the Broken Blade",
                None,
            ))
            .unwrap();
        registry
            .ingest(&record("Gisela, the Broken Blade", "Legendary Creature"))
            .unwrap();

        let gisela = registry.get_by_name("Gisela").unwrap();
        assert_eq!(
            gisela.multi,
            MultiFace::Meld(MeldRole::Component {
                partner: "Bruna, the Fading Light".into(),
                result: "Brisela, Voice of Nightmares".into(),
            })
        );
        let report = registry.verify_links();
        assert!(report.is_consistent());
        assert_eq!(report.physical, 2);
    }

    #[test]
    fn test_malformed_meld_still_registered() {
        let mut registry = CardRegistry::new();
        let id = registry
            .ingest(&record("Half Meld", "Creature").with_meld("A // B // C", None))
            .unwrap();
        assert!(registry.get(id).unwrap().multi.is_none());
    }

    #[test]
    fn test_shortname_registered() {
        let mut registry = CardRegistry::new();
        registry
            .ingest(&record("Jedit Ojanen of Efrava", "Legendary Creature — Cat Warrior"))
            .unwrap();

        assert!(registry.is_known("Jedit"));
        assert_eq!(registry.full_name("Jedit"), Some("Jedit Ojanen of Efrava"));
        assert_eq!(registry.uname_for("Jedit"), Some("NAME_Jedit_Ojanen_of_Efrava"));
        assert_eq!(registry.get_by_name("Jedit").unwrap().name, "Jedit Ojanen of Efrava");
    }

    #[test]
    fn test_uname_collision_keeps_bijection() {
        let mut registry = CardRegistry::new();
        registry.ingest(&record("Ach-Hans", "Instant")).unwrap();
        registry.ingest(&record("Ach Hans", "Instant")).unwrap();

        let a = registry.uname_for("Ach-Hans").unwrap().to_string();
        let b = registry.uname_for("Ach Hans").unwrap().to_string();
        assert_ne!(a, b);
        assert_eq!(registry.name_for_uname(&a), Some("Ach-Hans"));
        assert_eq!(registry.name_for_uname(&b), Some("Ach Hans"));
    }

    #[test]
    fn test_register_token() {
        let mut registry = CardRegistry::new();
        let uname = registry.register_token("Kaldra");
        assert_eq!(uname, "NAME_Kaldra");
        assert!(registry.is_known("Kaldra"));
        assert!(registry.get_by_name("Kaldra").is_none());
        assert_eq!(registry.register_token("Kaldra"), "NAME_Kaldra");
    }

    #[test]
    fn test_legal_cards() {
        let mut registry = CardRegistry::new();
        registry.ingest(&record("Chaos Orb", "Artifact")).unwrap();
        registry.ingest(&record("Juggernaut", "Artifact Creature")).unwrap();

        let legal = registry.legal_cards(&NormalizerConfig::default());
        assert_eq!(legal.len(), 1);
        assert_eq!(registry.get(legal[0]).unwrap().name, "Juggernaut");
    }

    #[test]
    fn test_search_and_adjacent_words() {
        let mut registry = CardRegistry::new();
        registry
            .ingest(&record("Ooze", "Creature").with_rules("Put a +1/+1 counter on target creature."))
            .unwrap();
        registry
            .ingest(&record("Clock", "Artifact").with_rules("Put a time counter on SELF.\nDraw a card."))
            .unwrap();

        let hits = registry.search_text("COUNTER", None).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1], ("Clock".to_string(), "Put a time counter on SELF.".to_string()));

        let before = registry.preceding_words("counter", None).unwrap();
        assert!(before.contains("time"));
        assert!(before.contains("+1/+1") || before.contains("1"));

        let after = registry.following_words("draw a", None).unwrap();
        assert_eq!(after.into_iter().collect::<Vec<_>>(), vec!["card".to_string()]);

        assert!(registry.search_text("(", None).is_err());
    }

    #[test]
    fn test_merge_results() {
        let mut registry = CardRegistry::new();
        registry.ingest(&record("Juggernaut", "Artifact Creature")).unwrap();

        let results = vec![
            TaskResult::ok("Juggernaut", 3usize),
            TaskResult::absent("Juggernaut", "boom"),
            TaskResult::ok("Nowhere", 1usize),
        ];
        let summary = registry.merge_results(results, |card, n| {
            card.annotations.insert("lines".into(), n.to_string());
        });

        assert_eq!(summary, MergeSummary { merged: 1, absent: 1, unknown: 1 });
        assert_eq!(
            registry.get_by_name("Juggernaut").unwrap().annotations["lines"],
            "3"
        );
    }
}

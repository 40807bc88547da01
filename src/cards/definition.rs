//! Card definitions.
//!
//! A `Card` is one named face of a playable card. Its descriptive fields
//! (cost, type line, stats, printings) are fixed at ingestion; only
//! `rules` is rewritten, in place, by the normalization pipeline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::attributes::{Color, Printing, Stats};
use super::multiface::{MultiFace, MultiKind};

/// Prefix of every card-name token.
pub const UNAME_PREFIX: &str = "NAME_";

/// Identifier for a registered card, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into registration-ordered storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Build the unique token for a name: `"NAME_"` followed by the name with
/// every non-word character replaced by `_`.
///
/// ```
/// use cardtext::cards::construct_uname;
///
/// assert_eq!(construct_uname("Mishra's Factory"), "NAME_Mishra_s_Factory");
/// ```
#[must_use]
pub fn construct_uname(name: &str) -> String {
    let mut uname = String::with_capacity(UNAME_PREFIX.len() + name.len());
    uname.push_str(UNAME_PREFIX);
    uname.extend(
        name.chars()
            .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' }),
    );
    uname
}

/// One face of a card.
///
/// ## Example
///
/// ```
/// use cardtext::cards::{Card, CardId};
///
/// let card = Card::new(CardId::new(0), "Serra Angel", "Creature — Angel")
///     .with_cost("{3}{W}{W}")
///     .with_rules("Flying\nVigilance");
///
/// assert_eq!(card.uname, "NAME_Serra_Angel");
/// assert_eq!(card.rules_lines().count(), 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    /// Registration-order identifier.
    pub id: CardId,

    /// Display name, unique across the registry.
    pub name: String,

    /// Unique token form of the name (`NAME_...`).
    pub uname: String,

    /// Informal short name for legendary cards.
    pub shortname: Option<String>,

    /// Mana cost as printed.
    pub cost: String,

    /// Full type line.
    pub typeline: String,

    /// Colors derived from the cost.
    pub colors: Vec<Color>,

    /// Power/toughness or loyalty, if any.
    pub stats: Option<Stats>,

    /// Printings in the order they were ingested.
    pub printings: Vec<Printing>,

    /// Rules text, one ability per line. Rewritten by normalization.
    pub rules: String,

    /// Relationship to sibling faces.
    pub multi: MultiFace,

    /// Data derived by post-normalization analysis.
    pub annotations: BTreeMap<String, String>,
}

impl Card {
    /// Create a new card with empty text and no printings.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, typeline: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            uname: construct_uname(&name),
            name,
            shortname: None,
            cost: String::new(),
            typeline: typeline.into(),
            colors: Vec::new(),
            stats: None,
            printings: Vec::new(),
            rules: String::new(),
            multi: MultiFace::None,
            annotations: BTreeMap::new(),
        }
    }

    /// Set the mana cost and derive colors from it (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: impl Into<String>) -> Self {
        self.cost = cost.into();
        self.colors = super::attributes::colors_from_cost(&self.cost);
        self
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Set the stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Set the multi-face relationship (builder pattern).
    #[must_use]
    pub fn with_multi(mut self, multi: MultiFace) -> Self {
        self.multi = multi;
        self
    }

    /// Relationship kind.
    #[must_use]
    pub fn multitype(&self) -> MultiKind {
        self.multi.kind()
    }

    /// Names this card answers to within its own text: the full name,
    /// then the shortname if any.
    #[must_use]
    pub fn self_names(&self) -> Vec<String> {
        let mut names = vec![self.name.clone()];
        if let Some(short) = &self.shortname {
            names.push(short.clone());
        }
        names
    }

    /// Is this card printed in the given set?
    #[must_use]
    pub fn in_set(&self, set: &str) -> bool {
        self.printings.iter().any(|p| p.set == set)
    }

    /// Iterate the rules text line by line.
    pub fn rules_lines(&self) -> impl Iterator<Item = &str> {
        self.rules.split('\n')
    }

    /// Is the card legendary?
    #[must_use]
    pub fn is_legendary(&self) -> bool {
        self.typeline.to_lowercase().contains("legendary")
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

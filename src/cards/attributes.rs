//! Descriptive card attributes.
//!
//! These never change during normalization. They are parsed once from the
//! raw record and carried along for querying.
//!
//! ## Types
//!
//! - `Rarity`: printing rarity code (C, U, R, M, L, S, B)
//! - `Printing`: one set code plus its rarity
//! - `Stats`: power/toughness or loyalty
//! - `Color`: the five colors, derived from the mana cost

use serde::{Deserialize, Serialize};

/// Rarity of a single printing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    /// Basic land slot.
    Land,
    Special,
    Bonus,
}

impl Rarity {
    /// Parse a one-letter rarity code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "C" => Some(Rarity::Common),
            "U" => Some(Rarity::Uncommon),
            "R" => Some(Rarity::Rare),
            "M" => Some(Rarity::Mythic),
            "L" => Some(Rarity::Land),
            "S" => Some(Rarity::Special),
            "B" => Some(Rarity::Bonus),
            _ => None,
        }
    }

    /// The one-letter code for this rarity.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Rarity::Common => "C",
            Rarity::Uncommon => "U",
            Rarity::Rare => "R",
            Rarity::Mythic => "M",
            Rarity::Land => "L",
            Rarity::Special => "S",
            Rarity::Bonus => "B",
        }
    }
}

/// One printing of a card: a set code and the rarity it had there.
///
/// The rarity is `None` when the source used a code we do not know; the
/// set is still recorded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Printing {
    pub set: String,
    pub rarity: Option<Rarity>,
}

impl Printing {
    /// Create a printing with a known rarity.
    #[must_use]
    pub fn new(set: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            set: set.into(),
            rarity: Some(rarity),
        }
    }
}

/// Parse a `Set/Rarity` field: comma-separated `SET-RARITY` pairs.
///
/// Unknown rarity codes are logged as errors and kept with no rarity.
pub fn parse_printings(card: &str, field: &str) -> Vec<Printing> {
    let mut printings: Vec<Printing> = Vec::new();
    for pair in field.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (set, code) = match pair.rsplit_once('-') {
            Some((set, code)) => (set.trim(), code.trim()),
            None => (pair, ""),
        };
        let rarity = Rarity::from_code(code);
        if rarity.is_none() {
            log::error!("{}: unknown rarity code {:?} for set {}", card, code, set);
        }
        if !printings.iter().any(|p| p.set == set) {
            printings.push(Printing {
                set: set.to_string(),
                rarity,
            });
        }
    }
    printings
}

/// Combat or loyalty statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stats {
    /// Power/toughness as printed, e.g. `"2/3"` or `"*/*+1"`.
    PowerToughness(String),
    /// Starting loyalty.
    Loyalty(String),
}

impl Stats {
    /// The stats as printed.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Stats::PowerToughness(s) | Stats::Loyalty(s) => s,
        }
    }
}

/// The five card colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// All colors in canonical (WUBRG) order.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// The mana letter for this color.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }
}

/// Derive card colors from a mana cost such as `{2}{W/U}{B}`.
///
/// Hybrid and Phyrexian symbols contribute every color letter they contain.
/// Bare letters outside braces (older cost notation) are read too.
#[must_use]
pub fn colors_from_cost(cost: &str) -> Vec<Color> {
    let upper = cost.to_uppercase();
    Color::ALL
        .into_iter()
        .filter(|c| upper.contains(c.symbol()))
        .collect()
}

//! Raw ingestion records.
//!
//! A `RawRecord` is the already-parsed field set an external loader
//! produces for one card. The text form is a labeled block:
//!
//! ```text
//! Name:       Serra Angel
//! Cost:       3WW
//! Type:       Creature — Angel
//! Pow/Tgh:    4/4
//! Rules Text: Flying
//! Vigilance
//! Set/Rarity: LEA-U, 10E-U
//! ```
//!
//! Unlabeled lines continue the rules text.

use serde::{Deserialize, Serialize};

use crate::error::{CardTextError, Result};

/// Field set for one card record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub name: String,
    pub cost: String,
    pub typeline: String,
    pub power_toughness: Option<String>,
    pub loyalty: Option<String>,
    pub rules: String,
    pub set_rarity: String,
    /// `M-type`: split, flip, transform or meld.
    pub multitype: Option<String>,
    /// `M-card`: the sibling of a split, flip or transform face.
    pub multicard: Option<String>,
    /// `M-pair`: the meld partner, or both components (`" // "`-separated)
    /// on the melded result.
    pub meld_pair: Option<String>,
    /// `Melded`: the melded result, on a meld component.
    pub melded: Option<String>,
}

const LABELS: [&str; 11] = [
    "Name:",
    "Cost:",
    "Type:",
    "Pow/Tgh:",
    "Loyalty:",
    "Rules Text:",
    "Set/Rarity:",
    "M-type:",
    "M-card:",
    "M-pair:",
    "Melded:",
];

impl RawRecord {
    /// Create a record with just a name and type line.
    #[must_use]
    pub fn new(name: impl Into<String>, typeline: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            typeline: typeline.into(),
            ..Self::default()
        }
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = rules.into();
        self
    }

    /// Set the cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: impl Into<String>) -> Self {
        self.cost = cost.into();
        self
    }

    /// Set the `Set/Rarity` field (builder pattern).
    #[must_use]
    pub fn with_sets(mut self, set_rarity: impl Into<String>) -> Self {
        self.set_rarity = set_rarity.into();
        self
    }

    /// Set power/toughness (builder pattern).
    #[must_use]
    pub fn with_pt(mut self, pt: impl Into<String>) -> Self {
        self.power_toughness = Some(pt.into());
        self
    }

    /// Link to a sibling face (builder pattern).
    #[must_use]
    pub fn with_multi(mut self, kind: impl Into<String>, card: impl Into<String>) -> Self {
        self.multitype = Some(kind.into());
        self.multicard = Some(card.into());
        self
    }

    /// Mark as a meld face (builder pattern).
    ///
    /// Components pass their partner and the melded result; the melded
    /// result passes both components joined by `" // "` and no result.
    #[must_use]
    pub fn with_meld(mut self, pair: impl Into<String>, melded: Option<String>) -> Self {
        self.multitype = Some("meld".to_string());
        self.meld_pair = Some(pair.into());
        self.melded = melded;
        self
    }

    /// Parse one labeled block.
    pub fn parse(block: &str) -> Result<Self> {
        let mut record = RawRecord::default();
        let mut has_name = false;

        for line in block.lines() {
            let label = LABELS.iter().find(|l| line.starts_with(**l));
            let Some(label) = label else {
                let extra = line.trim();
                if !extra.is_empty() {
                    if !record.rules.is_empty() {
                        record.rules.push('\n');
                    }
                    record.rules.push_str(extra);
                }
                continue;
            };
            let value = line[label.len()..].trim().to_string();
            match *label {
                "Name:" => {
                    record.name = value;
                    has_name = true;
                }
                "Cost:" => record.cost = value,
                "Type:" => record.typeline = value,
                "Pow/Tgh:" => record.power_toughness = Some(value).filter(|v| !v.is_empty()),
                "Loyalty:" => record.loyalty = Some(value).filter(|v| !v.is_empty()),
                "Rules Text:" => record.rules = value,
                "Set/Rarity:" => record.set_rarity = value,
                "M-type:" => record.multitype = Some(value),
                "M-card:" => record.multicard = Some(value),
                "M-pair:" => record.meld_pair = Some(value),
                "Melded:" => record.melded = Some(value),
                _ => {}
            }
        }

        if !has_name || record.name.is_empty() {
            return Err(CardTextError::MissingField { field: "Name" });
        }
        log::debug!("Parsed raw record for {}", record.name);
        Ok(record)
    }

    /// Split a corpus into blocks, each starting at a `Name:` line.
    #[must_use]
    pub fn split_blocks(text: &str) -> Vec<&str> {
        let mut starts: Vec<usize> = Vec::new();
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            if line.starts_with("Name:") {
                starts.push(offset);
            }
            offset += line.len();
        }
        let mut blocks = Vec::with_capacity(starts.len());
        for (i, &start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let block = text[start..end].trim();
            if !block.is_empty() {
                blocks.push(block);
            }
        }
        blocks
    }

    /// Parse every block in a corpus string.
    ///
    /// Blocks that fail to parse are logged and skipped.
    #[must_use]
    pub fn parse_all(text: &str) -> Vec<Self> {
        Self::split_blocks(text)
            .into_iter()
            .filter_map(|block| match Self::parse(block) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::error!("Skipping record: {}", e);
                    None
                }
            })
            .collect()
    }
}

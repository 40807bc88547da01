//! Structured card-exchange records.
//!
//! Converts a JSON card object (one entry of a bulk card feed) into the
//! `RawRecord`s the registry ingests. Multi-face layouts become linked
//! records:
//!
//! - `split`, `flip`, `transform`: one record per entry in `card_faces`,
//!   each naming the other as its sibling
//! - `meld`: `all_parts` holds the two components and the melded result;
//!   the result is the part whose `collector_number` ends in
//!   [`MELD_RESULT_SUFFIX`]

use serde::{Deserialize, Serialize};

use super::raw::RawRecord;
use crate::error::Result;

/// Collector-number suffix that marks the melded result in `all_parts`.
pub const MELD_RESULT_SUFFIX: char = 'b';

/// One face inside `card_faces`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFace {
    pub name: String,
    pub mana_cost: String,
    pub type_line: String,
    pub oracle_text: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
}

/// One related card inside `all_parts`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedPart {
    pub name: String,
    pub component: String,
    pub collector_number: String,
}

/// A card object from a structured feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCard {
    pub name: String,
    pub layout: String,
    pub mana_cost: String,
    pub type_line: String,
    pub oracle_text: String,
    pub power: Option<String>,
    pub toughness: Option<String>,
    pub loyalty: Option<String>,
    pub set: String,
    pub rarity: String,
    pub collector_number: String,
    pub card_faces: Vec<SourceFace>,
    pub all_parts: Vec<RelatedPart>,
}

fn rarity_code(rarity: &str) -> &str {
    match rarity {
        "common" => "C",
        "uncommon" => "U",
        "rare" => "R",
        "mythic" => "M",
        "special" => "S",
        "bonus" => "B",
        other => other,
    }
}

fn pt(power: &Option<String>, toughness: &Option<String>) -> Option<String> {
    match (power, toughness) {
        (Some(p), Some(t)) => Some(format!("{}/{}", p, t)),
        _ => None,
    }
}

impl SourceCard {
    /// Decode one card object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a JSON array of card objects.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }

    fn set_rarity(&self) -> String {
        if self.set.is_empty() {
            return String::new();
        }
        format!("{}-{}", self.set.to_uppercase(), rarity_code(&self.rarity))
    }

    fn face_record(&self, face: &SourceFace) -> RawRecord {
        RawRecord {
            name: face.name.clone(),
            cost: face.mana_cost.clone(),
            typeline: face.type_line.clone(),
            power_toughness: pt(&face.power, &face.toughness),
            loyalty: face.loyalty.clone(),
            rules: face.oracle_text.clone(),
            set_rarity: self.set_rarity(),
            ..RawRecord::default()
        }
    }

    fn single_record(&self) -> RawRecord {
        RawRecord {
            name: self.name.clone(),
            cost: self.mana_cost.clone(),
            typeline: self.type_line.clone(),
            power_toughness: pt(&self.power, &self.toughness),
            loyalty: self.loyalty.clone(),
            rules: self.oracle_text.clone(),
            set_rarity: self.set_rarity(),
            ..RawRecord::default()
        }
    }

    /// Convert into raw records, one per face.
    #[must_use]
    pub fn into_records(self) -> Vec<RawRecord> {
        match self.layout.as_str() {
            "split" | "flip" | "transform" => self.pair_records(),
            "meld" => vec![self.meld_record()],
            _ => vec![self.single_record()],
        }
    }

    fn pair_records(&self) -> Vec<RawRecord> {
        if self.card_faces.len() != 2 {
            log::error!(
                "{}: {} layout with {} faces",
                self.name,
                self.layout,
                self.card_faces.len()
            );
            return self
                .card_faces
                .iter()
                .map(|face| self.face_record(face))
                .collect();
        }
        let (a, b) = (&self.card_faces[0], &self.card_faces[1]);
        vec![
            self.face_record(a).with_multi(self.layout.clone(), b.name.clone()),
            self.face_record(b).with_multi(self.layout.clone(), a.name.clone()),
        ]
    }

    fn meld_record(&self) -> RawRecord {
        let record = self.single_record();
        let (results, components): (Vec<&RelatedPart>, Vec<&RelatedPart>) = self
            .all_parts
            .iter()
            .filter(|p| p.component != "token")
            .partition(|p| p.collector_number.ends_with(MELD_RESULT_SUFFIX));

        if results.len() != 1 || components.len() != 2 {
            log::error!(
                "{}: malformed meld relation ({} components, {} results)",
                self.name,
                components.len(),
                results.len()
            );
        }
        let result = results.first().map(|p| p.name.clone());
        let component_names: Vec<String> = components.iter().map(|p| p.name.clone()).collect();

        if result.as_deref() == Some(self.name.as_str()) {
            record.with_meld(component_names.join(" // "), None)
        } else {
            let partner = component_names
                .iter()
                .find(|n| **n != self.name)
                .cloned()
                .unwrap_or_default();
            record.with_meld(partner, result)
        }
    }
}

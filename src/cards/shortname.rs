//! Shortnames for legendary cards.
//!
//! Legendary cards often refer to themselves by a given name only
//! ("Whenever Jedit deals damage..."). The shortname is derived from the
//! full name by rule, or taken from a fixed exception table for names the
//! rule cannot split without also splitting ordinary names like
//! "Patron of the Orochi".

use rustc_hash::FxHashMap;

lazy_static::lazy_static! {
    static ref EXCEPTIONS: FxHashMap<&'static str, &'static str> = [
        ("Adun Oakenshield", "Adun"),
        ("Angus Mackenzie", "Angus"),
        ("Arcades Sabboth", "Arcades"),
        ("Arcum Dagsson", "Arcum"),
        ("Axelrod Gunnarson", "Axelrod"),
        ("Ayesha Tanaka", "Ayesha"),
        ("Barktooth Warbeard", "Barktooth"),
        ("Bartel Runeaxe", "Bartel"),
        ("Boris Devilboon", "Boris"),
        ("Brion Stoutarm", "Brion"),
        ("Dakkon Blackblade", "Dakkon"),
        ("Gabriel Angelfire", "Gabriel"),
        ("Gaddock Teeg", "Gaddock"),
        ("Gerrard Capashen", "Gerrard"),
        ("Glissa Sunseeker", "Glissa"),
        ("Gosta Dirk", "Gosta"),
        ("Gwendlyn Di Corci", "Gwendlyn"),
        ("Hazezon Tamar", "Hazezon"),
        ("Hivis of the Scale", "Hivis"),
        ("Hunding Gjornersen", "Hunding"),
        ("Irini Sengir", "Irini"),
        ("Iwamori of the Open Fist", "Iwamori"),
        ("Jacques le Vert", "Jacques"),
        ("Jasmine Boreal", "Jasmine"),
        ("Jedit Ojanen", "Jedit"),
        ("Jedit Ojanen of Efrava", "Jedit"),
        ("Jerrard of the Closed Fist", "Jerrard"),
        ("Jhoira of the Ghitu", "Jhoira"),
        ("Kei Takahashi", "Kei"),
        ("The Lady of the Mountain", "The Lady"),
        ("Livonya Silone", "Livonya"),
        ("Lovisa Coldeyes", "Lovisa"),
        ("Maralen of the Mornsong", "Maralen"),
        ("Marhault Elsdragon", "Marhault"),
        ("Merieke Ri Berit", "Merieke"),
        ("Márton Stromgald", "Márton"),
        ("Nath of the Gilt-Leaf", "Nath"),
        ("Nicol Bolas", "Nicol"),
        ("Pavel Maliki", "Pavel"),
        ("Purraj of Urborg", "Purraj"),
        ("Rafiq of the Many", "Rafiq"),
        ("Rakka Mar", "Rakka"),
        ("Raksha Golden Cub", "Raksha"),
        ("Ramirez DePietro", "Ramirez"),
        ("Ramses Overdark", "Ramses"),
        ("Rashida Scalebane", "Rashida"),
        ("Rasputin Dreamweaver", "Rasputin"),
        ("Reya Dawnbringer", "Reya"),
        ("Riven Turnbull", "Riven"),
        ("Rohgahh of Kher Keep", "Rohgahh"),
        ("Rorix Bladewing", "Rorix"),
        ("Rosheen Meanderer", "Rosheen"),
        ("Rubinia Soulsinger", "Rubinia"),
        ("Saffi Eriksdotter", "Saffi"),
        ("Sidar Jabari", "Sidar"),
        ("Sir Shandlar of Eberyn", "Sir Shandlar"),
        ("Sivitri Scarzam", "Sivitri"),
        ("Starke of Rath", "Starke"),
        ("Sunastian Falconer", "Sunastian"),
        ("The Tabernacle at Pendrell Vale", "The Tabernacle"),
        ("Tarox Bladewing", "Tarox"),
        ("Tetsuo Umezawa", "Tetsuo"),
        ("Thelon of Havenwood", "Thelon"),
        ("Tivadar of Thorn", "Tivadar"),
        ("Tobias Andrion", "Tobias"),
        ("Tolsimir Wolfblood", "Tolsimir"),
        ("Tor Wauki", "Tor"),
        ("Torsten Von Ursus", "Torsten"),
        ("Toshiro Umezawa", "Toshiro"),
        ("Tsabo Tavoc", "Tsabo"),
        ("Tuknir Deathlock", "Tuknir"),
        ("Vaevictis Asmadi", "Vaevictis"),
        ("Veldrane of Sengir", "Veldrane"),
        ("Vhati il-Dal", "Vhati"),
        ("Xira Arien", "Xira"),
        ("Zirilan of the Claw", "Zirilan"),
    ]
    .into_iter()
    .collect();
}

/// Is this a word made only of lowercase letters ("of", "from")?
fn is_lowercase_word(word: &str) -> bool {
    word.chars().any(char::is_alphabetic)
        && word.chars().all(|c| !c.is_alphabetic() || c.is_lowercase())
}

/// Derive the shortname for a card name by rule alone.
///
/// - `"Kongming, Sleeping Dragon"` → `"Kongming"`
/// - `"Kenzo the Hardhearted"` → `"Kenzo"`
/// - `"Patron of the Orochi"` → none (lowercase word before "the")
#[must_use]
pub fn derive_shortname(name: &str) -> Option<String> {
    if let Some(i) = name.find(", ") {
        let short = name[..i].trim();
        return (!short.is_empty()).then(|| short.to_string());
    }
    if let Some(i) = name.find(" the ") {
        let before = &name[..i];
        let last = before.split_whitespace().last()?;
        if !is_lowercase_word(last) {
            return Some(before.trim().to_string());
        }
    }
    None
}

/// The shortname for a card, if it has one.
///
/// Only legendary cards get shortnames. The exception table wins over the
/// derived result.
#[must_use]
pub fn shortname_for(name: &str, typeline: &str) -> Option<String> {
    if !typeline.to_lowercase().contains("legendary") {
        return None;
    }
    if let Some(short) = EXCEPTIONS.get(name) {
        return Some((*short).to_string());
    }
    derive_shortname(name)
}

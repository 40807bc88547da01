//! Capitalization and hyphenation normalization.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::cards::UNAME_PREFIX;

lazy_static! {
    static ref NON_PREFIX: Regex = Regex::new(r"\bnon([a-z]{2,})").unwrap();
}

/// Words that start with `non` but are not prefixed.
const NON_EXCEPTIONS: [&str; 2] = ["none", "nonetheless"];

/// Tokens that survive lowercasing.
const PRESERVED: [&str; 3] = ["SELF", "PARENT", UNAME_PREFIX];

/// Lowercase every word except those containing `SELF`, `PARENT` or a
/// `NAME_` token.
///
/// ```
/// use cardtext::text::normalize_capitals;
///
/// assert_eq!(normalize_capitals("SELF Deals 3 Damage"), "SELF deals 3 damage");
/// ```
#[must_use]
pub fn normalize_capitals(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            if PRESERVED.iter().any(|token| word.contains(token)) {
                word.to_string()
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hyphenate `non` prefixes: `nonbasic` becomes `non-basic`. The prefixed
/// word must be at least two letters, and words like `none` or
/// `nonetheless` are left alone.
#[must_use]
pub fn hyphenate_non(text: &str) -> String {
    NON_PREFIX
        .replace_all(text, |caps: &Captures| {
            if NON_EXCEPTIONS.contains(&&caps[0]) {
                caps[0].to_string()
            } else {
                format!("non-{}", &caps[1])
            }
        })
        .into_owned()
}

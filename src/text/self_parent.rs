//! SELF and PARENT rewriting.
//!
//! A card's own name becomes `SELF`; the name of the card granting an
//! ability becomes `PARENT`. Inside quoted abilities the meaning of the
//! card's own name depends on who ends up with the ability:
//!
//! ```text
//! Equipped creature has "Whenever this creature deals damage, untap Sword."
//! ```
//!
//! Here "Sword" is the granting card, so inside the quote it is `PARENT`.
//! [`attribute_granted`] looks back from the quote to decide.

use crate::config::NormalizerConfig;

/// Token for the current card's own name.
pub const SELF_TOKEN: &str = "SELF";

/// Token for the card that granted the current ability.
pub const PARENT_TOKEN: &str = "PARENT";

/// Who a self-name inside a quoted ability refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribution {
    /// The ability is granted to another object; the name means PARENT.
    Parent,
    /// The card grants the ability to itself; the name stays SELF.
    SelfRef,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find `name` in `text` as a whole word, starting at byte `from`.
fn find_whole_word(text: &str, name: &str, from: usize) -> Option<usize> {
    let needs_left_boundary = name.chars().next().is_some_and(is_word_char);
    let mut start = from;
    while let Some(offset) = text.get(start..)?.find(name) {
        let at = start + offset;
        let end = at + name.len();
        let left_ok = !needs_left_boundary
            || !text[..at].chars().next_back().is_some_and(is_word_char);
        let right_ok = !text[end..].chars().next().is_some_and(is_word_char);
        if left_ok && right_ok {
            return Some(at);
        }
        start = at + name.chars().next().map_or(1, char::len_utf8);
    }
    None
}

/// Replace every whole-word occurrence of `name` with `token`.
/// Returns the new text and the number of replacements.
#[must_use]
pub fn replace_whole_word(text: &str, name: &str, token: &str) -> (String, usize) {
    if name.is_empty() {
        return (text.to_string(), 0);
    }
    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    let mut last = 0;
    while let Some(at) = find_whole_word(text, name, last) {
        out.push_str(&text[last..at]);
        out.push_str(token);
        last = at + name.len();
        count += 1;
    }
    out.push_str(&text[last..]);
    (out, count)
}

/// Does `text` contain `name` as a whole word?
#[must_use]
pub fn contains_whole_word(text: &str, name: &str) -> bool {
    !name.is_empty() && find_whole_word(text, name, 0).is_some()
}

/// Rewrite self-names to `SELF` and parent names to `PARENT`.
/// Returns the new text and whether anything changed.
///
/// Longer names are replaced first, so a self-name that is a prefix of a
/// parent name (or the reverse) doesn't split it.
#[must_use]
pub fn rewrite_self_parent(
    line: &str,
    self_names: &[String],
    parent_names: &[String],
) -> (String, bool) {
    let mut replacements: Vec<(&str, &str)> = self_names
        .iter()
        .map(|n| (n.as_str(), SELF_TOKEN))
        .chain(parent_names.iter().map(|n| (n.as_str(), PARENT_TOKEN)))
        .collect();
    replacements.sort_by_key(|(name, _)| std::cmp::Reverse(name.len()));

    let mut text = line.to_string();
    let mut changed = false;
    for (name, token) in replacements {
        let (next, count) = replace_whole_word(&text, name, token);
        if count == 0 {
            continue;
        }
        text = next;
        changed = true;
        match (token, parent_names.first()) {
            (PARENT_TOKEN, _) => log::info!("Detected PARENT in an ability granted by {}", name),
            (_, Some(parent)) => log::info!("Detected SELF in an ability granted by {}", parent),
            _ => {}
        }
    }
    (text, changed)
}

/// Decide who a self-name inside a quoted ability refers to, from the
/// text before the quote.
///
/// Only the current sentence is considered. It is split on `", "` and
/// `" and "`, and segments are scanned from the quote backwards; the first
/// parent-indicating word or self reference found decides. With no
/// signal the ability is taken to be granted.
#[must_use]
pub fn attribute_granted(
    before_quote: &str,
    self_names: &[String],
    config: &NormalizerConfig,
) -> Attribution {
    let sentence = match before_quote.rfind(". ") {
        Some(at) => &before_quote[at + 2..],
        None => before_quote,
    };

    let segments = sentence
        .split(", ")
        .flat_map(|part| part.split(" and "))
        .collect::<Vec<_>>();

    for segment in segments.iter().rev() {
        for word in segment.split_whitespace().rev() {
            let word = word.trim_matches(|c: char| !is_word_char(c));
            if config.is_parent_word(word) {
                return Attribution::Parent;
            }
            if word == SELF_TOKEN {
                return Attribution::SelfRef;
            }
        }
        if self_names.iter().any(|name| contains_whole_word(segment, name)) {
            return Attribution::SelfRef;
        }
    }
    Attribution::Parent
}

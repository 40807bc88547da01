//! Name substitution.
//!
//! Finds every name-introducing marker in a line, resolves the names that
//! follow it and rewrites them as `NAME_` tokens. A single resolved name
//! followed by a quoted ability gives that ability its own scope, in which
//! the new name is SELF and the outer card is PARENT.

use lazy_static::lazy_static;
use regex::Regex;

use super::candidates::{trim_leading, NameCandidates};
use super::resolver::{NameResolver, Resolution};
use super::self_parent::{
    attribute_granted, rewrite_self_parent, Attribution, PARENT_TOKEN, SELF_TOKEN,
};
use super::Normalizer;
use crate::cards::{CardRegistry, UNAME_PREFIX};
use crate::config::NormalizerConfig;

lazy_static! {
    /// A double-quoted ability.
    static ref QUOTED: Regex = Regex::new(r#""[^"]+""#).unwrap();
}

/// Punctuation that may trail the last word of a name.
const TRAILING_PUNCTUATION: [char; 5] = [',', '.', ':', '"', '\''];

/// Was this word already rewritten by an earlier pass?
fn is_token(word: &str) -> bool {
    word.starts_with(UNAME_PREFIX) || word.starts_with(SELF_TOKEN) || word.starts_with(PARENT_TOKEN)
}

fn word_count(name: &str) -> usize {
    name.matches(' ').count() + 1
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Up to two punctuation characters trailing `word`.
fn trailing_punctuation(word: &str) -> &str {
    let mut start = word.len();
    for (i, c) in word.char_indices().rev().take(2) {
        if !TRAILING_PUNCTUATION.contains(&c) {
            break;
        }
        start = i;
    }
    &word[start..]
}

/// Rewrite the words following a marker, replacing `names` with their
/// tokens. Names not yet known are registered as tokens.
///
/// Multiple names are joined with `", "`. When the word before the last
/// name is a list word it is kept as the connector.
pub fn substitute(
    registry: &mut CardRegistry,
    config: &NormalizerConfig,
    names: &[String],
    words: &[&str],
) -> String {
    let unames: Vec<String> = names.iter().map(|n| registry.register_token(n)).collect();

    let (consumed, mut text) = match unames.split_last() {
        None => (0, String::new()),
        Some((last, [])) => (word_count(&names[0]), last.clone()),
        Some((last, head)) => {
            let before: usize = names[..head.len()].iter().map(|n| word_count(n)).sum();
            let last_words = word_count(&names[head.len()]);
            log::info!("Multiple names being replaced: {}", names.join("; "));
            match words
                .get(before)
                .copied()
                .filter(|w| config.is_list_word(w.trim_end_matches(',')))
            {
                Some(connector) => (
                    before + last_words + 1,
                    format!("{}, {} {}", head.join(", "), connector, last),
                ),
                None => (before + last_words, unames.join(", ")),
            }
        }
    };
    let consumed = consumed.min(words.len());

    if let Some(first_word) = words.first().filter(|_| consumed > 0) {
        let name_start = first_word.len() - trim_leading(first_word).len();
        text.insert_str(0, &first_word[..name_start]);
    }
    if let Some(last_word) = consumed.checked_sub(1).and_then(|i| words.get(i)) {
        text.push_str(trailing_punctuation(last_word));
    }
    let rest = &words[consumed..];
    if !rest.is_empty() {
        text.push(' ');
        text.push_str(&rest.join(" "));
    }
    text
}

/// Earliest marker at or after `from` that starts a word.
/// Returns the marker position and the position just past it.
fn find_marker(markers: &[String], line: &str, from: usize) -> Option<(usize, usize)> {
    markers
        .iter()
        .filter(|m| !m.is_empty())
        .filter_map(|marker| {
            let tail = line.get(from..)?;
            tail.match_indices(marker.as_str())
                .map(|(i, _)| from + i)
                .find(|&at| !line[..at].chars().next_back().is_some_and(is_word_char))
                .map(|at| (at, at + marker.len()))
        })
        .min()
}

impl Normalizer<'_> {
    /// Rewrite the names in one line.
    ///
    /// `self_names` are the current scope's own names and `parent_names`
    /// those of the card granting the ability, if this line is a granted
    /// ability's text.
    pub fn rewrite_names(
        &mut self,
        line: &str,
        self_names: &[String],
        parent_names: &[String],
    ) -> String {
        let reserved: Vec<String> = self_names.iter().chain(parent_names).cloned().collect();
        let mut line = line.to_string();
        let mut changed = false;
        let mut from = 0;

        while let Some((at, start)) = find_marker(&self.config.markers, &line, from) {
            from = start;
            let words: Vec<&str> = line[start..].split_whitespace().collect();
            if words.first().map(|w| trim_leading(w)).map_or(true, |w| {
                w.starts_with(char::is_lowercase) || is_token(w)
            }) {
                continue;
            }
            let Some(candidates) = NameCandidates::scan(&words, &reserved, self.config) else {
                continue;
            };
            let resolution = NameResolver::new(self.registry, &reserved, self.config.fallback)
                .resolve(candidates.iter());
            if let Resolution::Fallback(names) = &resolution {
                log::warn!(
                    "Unable to interpret name(s) at position {}: {}; using {}",
                    start,
                    candidates.full_name(),
                    names.join(" / ")
                );
            }
            let Some(names) = resolution.into_names() else {
                log::warn!("Unable to interpret name(s) at position {}: {}", start, words[0]);
                continue;
            };
            log::debug!("Selected name(s) at position {}: {}", start, names.join("; "));

            let replaced = substitute(self.registry, self.config, &names, &words);
            line = format!("{}{}", &line[..start], replaced);
            changed = true;

            if names.len() == 1 && !line[..at].contains('"') && parent_names.is_empty() {
                if let Some((qs, qe)) = QUOTED.find_at(&line, start).map(|m| (m.start(), m.end())) {
                    let scope = [names[0].clone()];
                    let inner = self.rewrite_names(&line[qs..qe], &scope, self_names);
                    line = format!("{}{}{}", &line[..qs], inner, &line[qe..]);
                    from = qs + inner.len();
                }
            }
        }

        if parent_names.is_empty() {
            line = self.attribute_quotes(line, self_names);
        }

        let (line, renamed) = rewrite_self_parent(&line, self_names, parent_names);
        if changed || renamed {
            let scope = self_names.first().map_or("?.token", String::as_str);
            log::debug!("Now: {} | {}", scope, line);
        }
        line
    }

    /// Rewrite self-names inside quoted abilities granted to other objects.
    fn attribute_quotes(&self, mut line: String, self_names: &[String]) -> String {
        let mut pos = 0;
        while let Some((qs, qe)) = QUOTED.find_at(&line, pos).map(|m| (m.start(), m.end())) {
            pos = qe;
            if attribute_granted(&line[..qs], self_names, self.config) != Attribution::Parent {
                continue;
            }
            let (inner, changed) = rewrite_self_parent(&line[qs..qe], &[], self_names);
            if changed {
                line = format!("{}{}{}", &line[..qs], inner, &line[qe..]);
                pos = qs + inner.len();
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::RawRecord;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn registry(cards: &[&str]) -> CardRegistry {
        let mut registry = CardRegistry::new();
        for name in cards {
            registry.ingest(&RawRecord::new(*name, "Artifact")).unwrap();
        }
        registry
    }

    #[test]
    fn test_trailing_punctuation() {
        assert_eq!(trailing_punctuation("Factory."), ".");
        assert_eq!(trailing_punctuation("Kaldra,\""), ",\"");
        assert_eq!(trailing_punctuation("Angel.'"), ".'");
        assert_eq!(trailing_punctuation("Juggernaut"), "");
    }

    #[test]
    fn test_substitute_single() {
        let mut registry = registry(&["Serra Angel"]);
        let config = NormalizerConfig::default();
        let words: Vec<&str> = "Serra Angel, reveal it.".split_whitespace().collect();
        assert_eq!(
            substitute(&mut registry, &config, &names(&["Serra Angel"]), &words),
            "NAME_Serra_Angel, reveal it."
        );
    }

    #[test]
    fn test_substitute_list() {
        let mut registry = registry(&["Icy Manipulator", "Juggernaut", "Mishra's Factory"]);
        let config = NormalizerConfig::default();
        let words: Vec<&str> = "Icy Manipulator, Juggernaut, and Mishra's Factory."
            .split_whitespace()
            .collect();
        assert_eq!(
            substitute(
                &mut registry,
                &config,
                &names(&["Icy Manipulator", "Juggernaut", "Mishra's Factory"]),
                &words
            ),
            "NAME_Icy_Manipulator, NAME_Juggernaut, and NAME_Mishra_s_Factory."
        );
    }

    #[test]
    fn test_substitute_registers_tokens() {
        let mut registry = CardRegistry::new();
        let config = NormalizerConfig::default();
        let words: Vec<&str> = "Kaldra with indestructible".split_whitespace().collect();
        assert_eq!(
            substitute(&mut registry, &config, &names(&["Kaldra"]), &words),
            "NAME_Kaldra with indestructible"
        );
        assert!(registry.is_known("Kaldra"));
    }

    #[test]
    fn test_substitute_without_connector() {
        let mut registry = registry(&["Alpha, Beta", "Gamma"]);
        let config = NormalizerConfig::default();
        let words: Vec<&str> = "Alpha, Beta, Gamma, and Gisela.".split_whitespace().collect();
        assert_eq!(
            substitute(&mut registry, &config, &names(&["Alpha, Beta", "Gamma"]), &words),
            "NAME_Alpha__Beta, NAME_Gamma, and Gisela."
        );
    }

    #[test]
    fn test_substitute_keeps_opening_quote() {
        let mut registry = CardRegistry::new();
        let config = NormalizerConfig::default();
        let words: Vec<&str> = "\"Foo\" here".split_whitespace().collect();
        assert_eq!(
            substitute(&mut registry, &config, &names(&["Foo"]), &words),
            "\"NAME_Foo\" here"
        );
        assert!(registry.is_known("Foo"));
        assert!(!registry.is_known("\"Foo"));
    }

    #[test]
    fn test_find_marker_word_boundary() {
        let markers = names(&["named "]);
        assert_eq!(find_marker(&markers, "an unnamed card named X", 0), Some((16, 22)));
        assert_eq!(find_marker(&markers, "named X", 0), Some((0, 6)));
        assert_eq!(find_marker(&markers, "named X", 1), None);
    }

    #[test]
    fn test_rewrite_names_granted_token() {
        let mut registry = registry(&["Kaldra Compleat"]);
        let config = NormalizerConfig::default();
        let mut normalizer = Normalizer::new(&mut registry, &config);

        let line = "Create a token named Kaldra with \"Whenever Kaldra deals damage, exile that creature.\"";
        let out = normalizer.rewrite_names(line, &names(&["Kaldra Compleat"]), &[]);
        assert_eq!(
            out,
            "Create a token named NAME_Kaldra with \"Whenever SELF deals damage, exile that creature.\""
        );
    }

    #[test]
    fn test_rewrite_names_list_ending_in_self() {
        let mut registry = registry(&["Alpha, Beta", "Gamma", "Gisela"]);
        let config = NormalizerConfig::default();
        let mut normalizer = Normalizer::new(&mut registry, &config);

        let line = "Search for cards named Alpha, Beta, Gamma, and Gisela.";
        assert_eq!(
            normalizer.rewrite_names(line, &names(&["Gisela"]), &[]),
            "Search for cards named NAME_Alpha__Beta, NAME_Gamma, and SELF."
        );
    }

    #[test]
    fn test_rewrite_names_quoted_name() {
        let mut registry = CardRegistry::new();
        let config = NormalizerConfig::default();
        let mut normalizer = Normalizer::new(&mut registry, &config);

        let once = normalizer.rewrite_names("Create a token named \"Foo\" here.", &[], &[]);
        assert_eq!(once, "Create a token named \"NAME_Foo\" here.");
        assert_eq!(normalizer.rewrite_names(&once, &[], &[]), once);
        assert!(normalizer.registry().is_known("Foo"));
        assert!(!normalizer.registry().is_known("\"Foo"));
    }

    #[test]
    fn test_rewrite_names_skips_tokens() {
        let mut registry = registry(&["Juggernaut"]);
        let config = NormalizerConfig::default();
        let mut normalizer = Normalizer::new(&mut registry, &config);

        let line = "Search for a card named NAME_Juggernaut.";
        assert_eq!(normalizer.rewrite_names(line, &[], &[]), line);
        assert!(!normalizer.registry().is_known("NAME_Juggernaut"));
    }

    #[test]
    fn test_rewrite_names_lowercase_after_marker() {
        let mut registry = CardRegistry::new();
        let config = NormalizerConfig::default();
        let mut normalizer = Normalizer::new(&mut registry, &config);

        let line = "Choose a card name. Search for a card with the chosen name.";
        assert_eq!(normalizer.rewrite_names(line, &[], &[]), line);
        assert_eq!(
            normalizer.rewrite_names("Cards named that way", &[], &[]),
            "Cards named that way"
        );
    }
}

//! Candidate name groupings.
//!
//! The words after a name-introducing marker can often be sliced into
//! names more than one way: "Icy Manipulator, Juggernaut, and Mishra's
//! Factory" may be three cards or one long name. `NameCandidates` scans
//! the run once and then enumerates every plausible grouping, most
//! specific first:
//!
//! 1. The whole run as a single name.
//! 2. If the run contained `and`/`or`: for each list word and each split
//!    point right to left, the comma list left of the split plus the
//!    remainder, and every left-joined truncation of that list.
//! 3. Otherwise: progressively shorter comma-separated prefixes.

use std::iter;

use smallvec::{smallvec, SmallVec};

use crate::config::NormalizerConfig;

/// One grouping of names, in text order.
pub type Candidate = SmallVec<[String; 3]>;

/// Characters that end a name.
const TERMINAL_MARKS: [char; 3] = [':', '.', '"'];

/// Characters stripped from the end of the scanned name.
const TRAILING_MARKS: [char; 4] = [',', '.', ':', '"'];

/// Characters that may open the first word without belonging to the name.
pub(crate) const LEADING_MARKS: [char; 3] = ['"', '\'', '('];

/// The word without its opening quote or parenthesis.
pub(crate) fn trim_leading(word: &str) -> &str {
    word.trim_start_matches(LEADING_MARKS)
}

/// Does the word start with an uppercase letter?
pub(crate) fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// The scanned name run after a marker, and the groupings it allows.
#[derive(Clone, Debug)]
pub struct NameCandidates<'a> {
    full: String,
    /// The first word ended the name by itself.
    terminal: bool,
    /// `and`/`or` appeared in the run.
    list: bool,
    separators: Vec<String>,
    /// Names that stay as they are: the current self and parent names.
    reserved: &'a [String],
}

impl<'a> NameCandidates<'a> {
    /// Scan the words following a marker. Returns `None` when there are
    /// no words or the first word holds no name.
    #[must_use]
    pub fn scan(words: &[&str], reserved: &'a [String], config: &NormalizerConfig) -> Option<Self> {
        let (first, rest) = words.split_first()?;
        let first = trim_leading(first);
        if first.is_empty() {
            return None;
        }
        let separators = config.list_words.iter().map(|w| format!(" {} ", w)).collect();

        if first.ends_with(TERMINAL_MARKS) {
            let mut name = first.to_string();
            name.pop();
            if name.is_empty() {
                return None;
            }
            return Some(Self {
                full: name,
                terminal: true,
                list: false,
                separators,
                reserved,
            });
        }

        let mut name = first.to_string();
        let mut buffered = String::new();
        let mut list = false;
        for word in rest {
            if is_capitalized(word) {
                name.push_str(&buffered);
                name.push(' ');
                name.push_str(word);
                buffered.clear();
                if word.ends_with(TERMINAL_MARKS) {
                    break;
                }
            } else if config.is_connector(word) {
                buffered.push(' ');
                buffered.push_str(word);
            } else if config.is_list_word(word) {
                list = true;
                buffered.push(' ');
                buffered.push_str(word);
            } else {
                break;
            }
        }
        let full = name.trim_end_matches(TRAILING_MARKS).to_string();
        if full.is_empty() {
            return None;
        }

        Some(Self {
            full,
            terminal: false,
            list,
            separators,
            reserved,
        })
    }

    /// The longest scanned name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full
    }

    /// Did the run contain a list word?
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.list
    }

    fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|r| r == name)
    }

    /// Enumerate candidate groupings, most specific first.
    ///
    /// Every call starts a fresh enumeration.
    pub fn iter(&self) -> Box<dyn Iterator<Item = Candidate> + '_> {
        let whole = iter::once(smallvec![self.full.clone()]);
        if self.terminal {
            return Box::new(whole);
        }
        if let Some((a, b)) = self.full.split_once(", ") {
            if a == b && self.is_reserved(a) {
                return Box::new(iter::once(smallvec![a.to_string()]));
            }
        }
        if self.list {
            Box::new(whole.chain(self.list_groupings()))
        } else {
            Box::new(whole.chain(self.comma_prefixes()))
        }
    }

    fn list_groupings(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.separators.iter().flat_map(move |sep| {
            let parts = self.full.split(sep.as_str()).count();
            (1..parts)
                .rev()
                .flat_map(move |i| self.split_at(sep, i))
        })
    }

    /// Groupings for splitting the run at the `i`th occurrence of `sep`.
    fn split_at(&self, sep: &str, i: usize) -> Vec<Candidate> {
        let parts: Vec<&str> = self.full.split(sep).collect();
        let left = parts[..i].join(sep);
        let right = parts[i..].join(sep);
        let mut lnames: Vec<String> = left.split(", ").map(str::to_string).collect();
        let mut out = Vec::new();

        if let Some(last) = lnames.last_mut() {
            if last.ends_with(',') {
                last.pop();
                // "A, and B" with B the current card: only A is a new name.
                if lnames.len() == 1 && self.is_reserved(&right) {
                    out.push(smallvec![lnames[0].clone()]);
                }
            }
        }

        let n = lnames.len();
        if n > 1 {
            out.push(lnames.iter().cloned().chain(iter::once(right.clone())).collect());
            if n > 2 {
                for j in (2..=n - 2).rev() {
                    out.push(
                        iter::once(lnames[..j].join(", "))
                            .chain(lnames[j..].iter().cloned())
                            .chain(iter::once(right.clone()))
                            .collect(),
                    );
                }
                let mut joined: Candidate =
                    smallvec![lnames[..n - 1].join(", "), lnames[n - 1].clone()];
                if !self.is_reserved(&right) {
                    joined.push(right);
                }
                out.push(joined);
            }
        } else {
            out.push(smallvec![lnames[0].clone(), right]);
        }
        out
    }

    fn comma_prefixes(&self) -> impl Iterator<Item = Candidate> + '_ {
        let parts: Vec<&str> = self.full.split(", ").collect();
        (1..parts.len())
            .rev()
            .map(move |k| smallvec![parts[..k].join(", ")])
    }
}

//! Reminder-text stripping.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// A parenthesized run, allowing brace-delimited symbols inside it
    /// (hybrid and Phyrexian mana reminders), plus the character before it.
    static ref REMINDER: Regex =
        Regex::new(r"(.?)(\([^{()]*(?:\{[^}]*\}[^{()]*)*\))").unwrap();
}

/// Remove parenthetical reminder text from a line.
///
/// A space before the reminder is removed with it. A reminder directly
/// after an open brace belongs to a symbol and is kept verbatim. Nested
/// parentheses are removed innermost first until nothing changes.
///
/// ```
/// use cardtext::text::strip_reminder;
///
/// assert_eq!(
///     strip_reminder("Flying (This creature can't be blocked except by flying or reaching creatures.)"),
///     "Flying"
/// );
/// ```
#[must_use]
pub fn strip_reminder(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

/// One pass: removes the innermost parenthesized runs.
fn strip_once(text: &str) -> String {
    REMINDER
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "{" => caps[0].to_string(),
            " " => String::new(),
            before => before.to_string(),
        })
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_trailing_reminder() {
        assert_eq!(
            strip_reminder("Trample (It can deal excess combat damage.)"),
            "Trample"
        );
    }

    #[test]
    fn test_strip_reminder_mid_line() {
        assert_eq!(
            strip_reminder("Cycling {2} ({2}, Discard this card: Draw a card.), then scry 1."),
            "Cycling {2}, then scry 1."
        );
    }

    #[test]
    fn test_reminder_with_hybrid_symbols() {
        assert_eq!(
            strip_reminder("{G/P} ({G/P} can be paid with either {G} or 2 life.)"),
            "{G/P}"
        );
    }

    #[test]
    fn test_reminder_at_line_start() {
        assert_eq!(strip_reminder("(Reminder only.)"), "");
    }

    #[test]
    fn test_brace_prefixed_kept() {
        assert_eq!(strip_reminder("Pay {(odd)} now"), "Pay {(odd)} now");
    }

    #[test]
    fn test_no_reminder_untouched() {
        assert_eq!(strip_reminder("  Draw a card.  "), "Draw a card.");
    }

    #[test]
    fn test_nested_reminder() {
        let line = "Flying (Blocked only by creatures (even tapped ones) with reach.)";
        assert_eq!(strip_once(line), "Flying (Blocked only by creatures with reach.)");
        assert_eq!(strip_reminder(line), "Flying");
        assert_eq!(strip_reminder("Draw ((twice)) a card."), "Draw a card.");
    }

    #[test]
    fn test_idempotent() {
        let once = strip_reminder("Equip {2} ({2}: Attach to target creature you control.)");
        assert_eq!(strip_reminder(&once), once);
    }
}

//! Rules-text normalization integration tests.
//!
//! These tests run whole lines through the normalizer: reminder stripping,
//! name recognition against a registry, SELF/PARENT rewriting inside
//! granted abilities, and capitalization.

use cardtext::cards::{construct_uname, CardRegistry, RawRecord};
use cardtext::config::{FallbackPolicy, NormalizerConfig};
use cardtext::text::{
    hyphenate_non, normalize_capitals, strip_reminder, NameCandidates, NameResolver, Normalizer,
    Resolution,
};
use proptest::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

fn registry_with(cards: &[(&str, &str)]) -> CardRegistry {
    let mut registry = CardRegistry::new();
    for (name, typeline) in cards {
        registry.ingest(&RawRecord::new(*name, *typeline)).unwrap();
    }
    registry
}

// =============================================================================
// SELF and PARENT Tests
// =============================================================================

/// Test that a card's own name becomes SELF and reminder text goes away.
#[test]
fn test_self_reference() {
    init_logging();
    let mut registry = registry_with(&[("Serra Angel", "Creature — Angel")]);
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    let line = normalizer.normalize_line(
        "When Serra Angel enters the battlefield, draw a card. (You draw it.)",
        &names(&["Serra Angel"]),
    );
    assert_eq!(line, "when SELF enters the battlefield, draw a card.");
}

/// Test that a legendary card's shortname also becomes SELF.
#[test]
fn test_shortname_self_reference() {
    let mut registry = registry_with(&[("Jedit Ojanen of Efrava", "Legendary Creature — Cat Warrior")]);
    let id = registry.get_by_name("Jedit").unwrap().id;
    registry
        .set_rules("Jedit Ojanen of Efrava", "Whenever Jedit attacks, create a token.")
        .unwrap();
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    assert!(normalizer.normalize_card(id).unwrap());
    assert_eq!(
        normalizer.registry().get(id).unwrap().rules,
        "whenever SELF attacks, create a token."
    );
}

/// Test that a self-name inside an ability granted to another object
/// becomes PARENT.
#[test]
fn test_granted_ability_parent() {
    let mut registry = registry_with(&[("Blessed Aura", "Enchantment — Aura")]);
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    let line = normalizer.normalize_line(
        "Enchanted creature has \"Sacrifice Blessed Aura: Draw a card.\"",
        &names(&["Blessed Aura"]),
    );
    assert_eq!(line, "enchanted creature has \"sacrifice PARENT: draw a card.\"");
}

/// Test that a quoted ability the card gives itself keeps SELF.
#[test]
fn test_own_quoted_ability_self() {
    let mut registry = registry_with(&[("Blessed Aura", "Enchantment — Aura")]);
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    let line = normalizer.normalize_line(
        "Blessed Aura has \"Sacrifice Blessed Aura: Draw a card.\"",
        &names(&["Blessed Aura"]),
    );
    assert_eq!(line, "SELF has \"sacrifice SELF: draw a card.\"");
}

/// Test that a created token's quoted ability is scoped to the token.
#[test]
fn test_token_scope() {
    let mut registry = registry_with(&[("Kaldra Compleat", "Legendary Artifact — Equipment")]);
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    let line = normalizer.normalize_line(
        "Create a token named Kaldra with \"Whenever Kaldra deals damage equal to Kaldra Compleat's power, exile that creature.\"",
        &names(&["Kaldra Compleat"]),
    );
    assert_eq!(
        line,
        "create a token named NAME_Kaldra with \"whenever SELF deals damage equal to PARENT's power, exile that creature.\""
    );
    assert!(normalizer.registry().is_known("Kaldra"));
}

// =============================================================================
// Name Recognition Tests
// =============================================================================

/// Test that a comma list of known cards becomes a list of tokens.
#[test]
fn test_name_list() {
    let mut registry = registry_with(&[
        ("Icy Manipulator", "Artifact"),
        ("Juggernaut", "Artifact Creature — Juggernaut"),
        ("Mishra's Factory", "Land"),
    ]);
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    let line = normalizer.normalize_line(
        "Search your library for cards named Icy Manipulator, Juggernaut, and Mishra's Factory.",
        &[],
    );
    assert_eq!(
        line,
        "search your library for cards named NAME_Icy_Manipulator, NAME_Juggernaut, and NAME_Mishra_s_Factory."
    );
}

/// Test that a full name wins over its own shortname prefix.
#[test]
fn test_ambiguous_full_name_wins() {
    init_logging();
    let mut registry = registry_with(&[("Kongming, Sleeping Dragon", "Legendary Creature — Human Advisor")]);
    let config = NormalizerConfig::default();

    let words: Vec<&str> = "Kongming, Sleeping Dragon.".split_whitespace().collect();
    let candidates = NameCandidates::scan(&words, &[], &config).unwrap();
    let resolution = NameResolver::new(&registry, &[], config.fallback).resolve(candidates.iter());
    match &resolution {
        Resolution::Ambiguous { chosen, alternatives } => {
            assert_eq!(chosen.as_slice(), ["Kongming, Sleeping Dragon".to_string()]);
            assert_eq!(alternatives.len(), 1);
            assert_eq!(alternatives[0].as_slice(), ["Kongming".to_string()]);
        }
        other => panic!("expected an ambiguous resolution, got {:?}", other),
    }

    let mut normalizer = Normalizer::new(&mut registry, &config);
    let line = normalizer.normalize_line("Search for a card named Kongming, Sleeping Dragon.", &[]);
    assert_eq!(
        line,
        format!(
            "search for a card named {}.",
            construct_uname("Kongming, Sleeping Dragon")
        )
    );
}

/// Test the fallback policies when nothing resolves.
#[test]
fn test_fallback_policies() {
    let line = "Create a token named Alpha, Beta";

    let mut registry = CardRegistry::new();
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);
    assert_eq!(
        normalizer.normalize_line(line, &[]),
        "create a token named NAME_Alpha, beta"
    );
    assert!(registry.is_known("Alpha"));
    assert!(!registry.is_known("Alpha, Beta"));

    let mut registry = CardRegistry::new();
    let config = NormalizerConfig::default().with_fallback(FallbackPolicy::First);
    let mut normalizer = Normalizer::new(&mut registry, &config);
    assert_eq!(
        normalizer.normalize_line(line, &[]),
        "create a token named NAME_Alpha__Beta"
    );
    assert!(registry.is_known("Alpha, Beta"));
}

/// Test that a marker inside a longer word is ignored.
#[test]
fn test_marker_inside_word() {
    let mut registry = registry_with(&[("Juggernaut", "Artifact Creature — Juggernaut")]);
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    assert_eq!(
        normalizer.normalize_line("Unnamed Juggernaut abilities", &[]),
        "unnamed juggernaut abilities"
    );
}

/// Test the transform marker.
#[test]
fn test_transform_marker() {
    let mut registry = registry_with(&[("Insectile Aberration", "Creature — Human Insect")]);
    let config = NormalizerConfig::default();
    let mut normalizer = Normalizer::new(&mut registry, &config);

    assert_eq!(
        normalizer.normalize_line("Delver transforms into Insectile Aberration.", &[]),
        "delver transforms into NAME_Insectile_Aberration."
    );
}

/// Test that an extra marker from the configuration is honored.
#[test]
fn test_configured_marker() {
    let mut registry = registry_with(&[("Juggernaut", "Artifact Creature — Juggernaut")]);
    let config = NormalizerConfig::default().with_marker("Tap ");
    let mut normalizer = Normalizer::new(&mut registry, &config);

    assert_eq!(
        normalizer.normalize_line("Tap Juggernaut.", &[]),
        "tap NAME_Juggernaut."
    );
}

// =============================================================================
// Capitalization Tests
// =============================================================================

/// Test lowercasing around preserved tokens.
#[test]
fn test_capitalization() {
    assert_eq!(normalize_capitals("SELF Deals 3 Damage"), "SELF deals 3 damage");
    assert_eq!(
        normalize_capitals("Return PARENT To Its Owner's Hand."),
        "return PARENT to its owner's hand."
    );
}

/// Test non- hyphenation.
#[test]
fn test_hyphenation() {
    assert_eq!(hyphenate_non("destroy target nonbasic land"), "destroy target non-basic land");
    assert_eq!(hyphenate_non("choose none"), "choose none");
    assert_eq!(hyphenate_non("non-basic"), "non-basic");
    assert_eq!(hyphenate_non("draw a card nonetheless."), "draw a card nonetheless.");
}

// =============================================================================
// Properties
// =============================================================================

fn token_or_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("SELF".to_string()),
        Just("PARENT".to_string()),
        Just("NAME_Serra_Angel".to_string()),
        "[A-Za-z']{1,8}",
    ]
}

proptest! {
    /// Stripping reminder text twice changes nothing more.
    #[test]
    fn reminder_stripping_idempotent(
        parts in prop::collection::vec(
            (
                "[A-Za-z ,.]{0,12}",
                prop::option::of(("[a-z ]{0,10}", prop::option::of("[a-z ]{0,6}"), "[a-z ]{0,6}")),
            ),
            0..5,
        )
    ) {
        let mut line = String::new();
        for (text, reminder) in &parts {
            line.push_str(text);
            if let Some((head, inner, tail)) = reminder {
                line.push_str(" (");
                line.push_str(head);
                if let Some(inner) = inner {
                    line.push_str(" (");
                    line.push_str(inner);
                    line.push_str(") ");
                }
                line.push_str(tail);
                line.push(')');
            }
        }
        let once = strip_reminder(&line);
        prop_assert!(!once.contains('('));
        prop_assert_eq!(strip_reminder(&once), once);
    }

    /// Tokens survive lowercasing, every other word is lowercased.
    #[test]
    fn capitalization_preserves_tokens(words in prop::collection::vec(token_or_word(), 0..12)) {
        let line = words.join(" ");
        let normalized = normalize_capitals(&line);
        for (before, after) in words.iter().zip(normalized.split(' ')) {
            if before.contains("SELF") || before.contains("PARENT") || before.contains("NAME_") {
                prop_assert_eq!(after, before.as_str());
            } else {
                prop_assert_eq!(after, before.to_lowercase());
            }
        }
        prop_assert_eq!(normalize_capitals(&normalized), normalized);
    }
}

//! Multi-face card relationships.
//!
//! A physical card may carry more than one named face:
//!
//! - **Split**: two halves printed side by side
//! - **Flip**: upright and upside-down orientations
//! - **Transform**: front and back of a double-faced card
//! - **Meld**: two components that combine into a third, melded card
//!
//! Each registered face records its relationship as a `MultiFace`. The
//! registry uses [`MultiFace::expected_links`] to derive what every
//! sibling should record in return, and checks or fills that in as
//! siblings arrive.

use serde::{Deserialize, Serialize};

/// The kind of multi-face relationship, without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MultiKind {
    None,
    Split,
    Flip,
    Transform,
    Meld,
}

impl MultiKind {
    /// Parse the `M-type` field of a raw record.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "normal" => Some(MultiKind::None),
            "split" => Some(MultiKind::Split),
            "flip" => Some(MultiKind::Flip),
            "transform" => Some(MultiKind::Transform),
            "meld" => Some(MultiKind::Meld),
            _ => None,
        }
    }

    /// Lowercase label, as used in raw records and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MultiKind::None => "none",
            MultiKind::Split => "split",
            MultiKind::Flip => "flip",
            MultiKind::Transform => "transform",
            MultiKind::Meld => "meld",
        }
    }
}

impl std::fmt::Display for MultiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A face's position in a meld triple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldRole {
    /// One of the two cards that meld together.
    Component { partner: String, result: String },
    /// The melded card. Components are kept sorted.
    Result { components: [String; 2] },
}

impl MeldRole {
    /// Build a result role, sorting the components so comparisons
    /// don't depend on the order they were listed in.
    #[must_use]
    pub fn result(a: impl Into<String>, b: impl Into<String>) -> Self {
        let mut components = [a.into(), b.into()];
        components.sort();
        MeldRole::Result { components }
    }
}

/// How a card face relates to its siblings.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MultiFace {
    #[default]
    None,
    Split(String),
    Flip(String),
    Transform(String),
    Meld(MeldRole),
}

impl MultiFace {
    /// Build a two-face link of the given kind.
    ///
    /// Returns `None` for `MultiKind::None` and `MultiKind::Meld`, which
    /// do not take a single sibling.
    #[must_use]
    pub fn pair(kind: MultiKind, other: impl Into<String>) -> Option<Self> {
        let other = other.into();
        match kind {
            MultiKind::Split => Some(MultiFace::Split(other)),
            MultiKind::Flip => Some(MultiFace::Flip(other)),
            MultiKind::Transform => Some(MultiFace::Transform(other)),
            MultiKind::None | MultiKind::Meld => None,
        }
    }

    /// The relationship kind.
    #[must_use]
    pub fn kind(&self) -> MultiKind {
        match self {
            MultiFace::None => MultiKind::None,
            MultiFace::Split(_) => MultiKind::Split,
            MultiFace::Flip(_) => MultiKind::Flip,
            MultiFace::Transform(_) => MultiKind::Transform,
            MultiFace::Meld(_) => MultiKind::Meld,
        }
    }

    /// Is this a plain single-faced card?
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, MultiFace::None)
    }

    /// The linked sibling for two-face kinds.
    #[must_use]
    pub fn sibling(&self) -> Option<&str> {
        match self {
            MultiFace::Split(other) | MultiFace::Flip(other) | MultiFace::Transform(other) => {
                Some(other)
            }
            MultiFace::None | MultiFace::Meld(_) => None,
        }
    }

    /// Every other face this face references.
    #[must_use]
    pub fn related(&self) -> Vec<&str> {
        match self {
            MultiFace::None => Vec::new(),
            MultiFace::Split(other) | MultiFace::Flip(other) | MultiFace::Transform(other) => {
                vec![other.as_str()]
            }
            MultiFace::Meld(MeldRole::Component { partner, result }) => {
                vec![partner.as_str(), result.as_str()]
            }
            MultiFace::Meld(MeldRole::Result { components }) => {
                components.iter().map(String::as_str).collect()
            }
        }
    }

    /// What each related face must record for the link to be symmetric,
    /// given that this face is called `own_name`.
    #[must_use]
    pub fn expected_links(&self, own_name: &str) -> Vec<(String, MultiFace)> {
        match self {
            MultiFace::None => Vec::new(),
            MultiFace::Split(other) => vec![(other.clone(), MultiFace::Split(own_name.into()))],
            MultiFace::Flip(other) => vec![(other.clone(), MultiFace::Flip(own_name.into()))],
            MultiFace::Transform(other) => {
                vec![(other.clone(), MultiFace::Transform(own_name.into()))]
            }
            MultiFace::Meld(MeldRole::Component { partner, result }) => vec![
                (
                    partner.clone(),
                    MultiFace::Meld(MeldRole::Component {
                        partner: own_name.into(),
                        result: result.clone(),
                    }),
                ),
                (
                    result.clone(),
                    MultiFace::Meld(MeldRole::result(own_name, partner.clone())),
                ),
            ],
            MultiFace::Meld(MeldRole::Result { components }) => {
                let [a, b] = components;
                vec![
                    (
                        a.clone(),
                        MultiFace::Meld(MeldRole::Component {
                            partner: b.clone(),
                            result: own_name.into(),
                        }),
                    ),
                    (
                        b.clone(),
                        MultiFace::Meld(MeldRole::Component {
                            partner: a.clone(),
                            result: own_name.into(),
                        }),
                    ),
                ]
            }
        }
    }
}

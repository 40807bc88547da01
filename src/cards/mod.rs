//! Card system: definitions, ingestion, multi-face links, and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Registration-order identifier
//! - `Card`: One named face with its rules text
//! - `RawRecord`: Field set produced by an external loader
//! - `SourceCard`: Structured JSON card object, converted to `RawRecord`s
//! - `MultiFace`: Split, flip, transform and meld relationships
//! - `CardRegistry`: Name tables, lookups and corpus queries
//!
//! ## Multi-face Cards
//!
//! Each face is registered as its own `Card`. Sibling links are checked
//! for symmetry as faces arrive, in any order.

pub mod attributes;
pub mod definition;
pub mod linker;
pub mod multiface;
pub mod raw;
pub mod registry;
pub mod shortname;
pub mod source;

pub use attributes::{colors_from_cost, parse_printings, Color, Printing, Rarity, Stats};
pub use definition::{construct_uname, Card, CardId, UNAME_PREFIX};
pub use linker::{LinkIssue, LinkReport, MulticardLinker};
pub use multiface::{MeldRole, MultiFace, MultiKind};
pub use raw::RawRecord;
pub use registry::{CardRegistry, MergeSummary};
pub use shortname::{derive_shortname, shortname_for};
pub use source::{RelatedPart, SourceCard, SourceFace, MELD_RESULT_SUFFIX};

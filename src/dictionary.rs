//! In-memory dictionary structures.
//!
//! The dictionary is materialized by an external loader into a
//! [`PrefixDictionary`] of [`DictionaryEntry`] values; the analysis code only
//! reads it.
//!
//! - [`radix`] - the compressed prefix tree
//! - [`entry`] - per-key lemma lists and prefix-legality masks
//! - [`descriptor`] - grammatical descriptor flags and prefix kinds

pub mod descriptor;
pub mod entry;
pub mod radix;

pub use descriptor::{DescFlag, PrefixKind, Tense, WordClass};
pub use entry::{DictionaryEntry, Lemma};
pub use radix::{InsertPolicy, PrefixDictionary};

/// The dictionary shape consumed by the lemmatizer.
pub type HebrewDictionary = PrefixDictionary<DictionaryEntry>;

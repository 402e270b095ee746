//! Morphological analysis on top of the dictionary.
//!
//! - [`affix`] - the legal prefix table and its grammatical masks
//! - [`tolerance`] - alternate-spelling rules and their penalties
//! - [`lemmatizer`] - single-word lemmatization, exact and tolerant
//! - [`stream`] - tokenization and lemmatization of whole texts

pub mod affix;
pub mod lemmatizer;
pub mod stream;
pub mod tolerance;

pub use affix::AffixRules;
pub use lemmatizer::{Lemmatizer, LemmatizerConfig, WordType};
pub use stream::StreamLemmatizer;
pub use tolerance::{AlternateSpelling, ToleranceRule, ToleranceRules};

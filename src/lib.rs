//! # HebMorph
//!
//! Morphological analysis for Hebrew text.
//!
//! ## Features
//!
//! - Streaming tokenizer aware of Hebrew punctuation (geresh, gershayim, makaf)
//! - Compressed prefix-tree dictionary shared read-only across threads
//! - Prefix stripping checked against each lemma's grammar
//! - Tolerant lookup of full and defective spellings
//! - Per-token lemma candidates with scores and character offsets
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use hebmorph::prelude::*;
//!
//! let mut dict = HebrewDictionary::new();
//! dict.insert("אימא", DictionaryEntry::new(Lemma::own(DescFlag::NOUN), PrefixKind::ALL))
//!     .unwrap();
//! let lemmatizer = Arc::new(Lemmatizer::new(Arc::new(dict), Arc::new(AffixRules::hebrew())));
//!
//! let tokens: Vec<AnalyzedToken> = StreamLemmatizer::new("ואמא".chars(), lemmatizer).collect();
//! assert_eq!(tokens[0].lemmas(), vec!["אימא"]);
//! ```

pub mod analysis;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod morphology;

pub mod prelude {
    pub use crate::analysis::{
        AnalyzedToken, BasicLemmaFilter, Candidate, HebrewToken, LemmaFilter, SpecialCaseSet,
        Token, TokenType, Tokenizer, TokenizerConfig,
    };
    pub use crate::config::HebMorphConfig;
    pub use crate::dictionary::{
        DescFlag, DictionaryEntry, HebrewDictionary, Lemma, PrefixDictionary, PrefixKind,
    };
    pub use crate::error::{HebMorphError, Result};
    pub use crate::morphology::{AffixRules, Lemmatizer, LemmatizerConfig, StreamLemmatizer};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

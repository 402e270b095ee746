//! Text analysis for Hebrew.
//!
//! This module turns raw text into classified tokens and post-processes the
//! lemma candidates produced for them.

pub mod chars;
pub mod lemma_filter;
pub mod special_cases;
pub mod token;
pub mod tokenizer;

pub use lemma_filter::{BasicLemmaFilter, BasicLemmaFilterConfig, ChainedLemmaFilter, LemmaFilter};
pub use special_cases::SpecialCaseSet;
pub use token::{AnalyzedToken, Candidate, HebrewToken, Token, TokenType};
pub use tokenizer::{Tokenizer, TokenizerConfig};

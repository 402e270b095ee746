//! Token types produced by the tokenizer and the lemmatizers.
//!
//! # Core Types
//!
//! - [`Token`] - a classified span of the input stream
//! - [`TokenType`] - bit flags describing the script and shape of a token
//! - [`HebrewToken`] - one lemma candidate for a Hebrew word
//! - [`Candidate`] - a lemma candidate or a verbatim pass-through
//! - [`AnalyzedToken`] - a token together with its candidates
//!
//! # Examples
//!
//! ```
//! use hebmorph::analysis::token::{HebrewToken, TokenType};
//! use hebmorph::dictionary::DescFlag;
//!
//! // "הבית" analysed as the definite article plus "בית"
//! let token = HebrewToken::new("הבית", 1, DescFlag::NOUN, None, 1.0);
//! assert_eq!(token.lemma(), "בית");
//! assert_eq!(token.prefix(), "ה");
//!
//! let ty = TokenType::HEBREW | TokenType::ACRONYM;
//! assert!(ty.is_hebrew());
//! assert_eq!(ty.bits(), 33);
//! ```

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::dictionary::DescFlag;

bitflags! {
    /// Classification of a token. An empty value marks the end of a stream.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TokenType: u32 {
        const HEBREW = 1;
        const NON_HEBREW = 2;
        /// Starts with a digit.
        const NUMERIC = 4;
        /// Hebrew letters followed by Latin letters or digits.
        const MIXED = 8;
        /// Ended by a makaf (`בית-ספר`).
        const CONSTRUCT = 16;
        /// Carries an internal gershayim (`צה"ל`).
        const ACRONYM = 32;
        /// Ended by the exact-match suffix character.
        const EXACT = 64;
        /// Matched a registered special case.
        const CUSTOM = 128;
    }
}

impl TokenType {
    pub fn is_hebrew(self) -> bool {
        self.contains(TokenType::HEBREW)
    }

    pub fn is_numeric(self) -> bool {
        self.contains(TokenType::NUMERIC)
    }
}

/// A classified span of the input stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Normalized token text.
    pub text: String,
    /// Offset of the first character, in characters from the start of the stream.
    pub start_offset: usize,
    /// Length of the span in source characters.
    pub length: usize,
    pub token_type: TokenType,
}

impl Token {
    pub fn new<S: Into<String>>(
        text: S,
        start_offset: usize,
        length: usize,
        token_type: TokenType,
    ) -> Self {
        Token {
            text: text.into(),
            start_offset,
            length,
            token_type,
        }
    }

    pub fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A lemma candidate for a Hebrew word.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HebrewToken {
    /// The analysed surface form, prefix included.
    pub text: String,
    /// Number of leading characters stripped as a grammatical prefix.
    pub prefix_length: usize,
    pub desc: DescFlag,
    /// The lemma; `None` when the form after the prefix is its own lemma.
    pub lemma: Option<String>,
    /// Confidence in `[0.0, 1.0]`; exact matches score 1.0.
    pub score: f32,
}

impl HebrewToken {
    pub fn new<S: Into<String>>(
        text: S,
        prefix_length: usize,
        desc: DescFlag,
        lemma: Option<String>,
        score: f32,
    ) -> Self {
        HebrewToken {
            text: text.into(),
            prefix_length,
            desc,
            lemma,
            score,
        }
    }

    /// A candidate treating the whole word as its own lemma.
    pub fn own_lemma<S: Into<String>>(text: S) -> Self {
        Self::new(text, 0, DescFlag::empty(), None, 1.0)
    }

    /// Byte offset in `text` where the stem starts.
    fn stem_start(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.prefix_length)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// The stripped prefix.
    pub fn prefix(&self) -> &str {
        &self.text[..self.stem_start()]
    }

    /// The resolved lemma text.
    pub fn lemma(&self) -> &str {
        match &self.lemma {
            Some(lemma) => lemma,
            None => &self.text[self.stem_start()..],
        }
    }
}

impl fmt::Display for HebrewToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.text, self.lemma(), self.desc)?;
        if self.prefix_length > 0 {
            write!(f, "\tprefix={}", self.prefix())?;
        }
        write!(f, "\t{:.2}", self.score)
    }
}

/// A candidate emitted by the stream lemmatizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Candidate {
    /// A dictionary-backed (or synthetic) Hebrew lemma.
    Hebrew(HebrewToken),
    /// A token passed through as its own lemma.
    Verbatim { text: String, numeric: bool },
}

impl Candidate {
    pub fn verbatim<S: Into<String>>(text: S, numeric: bool) -> Self {
        Candidate::Verbatim {
            text: text.into(),
            numeric,
        }
    }

    pub fn lemma(&self) -> &str {
        match self {
            Candidate::Hebrew(token) => token.lemma(),
            Candidate::Verbatim { text, .. } => text,
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Candidate::Hebrew(token) => token.score,
            Candidate::Verbatim { .. } => 1.0,
        }
    }

    pub fn as_hebrew(&self) -> Option<&HebrewToken> {
        match self {
            Candidate::Hebrew(token) => Some(token),
            Candidate::Verbatim { .. } => None,
        }
    }
}

impl From<HebrewToken> for Candidate {
    fn from(token: HebrewToken) -> Self {
        Candidate::Hebrew(token)
    }
}

/// One token of lemmatized output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedToken {
    pub text: String,
    pub token_type: TokenType,
    pub start_offset: usize,
    pub end_offset: usize,
    pub candidates: Vec<Candidate>,
}

impl AnalyzedToken {
    /// Distinct lemma texts, in candidate order.
    pub fn lemmas(&self) -> Vec<&str> {
        let mut lemmas: Vec<&str> = Vec::with_capacity(self.candidates.len());
        for candidate in &self.candidates {
            let lemma = candidate.lemma();
            if !lemmas.contains(&lemma) {
                lemmas.push(lemma);
            }
        }
        lemmas
    }
}

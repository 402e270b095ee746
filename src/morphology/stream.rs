//! Lemmatization of a continuous text stream.
//!
//! [`StreamLemmatizer`] drives a [`Tokenizer`] and runs every Hebrew token
//! through the [`Lemmatizer`]: exact lookup first, tolerant lookup when that
//! finds nothing, and finally the word itself as its own lemma. Other tokens
//! are passed through verbatim.
//!
//! Two interfaces are offered. [`StreamLemmatizer::get_lemmatize_next_token`]
//! refills caller-owned buffers and returns the token type (empty at the end
//! of the stream), so hot loops allocate nothing per token. The [`Iterator`]
//! implementation yields [`AnalyzedToken`]s and applies the optional
//! [`LemmaFilter`].
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use hebmorph::analysis::token::TokenType;
//! use hebmorph::dictionary::{DescFlag, DictionaryEntry, HebrewDictionary, Lemma, PrefixKind};
//! use hebmorph::morphology::affix::AffixRules;
//! use hebmorph::morphology::lemmatizer::Lemmatizer;
//! use hebmorph::morphology::stream::StreamLemmatizer;
//!
//! let mut dict = HebrewDictionary::new();
//! dict.insert("בית", DictionaryEntry::new(Lemma::own(DescFlag::NOUN), PrefixKind::ALL))
//!     .unwrap();
//! let lemmatizer = Arc::new(Lemmatizer::new(Arc::new(dict), Arc::new(AffixRules::hebrew())));
//!
//! let mut stream = StreamLemmatizer::new("לבית 2024".chars(), lemmatizer);
//! let mut word = String::new();
//! let mut candidates = Vec::new();
//!
//! let token_type = stream.get_lemmatize_next_token(&mut word, &mut candidates);
//! assert_eq!(token_type, TokenType::HEBREW);
//! assert_eq!(candidates[0].lemma(), "בית");
//! assert_eq!((stream.start_offset(), stream.end_offset()), (0, 4));
//!
//! let token_type = stream.get_lemmatize_next_token(&mut word, &mut candidates);
//! assert!(token_type.is_numeric());
//! assert_eq!(word, "2024");
//!
//! assert!(stream.get_lemmatize_next_token(&mut word, &mut candidates).is_empty());
//! ```

use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::analysis::chars::{GERSHAYIM, is_hebrew_letter, remove_niqqud};
use crate::analysis::lemma_filter::LemmaFilter;
use crate::analysis::special_cases::SpecialCaseSet;
use crate::analysis::token::{AnalyzedToken, Candidate, HebrewToken, TokenType};
use crate::analysis::tokenizer::{Tokenizer, TokenizerConfig};
use crate::dictionary::DescFlag;
use crate::error::Result;
use crate::morphology::lemmatizer::Lemmatizer;

/// Tokenizes and lemmatizes a character stream.
pub struct StreamLemmatizer<I> {
    tokenizer: Tokenizer<I>,
    lemmatizer: Arc<Lemmatizer>,
    filter: Option<Arc<dyn LemmaFilter>>,
    start_offset: usize,
    end_offset: usize,
}

impl<I> fmt::Debug for StreamLemmatizer<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamLemmatizer")
            .field("filter", &self.filter.as_ref().map(|filter| filter.name()))
            .field("start_offset", &self.start_offset)
            .field("end_offset", &self.end_offset)
            .finish()
    }
}

impl<I: Iterator<Item = char>> StreamLemmatizer<I> {
    pub fn new(input: I, lemmatizer: Arc<Lemmatizer>) -> Self {
        Self::with_tokenizer_config(input, lemmatizer, TokenizerConfig::default())
    }

    pub fn with_tokenizer_config(
        input: I,
        lemmatizer: Arc<Lemmatizer>,
        config: TokenizerConfig,
    ) -> Self {
        let tokenizer = Tokenizer::with_config(input, config)
            .with_affix_rules(Arc::clone(lemmatizer.affixes()));
        StreamLemmatizer {
            tokenizer,
            lemmatizer,
            filter: None,
            start_offset: 0,
            end_offset: 0,
        }
    }

    /// Filter applied to each candidate list yielded by the iterator.
    pub fn with_lemma_filter(mut self, filter: Arc<dyn LemmaFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_special_cases(mut self, special_cases: SpecialCaseSet) -> Self {
        self.tokenizer = self.tokenizer.with_special_cases(special_cases);
        self
    }

    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    pub fn tokenizer(&self) -> &Tokenizer<I> {
        &self.tokenizer
    }

    pub fn add_special_case(&mut self, literal: &str) -> Result<bool> {
        self.tokenizer.add_special_case(literal)
    }

    pub fn remove_special_case(&mut self, literal: &str) -> bool {
        self.tokenizer.remove_special_case(literal)
    }

    pub fn special_cases_mut(&mut self) -> &mut SpecialCaseSet {
        self.tokenizer.special_cases_mut()
    }

    pub fn set_suffix_for_exact_match(&mut self, suffix: Option<char>) {
        self.tokenizer.set_suffix_for_exact_match(suffix);
    }

    /// Restart on a new input; offsets count from zero again.
    pub fn reset(&mut self, input: I) {
        self.tokenizer.reset(input);
        self.start_offset = 0;
        self.end_offset = 0;
    }

    /// Start offset of the last token, in characters.
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// End offset (exclusive) of the last token, in characters.
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Advance to the next token, writing its text into `word` and its
    /// candidates into `candidates` (both cleared first).
    ///
    /// Returns the token type; an empty type means the stream has ended.
    pub fn get_lemmatize_next_token(
        &mut self,
        word: &mut String,
        candidates: &mut Vec<Candidate>,
    ) -> TokenType {
        word.clear();
        candidates.clear();

        loop {
            let Some(token) = self.tokenizer.next_token() else {
                self.start_offset = self.tokenizer.offset();
                self.end_offset = self.start_offset;
                return TokenType::empty();
            };
            self.start_offset = token.start_offset;
            self.end_offset = token.end_offset();
            let mut token_type = token.token_type;

            if token_type.is_hebrew() {
                if self.lemmatizer.config().strip_niqqud {
                    word.push_str(&remove_niqqud(&token.text));
                } else {
                    word.push_str(&token.text);
                }

                // A prefix cut off by a makaf or quote mark (`ו-`, `ה"`) is not a word.
                if token_type.intersects(TokenType::CONSTRUCT | TokenType::ACRONYM)
                    && self.lemmatizer.is_legal_prefix(word)
                {
                    word.clear();
                    continue;
                }

                if token_type.contains(TokenType::EXACT) {
                    candidates.push(Candidate::verbatim(word.as_str(), false));
                    return token_type;
                }

                if token_type.contains(TokenType::MIXED)
                    && let Some(rest) = self.strip_hebrew_prefix(word)
                {
                    let rest = rest.to_string();
                    *word = rest;
                    candidates.push(Candidate::verbatim(word.as_str(), false));
                    return TokenType::NON_HEBREW;
                }

                if token_type.contains(TokenType::ACRONYM) {
                    let stripped = self.lemmatizer.try_stripping_prefix(word).to_string();
                    *word = stripped;
                    if !word.contains(GERSHAYIM) {
                        token_type.remove(TokenType::ACRONYM);
                    }
                }

                self.lemmatize_word(word, token_type, candidates);
                return token_type;
            }

            word.push_str(&token.text);
            if token_type.contains(TokenType::CUSTOM)
                && let Some(rest) = self.strip_hebrew_prefix(word)
            {
                let rest = rest.to_string();
                *word = rest;
            }
            candidates.push(Candidate::verbatim(word.as_str(), token_type.is_numeric()));
            return token_type;
        }
    }

    /// The non-Hebrew remainder of `word` after a legal Hebrew prefix
    /// (`בGoogle` → `Google`). A single trailing character is not split off.
    fn strip_hebrew_prefix<'a>(&self, word: &'a str) -> Option<&'a str> {
        let split = word.find(|c: char| !is_hebrew_letter(c))?;
        let (prefix, rest) = word.split_at(split);
        if prefix.is_empty()
            || rest.chars().nth(1).is_none()
            || rest.chars().any(is_hebrew_letter)
        {
            return None;
        }
        self.lemmatizer.is_legal_prefix(prefix).then_some(rest)
    }

    fn lemmatize_word(&self, word: &str, token_type: TokenType, candidates: &mut Vec<Candidate>) {
        for token in self.lemmatizer.lemmatize(word) {
            let candidate = Candidate::Hebrew(token);
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        if !candidates.is_empty() {
            return;
        }

        if token_type.contains(TokenType::ACRONYM) {
            candidates.push(Candidate::Hebrew(HebrewToken::new(
                word,
                0,
                DescFlag::ACRONYM,
                Some(word.to_string()),
                1.0,
            )));
            return;
        }

        if self.lemmatizer.config().tolerate {
            // Sorted best first, so the first reading of each lemma is its best.
            for token in self.lemmatizer.lemmatize_tolerant(word) {
                let seen = candidates
                    .iter()
                    .any(|candidate| candidate.lemma() == token.lemma());
                if !seen {
                    candidates.push(Candidate::Hebrew(token));
                }
            }
            if !candidates.is_empty() {
                trace!("{word}: {} tolerated readings", candidates.len());
                return;
            }
        }

        candidates.push(Candidate::Hebrew(HebrewToken::own_lemma(word)));
    }
}

impl<I: Iterator<Item = char>> Iterator for StreamLemmatizer<I> {
    type Item = AnalyzedToken;

    fn next(&mut self) -> Option<Self::Item> {
        let mut word = String::new();
        let mut candidates = Vec::new();
        let token_type = self.get_lemmatize_next_token(&mut word, &mut candidates);
        if token_type.is_empty() {
            return None;
        }

        if let Some(filter) = &self.filter
            && let Some(filtered) = filter.filter(&word, &candidates)
        {
            candidates = filtered;
        }

        Some(AnalyzedToken {
            text: word,
            token_type,
            start_offset: self.start_offset,
            end_offset: self.end_offset,
            candidates,
        })
    }
}

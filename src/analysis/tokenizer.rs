//! Streaming tokenizer for Hebrew text.
//!
//! [`Tokenizer`] pulls characters from any `Iterator<Item = char>` through an
//! internal buffer and emits classified [`Token`]s one at a time. Offsets are
//! counted in characters from the start of the stream and are unaffected by
//! buffer refills or by normalizations applied to the token text.
//!
//! Tokenization rules, in order of precedence:
//!
//! 1. A registered special case (see [`SpecialCaseSet`]) at a token start is
//!    emitted whole, longest match first. It may be preceded by a legal Hebrew
//!    prefix (`בC++`), and is rejected when a letter or digit follows it.
//! 2. Geresh and gershayim look-alikes are folded to `'` and `"`. Two
//!    consecutive gereshes become one `"`. A `"` is kept only inside a Hebrew
//!    word; one at the edge of a word is dropped.
//! 3. A token made of Hebrew letters (and niqqud) is `HEBREW`; Latin letters
//!    or digits directly after Hebrew letters make it `HEBREW | MIXED`; a
//!    token starting with any other letter or digit is `NON_HEBREW`, plus
//!    `NUMERIC` when it starts with a digit.
//! 4. Anything else ends the token. A makaf additionally flags the token as
//!    `CONSTRUCT`, and the configured exact-match suffix flags it as `EXACT`.
//!
//! # Examples
//!
//! ```
//! use hebmorph::analysis::token::TokenType;
//! use hebmorph::analysis::tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new("צה''ל, test 42".chars());
//!
//! let token = tokenizer.next_token().unwrap();
//! assert_eq!(token.text, "צה\"ל");
//! assert_eq!(token.token_type, TokenType::HEBREW | TokenType::ACRONYM);
//! assert_eq!((token.start_offset, token.length), (0, 5));
//!
//! let rest: Vec<String> = tokenizer.map(|t| t.text).collect();
//! assert_eq!(rest, vec!["test", "42"]);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::chars::{
    GERESH, GERSHAYIM, accepts_geresh, is_final_letter, is_geresh, is_gershayim, is_hebrew_letter,
    is_makaf, is_niqqud,
};
use crate::analysis::special_cases::SpecialCaseSet;
use crate::analysis::token::{Token, TokenType};
use crate::error::Result;
use crate::morphology::affix::AffixRules;

/// Configuration for the tokenizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Number of characters read from the input per refill.
    pub buffer_size: usize,
    /// Longest token text kept; longer runs are clipped.
    pub max_token_length: usize,
    /// Character that, appended to a word, requests exact matching.
    pub suffix_for_exact_match: Option<char>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            buffer_size: 4096,
            max_token_length: 127,
            suffix_for_exact_match: None,
        }
    }
}

/// A pull-based tokenizer over a character stream.
pub struct Tokenizer<I> {
    input: I,
    buffer: Vec<char>,
    cursor: usize,
    /// Stream offset of `buffer[0]`.
    base: usize,
    exhausted: bool,
    config: TokenizerConfig,
    special_cases: SpecialCaseSet,
    affixes: Option<Arc<AffixRules>>,
    token_offset: usize,
    token_length: usize,
}

/// The characters of a token under construction.
struct TokenText {
    text: String,
    /// Stream offset of each character of `text`.
    starts: Vec<usize>,
    /// Stream offset just past the last character that belongs to the token.
    end: usize,
}

impl TokenText {
    fn last(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    fn len(&self) -> usize {
        self.starts.len()
    }

    fn push(&mut self, c: char, at: usize) {
        self.text.push(c);
        self.starts.push(at);
    }

    fn pop(&mut self) -> Option<char> {
        let c = self.text.pop()?;
        if let Some(at) = self.starts.pop() {
            self.end = at;
        }
        Some(c)
    }
}

impl<I: Iterator<Item = char>> Tokenizer<I> {
    pub fn new(input: I) -> Self {
        Self::with_config(input, TokenizerConfig::default())
    }

    pub fn with_config(input: I, config: TokenizerConfig) -> Self {
        Tokenizer {
            input,
            buffer: Vec::with_capacity(config.buffer_size.max(1)),
            cursor: 0,
            base: 0,
            exhausted: false,
            config,
            special_cases: SpecialCaseSet::new(),
            affixes: None,
            token_offset: 0,
            token_length: 0,
        }
    }

    pub fn with_special_cases(mut self, special_cases: SpecialCaseSet) -> Self {
        self.special_cases = special_cases;
        self
    }

    /// Let special cases be preceded by a legal prefix from `affixes`.
    pub fn with_affix_rules(mut self, affixes: Arc<AffixRules>) -> Self {
        self.affixes = Some(affixes);
        self
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn set_suffix_for_exact_match(&mut self, suffix: Option<char>) {
        self.config.suffix_for_exact_match = suffix;
    }

    pub fn special_cases(&self) -> &SpecialCaseSet {
        &self.special_cases
    }

    pub fn special_cases_mut(&mut self) -> &mut SpecialCaseSet {
        &mut self.special_cases
    }

    pub fn add_special_case(&mut self, literal: &str) -> Result<bool> {
        self.special_cases.insert(literal)
    }

    pub fn remove_special_case(&mut self, literal: &str) -> bool {
        self.special_cases.remove(literal)
    }

    pub fn clear_special_cases(&mut self) {
        self.special_cases.clear();
    }

    /// Restart on a new input; offsets count from zero again.
    pub fn reset(&mut self, input: I) {
        self.input = input;
        self.buffer.clear();
        self.cursor = 0;
        self.base = 0;
        self.exhausted = false;
        self.token_offset = 0;
        self.token_length = 0;
    }

    /// Start offset of the last token returned.
    pub fn offset(&self) -> usize {
        self.token_offset
    }

    /// Length in source characters of the last token returned.
    pub fn length_in_source(&self) -> usize {
        self.token_length
    }

    fn stream_offset(&self) -> usize {
        self.base + self.cursor
    }

    /// The character `ahead` places after the cursor, refilling as needed.
    fn peek(&mut self, ahead: usize) -> Option<char> {
        while self.cursor + ahead >= self.buffer.len() {
            if self.exhausted {
                return None;
            }
            self.refill();
        }
        Some(self.buffer[self.cursor + ahead])
    }

    fn refill(&mut self) {
        if self.cursor > 0 {
            self.buffer.drain(..self.cursor);
            self.base += self.cursor;
            self.cursor = 0;
        }
        let size = self.config.buffer_size.max(1);
        let before = self.buffer.len();
        self.buffer.extend(self.input.by_ref().take(size));
        if self.buffer.len() - before < size {
            self.exhausted = true;
        }
    }

    /// Pull the next token, or `None` at the end of the stream.
    pub fn next_token(&mut self) -> Option<Token> {
        let first = loop {
            let Some(c) = self.peek(0) else {
                self.token_offset = self.stream_offset();
                self.token_length = 0;
                return None;
            };
            if let Some(len) = self.match_special_case() {
                return Some(self.take_special_case(len));
            }
            if starts_token(c) {
                break c;
            }
            self.cursor += 1;
        };

        let start = self.stream_offset();
        let mut token_type = if is_hebrew_letter(first) {
            TokenType::HEBREW
        } else if first.is_numeric() {
            TokenType::NON_HEBREW | TokenType::NUMERIC
        } else {
            TokenType::NON_HEBREW
        };
        let mut token = TokenText {
            text: String::new(),
            starts: Vec::new(),
            end: start,
        };

        while let Some(c) = self.peek(0) {
            let at = self.stream_offset();
            let hebrew = token_type.is_hebrew();
            let prev = token.last();
            let after_letter = prev.is_some_and(|p| is_hebrew_letter(p) || is_niqqud(p));

            let append = if is_hebrew_letter(c) || (hebrew && is_niqqud(c)) {
                if !hebrew {
                    // no mixing in this direction
                    break;
                }
                c
            } else if c.is_alphanumeric() {
                if hebrew && !token.text.is_empty() {
                    token_type |= TokenType::MIXED;
                }
                c
            } else if hebrew && is_gershayim(c) {
                if !after_letter {
                    break;
                }
                GERSHAYIM
            } else if hebrew && is_geresh(c) {
                if !after_letter && prev != Some(GERESH) {
                    break;
                }
                GERESH
            } else {
                if is_makaf(c) {
                    token_type |= TokenType::CONSTRUCT;
                    self.cursor += 1;
                } else if self.config.suffix_for_exact_match == Some(c) {
                    token_type |= TokenType::EXACT;
                    self.cursor += 1;
                }
                break;
            };

            self.cursor += 1;
            token.end = self.stream_offset();
            if token.len() >= self.config.max_token_length {
                continue;
            }
            if append == GERESH && prev == Some(GERESH) {
                token.text.pop();
                token.text.push(GERSHAYIM);
            } else {
                token.push(append, at);
            }
        }

        trim_token(&mut token);
        if token_type.is_hebrew() {
            token_type.set(TokenType::ACRONYM, has_internal_gershayim(&token.text));
        }

        self.token_offset = start;
        self.token_length = token.end - start;
        Some(Token::new(
            token.text,
            self.token_offset,
            self.token_length,
            token_type,
        ))
    }

    /// Length of a special case (with any legal prefix before it) starting at
    /// the cursor.
    fn match_special_case(&mut self) -> Option<usize> {
        if self.special_cases.is_empty() {
            return None;
        }

        let mut starts = vec![0];
        if let Some(affixes) = self.affixes.clone() {
            let mut prefix = String::new();
            for i in 0..affixes.max_prefix_len() {
                match self.peek(i) {
                    Some(c) if is_hebrew_letter(c) => {
                        prefix.push(c);
                        if affixes.is_legal_prefix(&prefix) {
                            starts.push(i + 1);
                        }
                    }
                    _ => break,
                }
            }
        }

        for start in starts {
            let mut needle = String::new();
            let mut lengths = Vec::new();
            for i in 0..self.special_cases.max_len() {
                let Some(c) = self.peek(start + i) else { break };
                needle.extend(c.to_lowercase());
                if !self.special_cases.has_prefix(&needle) {
                    break;
                }
                if self.special_cases.matches(&needle) {
                    lengths.push(start + i + 1);
                }
            }
            // Longest match not glued to a following word.
            while let Some(len) = lengths.pop() {
                if !self.peek(len).is_some_and(char::is_alphanumeric) {
                    return Some(len);
                }
            }
        }
        None
    }

    fn take_special_case(&mut self, len: usize) -> Token {
        let start = self.stream_offset();
        let text: String = self.buffer[self.cursor..self.cursor + len].iter().collect();
        self.cursor += len;
        self.token_offset = start;
        self.token_length = len;
        Token::new(text, start, len, TokenType::CUSTOM | TokenType::NON_HEBREW)
    }
}

impl<I: Iterator<Item = char>> Iterator for Tokenizer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Final-form letters never start a word; stray marks never start a token.
fn starts_token(c: char) -> bool {
    if is_hebrew_letter(c) {
        !is_final_letter(c)
    } else {
        c.is_alphanumeric()
    }
}

/// Drop a trailing gershayim, then a trailing geresh that cannot belong to
/// the last letter (`ג'` keeps it, `שלום'` does not).
fn trim_token(token: &mut TokenText) {
    if token.last() == Some(GERSHAYIM) {
        token.pop();
    }
    if token.len() > 2 && token.last() == Some(GERESH) {
        let before = token.text.chars().rev().nth(1);
        if !before.is_some_and(accepts_geresh) {
            token.pop();
        }
    }
}

fn has_internal_gershayim(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(3).any(|w| {
        w[1] == GERSHAYIM && is_hebrew_letter(w[0]) && is_hebrew_letter(w[2])
    })
}

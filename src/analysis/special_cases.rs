//! Literal tokens that must survive tokenization intact.
//!
//! Words such as `C++` or `i-phone` contain characters that would normally
//! end a token. Registering them in a [`SpecialCaseSet`] makes the tokenizer
//! emit them whole. Matching is case-insensitive.
//!
//! # Examples
//!
//! ```
//! use hebmorph::analysis::special_cases::SpecialCaseSet;
//!
//! let mut cases = SpecialCaseSet::new();
//! cases.insert("C++").unwrap();
//! assert!(cases.contains("c++"));
//! assert!(cases.insert("two words").is_err());
//! ```

use std::collections::BTreeSet;
use std::ops::Bound;

use log::debug;

use crate::error::{HebMorphError, Result};

/// Longest literal that may be registered, in characters.
pub const MAX_SPECIAL_CASE_LENGTH: usize = 25;

/// A set of case-insensitive literal tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialCaseSet {
    /// Lowercased literals.
    cases: BTreeSet<String>,
    /// Length of the longest literal, in characters.
    max_len: usize,
}

impl SpecialCaseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from several literals, failing on the first invalid one.
    pub fn with_cases<I, S>(literals: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for literal in literals {
            set.insert(literal.as_ref())?;
        }
        Ok(set)
    }

    fn normalize(literal: &str) -> String {
        literal.to_lowercase()
    }

    /// Register a literal. Returns `false` when it was already present.
    pub fn insert(&mut self, literal: &str) -> Result<bool> {
        let len = literal.chars().count();
        if len == 0 {
            return Err(HebMorphError::invalid_argument("special case must not be empty"));
        }
        if len > MAX_SPECIAL_CASE_LENGTH {
            return Err(HebMorphError::invalid_argument(format!(
                "special case {literal:?} is longer than {MAX_SPECIAL_CASE_LENGTH} characters"
            )));
        }
        if literal.chars().any(char::is_whitespace) {
            return Err(HebMorphError::invalid_argument(format!(
                "special case {literal:?} contains whitespace"
            )));
        }

        let normalized = Self::normalize(literal);
        self.max_len = self.max_len.max(normalized.chars().count());
        let added = self.cases.insert(normalized);
        if added {
            debug!("registered special case {literal:?}");
        }
        Ok(added)
    }

    /// Deregister a literal. Returns `false` when it was not present.
    pub fn remove(&mut self, literal: &str) -> bool {
        let removed = self.cases.remove(&Self::normalize(literal));
        if removed {
            self.max_len = self
                .cases
                .iter()
                .map(|case| case.chars().count())
                .max()
                .unwrap_or(0);
        }
        removed
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.cases.contains(&Self::normalize(literal))
    }

    pub fn clear(&mut self) {
        self.cases.clear();
        self.max_len = 0;
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Length of the longest registered literal, in characters.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// The registered literals, lowercased, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(String::as_str)
    }

    /// Whether `needle` (already lowercased) equals a registered literal.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.cases.contains(needle)
    }

    /// Whether some registered literal starts with `needle` (already lowercased).
    pub(crate) fn has_prefix(&self, needle: &str) -> bool {
        self.cases
            .range::<str, _>((Bound::Included(needle), Bound::Unbounded))
            .next()
            .is_some_and(|case| case.starts_with(needle))
    }
}

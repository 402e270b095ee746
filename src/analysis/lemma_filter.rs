//! Post-processing of lemma candidate lists.
//!
//! A [`LemmaFilter`] decides, one candidate at a time, which readings of a
//! word are worth keeping. Filtering is all-or-nothing from the caller's
//! point of view: when a filter would drop every candidate, it reports that
//! no filtering happened and the caller keeps the original list.
//!
//! # Available Filters
//!
//! - [`BasicLemmaFilter`] - drops low-scoring readings, with a stricter bar for verbs
//! - [`ChainedLemmaFilter`] - runs several filters in sequence
//!
//! # Examples
//!
//! ```
//! use hebmorph::analysis::lemma_filter::{BasicLemmaFilter, LemmaFilter};
//! use hebmorph::analysis::token::{Candidate, HebrewToken};
//! use hebmorph::dictionary::DescFlag;
//!
//! let filter = BasicLemmaFilter::new();
//! let candidates: Vec<Candidate> = vec![
//!     HebrewToken::new("אימא", 0, DescFlag::NOUN, None, 0.8).into(),
//!     HebrewToken::new("אימא", 0, DescFlag::VERB, None, 0.8).into(),
//! ];
//!
//! let filtered = filter.filter("אמא", &candidates).unwrap();
//! assert_eq!(filtered.len(), 1);
//! assert!(!filtered[0].as_hebrew().unwrap().desc.is_verb());
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::token::Candidate;

/// Trait for candidate filters.
///
/// Only [`is_valid_token`](LemmaFilter::is_valid_token) must be provided;
/// the list-level operations are derived from it.
pub trait LemmaFilter: Send + Sync {
    /// Whether a single candidate survives the filter.
    fn is_valid_token(&self, candidate: &Candidate) -> bool;

    /// Whether a list is worth filtering at all.
    fn needs_filtering(&self, candidates: &[Candidate]) -> bool {
        candidates.len() > 1
    }

    /// Filter `candidates` into `out`, which is cleared first.
    ///
    /// Returns `false`, leaving `out` empty, when the list needs no
    /// filtering or when every candidate would be dropped.
    fn filter_into(&self, _word: &str, candidates: &[Candidate], out: &mut Vec<Candidate>) -> bool {
        out.clear();
        if !self.needs_filtering(candidates) {
            return false;
        }
        out.extend(
            candidates
                .iter()
                .filter(|candidate| self.is_valid_token(candidate))
                .cloned(),
        );
        !out.is_empty()
    }

    /// Filter `candidates`; `None` means "keep the original list".
    fn filter(&self, word: &str, candidates: &[Candidate]) -> Option<Vec<Candidate>> {
        let mut out = Vec::with_capacity(candidates.len());
        self.filter_into(word, candidates, &mut out).then_some(out)
    }

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Score thresholds of [`BasicLemmaFilter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicLemmaFilterConfig {
    /// Candidates scoring below this are dropped.
    pub min_score: f32,
    /// Verb readings scoring below this are dropped.
    pub min_verb_score: f32,
}

impl Default for BasicLemmaFilterConfig {
    fn default() -> Self {
        BasicLemmaFilterConfig {
            min_score: 0.7,
            min_verb_score: 0.85,
        }
    }
}

/// Drops tolerated readings that scored too low.
///
/// Verbs get a stricter threshold: vowel-letter edits turn many nouns into
/// plausible-looking verb forms.
#[derive(Debug, Clone, Default)]
pub struct BasicLemmaFilter {
    config: BasicLemmaFilterConfig,
}

impl BasicLemmaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BasicLemmaFilterConfig) -> Self {
        BasicLemmaFilter { config }
    }

    pub fn config(&self) -> &BasicLemmaFilterConfig {
        &self.config
    }
}

impl LemmaFilter for BasicLemmaFilter {
    fn is_valid_token(&self, candidate: &Candidate) -> bool {
        match candidate {
            Candidate::Hebrew(token) => {
                if token.score < self.config.min_score {
                    return false;
                }
                !(token.desc.is_verb() && token.score < self.config.min_verb_score)
            }
            Candidate::Verbatim { .. } => true,
        }
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}

/// Applies several filters in turn, each to the output of the previous one.
#[derive(Clone, Default)]
pub struct ChainedLemmaFilter {
    filters: Vec<Arc<dyn LemmaFilter>>,
}

impl fmt::Debug for ChainedLemmaFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("ChainedLemmaFilter")
            .field("filters", &names)
            .finish()
    }
}

impl ChainedLemmaFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(mut self, filter: Arc<dyn LemmaFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl LemmaFilter for ChainedLemmaFilter {
    fn is_valid_token(&self, candidate: &Candidate) -> bool {
        self.filters
            .iter()
            .all(|filter| filter.is_valid_token(candidate))
    }

    fn filter_into(&self, word: &str, candidates: &[Candidate], out: &mut Vec<Candidate>) -> bool {
        out.clear();
        let mut current: Option<Vec<Candidate>> = None;
        for filter in &self.filters {
            let input = current.as_deref().unwrap_or(candidates);
            if let Some(filtered) = filter.filter(word, input) {
                current = Some(filtered);
            }
        }
        match current {
            Some(filtered) => {
                out.extend(filtered);
                true
            }
            None => false,
        }
    }

    fn name(&self) -> &'static str {
        "chained"
    }
}

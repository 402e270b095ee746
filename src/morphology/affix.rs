//! Legal Hebrew prefix combinations.
//!
//! Hebrew glues prepositions, the definite article, conjunctions and relative
//! particles onto the following word. [`AffixRules`] is the table of every
//! legal combination together with the [`PrefixKind`] mask of words it may
//! attach to.
//!
//! The built-in table follows hspell's prefix grammar: an optional
//! conjunction `ו`, then an optional relative particle (`ש`, `כש`, `מש`,
//! `לכש`), then an optional preposition or article (`ב`, `כ`, `ל`, `מ`, `ה`,
//! `מה`). The mask of a combination is the intersection of the masks of its
//! parts.
//!
//! # Examples
//!
//! ```
//! use hebmorph::dictionary::PrefixKind;
//! use hebmorph::morphology::affix::AffixRules;
//!
//! let rules = AffixRules::hebrew();
//! assert!(rules.is_legal_prefix("וכשב"));
//! assert!(!rules.is_legal_prefix("בו"));
//! assert_eq!(rules.mask("ה"), Some(PrefixKind::MISC));
//! ```

use ahash::AHashMap;
use log::debug;

use crate::dictionary::PrefixKind;
use crate::error::{HebMorphError, Result};

const RELATIVE: PrefixKind = PrefixKind::ALL.difference(PrefixKind::IMPER);
const PREPOSITION: PrefixKind = PrefixKind::NONDEF.union(PrefixKind::MISC);

const CONJUNCTIONS: &[(&str, PrefixKind)] = &[("", PrefixKind::ALL), ("ו", PrefixKind::ALL)];

const RELATIVES: &[(&str, PrefixKind)] = &[
    ("", PrefixKind::ALL),
    ("ש", RELATIVE),
    ("כש", RELATIVE),
    ("מש", RELATIVE),
    ("לכש", RELATIVE),
];

const PREPOSITIONS: &[(&str, PrefixKind)] = &[
    ("", PrefixKind::ALL),
    ("ב", PREPOSITION.union(PrefixKind::B)),
    ("כ", PREPOSITION),
    ("ל", PREPOSITION.union(PrefixKind::L)),
    ("מ", PREPOSITION),
    ("ה", PrefixKind::MISC),
    ("מה", PrefixKind::MISC),
];

/// Table of legal prefixes and the words they attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRules {
    prefixes: AHashMap<String, PrefixKind>,
    /// Longest prefix, in characters.
    max_prefix_len: usize,
}

impl Default for AffixRules {
    fn default() -> Self {
        Self::hebrew()
    }
}

impl AffixRules {
    /// The standard Hebrew prefix table.
    pub fn hebrew() -> Self {
        Self::generate(false)
    }

    /// The standard table, additionally accepting the interrogative `ה`
    /// before verbs (`הלכת?`).
    pub fn hebrew_with_interrogative_he() -> Self {
        Self::generate(true)
    }

    fn generate(interrogative_he: bool) -> Self {
        let mut prefixes: AHashMap<String, PrefixKind> = AHashMap::new();
        for &(conjunction, conjunction_mask) in CONJUNCTIONS {
            for &(relative, relative_mask) in RELATIVES {
                for &(preposition, preposition_mask) in PREPOSITIONS {
                    let prefix = format!("{conjunction}{relative}{preposition}");
                    if prefix.is_empty() {
                        continue;
                    }
                    let mask = conjunction_mask & relative_mask & preposition_mask;
                    *prefixes.entry(prefix).or_insert(PrefixKind::empty()) |= mask;
                }
            }
        }
        if interrogative_he {
            if let Some(mask) = prefixes.get_mut("ה") {
                *mask |= PrefixKind::VERB;
            }
        }

        let rules = Self::from_map(prefixes);
        debug!(
            "built Hebrew prefix table with {} prefixes (longest {})",
            rules.len(),
            rules.max_prefix_len
        );
        rules
    }

    /// Build rules from an externally sourced table.
    ///
    /// Masks of repeated prefixes are merged. An empty prefix is rejected.
    pub fn from_table<I, S>(table: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, PrefixKind)>,
        S: Into<String>,
    {
        let mut prefixes: AHashMap<String, PrefixKind> = AHashMap::new();
        for (prefix, mask) in table {
            let prefix = prefix.into();
            if prefix.is_empty() {
                return Err(HebMorphError::invalid_argument(
                    "prefix table contains an empty prefix",
                ));
            }
            *prefixes.entry(prefix).or_insert(PrefixKind::empty()) |= mask;
        }
        Ok(Self::from_map(prefixes))
    }

    fn from_map(prefixes: AHashMap<String, PrefixKind>) -> Self {
        let max_prefix_len = prefixes
            .keys()
            .map(|prefix| prefix.chars().count())
            .max()
            .unwrap_or(0);
        AffixRules {
            prefixes,
            max_prefix_len,
        }
    }

    /// The kinds of words `prefix` may attach to, if it is a legal prefix.
    pub fn mask(&self, prefix: &str) -> Option<PrefixKind> {
        self.prefixes.get(prefix).copied()
    }

    pub fn is_legal_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    /// Length of the longest legal prefix, in characters.
    pub fn max_prefix_len(&self) -> usize {
        self.max_prefix_len
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// All prefixes with their masks, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PrefixKind)> {
        self.prefixes
            .iter()
            .map(|(prefix, &mask)| (prefix.as_str(), mask))
    }
}

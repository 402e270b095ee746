//! Dictionary-backed lemmatization of single words.
//!
//! [`Lemmatizer::lemmatize`] strips every legal prefix the word could start
//! with and looks the remainder up in the dictionary, keeping the readings
//! whose grammar accepts that prefix. [`Lemmatizer::lemmatize_tolerant`] does
//! the same for each alternate spelling produced by the
//! [`ToleranceRules`](crate::morphology::tolerance::ToleranceRules), scoring
//! the results by the penalty of the rule that produced them.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use hebmorph::dictionary::{DescFlag, DictionaryEntry, HebrewDictionary, Lemma, PrefixKind};
//! use hebmorph::morphology::affix::AffixRules;
//! use hebmorph::morphology::lemmatizer::Lemmatizer;
//!
//! let mut dict = HebrewDictionary::new();
//! dict.insert("בית", DictionaryEntry::new(Lemma::own(DescFlag::NOUN), PrefixKind::ALL))
//!     .unwrap();
//!
//! let lemmatizer = Lemmatizer::new(Arc::new(dict), Arc::new(AffixRules::hebrew()));
//! let candidates = lemmatizer.lemmatize("ובבית");
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(candidates[0].prefix_length, 2);
//! assert_eq!(candidates[0].lemma(), "בית");
//! ```

use std::sync::Arc;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::analysis::chars::{GERESH, GERSHAYIM};
use crate::analysis::token::HebrewToken;
use crate::dictionary::HebrewDictionary;
use crate::morphology::affix::AffixRules;
use crate::morphology::tolerance::ToleranceRules;

/// Configuration for the lemmatizers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmatizerConfig {
    /// Whether the stream lemmatizer falls back to tolerant lookups.
    pub tolerate: bool,
    /// Words longer than this are never looked up tolerantly.
    pub max_tolerant_word_length: usize,
    /// Letters that must remain after stripping a prefix; at least one
    /// always does.
    pub min_stem_length: usize,
    /// Whether the stream lemmatizer removes niqqud before lookup.
    pub strip_niqqud: bool,
}

impl Default for LemmatizerConfig {
    fn default() -> Self {
        LemmatizerConfig {
            tolerate: true,
            max_tolerant_word_length: 20,
            min_stem_length: 1,
            strip_niqqud: true,
        }
    }
}

/// How a word was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordType {
    Unrecognized,
    Hebrew,
    HebrewWithPrefix,
    HebrewTolerated,
    HebrewToleratedWithPrefix,
}

/// Lemmatizes single words against a shared dictionary.
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    dictionary: Arc<HebrewDictionary>,
    affixes: Arc<AffixRules>,
    tolerance: ToleranceRules,
    config: LemmatizerConfig,
}

impl Lemmatizer {
    pub fn new(dictionary: Arc<HebrewDictionary>, affixes: Arc<AffixRules>) -> Self {
        Lemmatizer {
            dictionary,
            affixes,
            tolerance: ToleranceRules::hebrew(),
            config: LemmatizerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LemmatizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tolerance_rules(mut self, tolerance: ToleranceRules) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn dictionary(&self) -> &HebrewDictionary {
        &self.dictionary
    }

    pub fn affixes(&self) -> &Arc<AffixRules> {
        &self.affixes
    }

    pub fn config(&self) -> &LemmatizerConfig {
        &self.config
    }

    pub fn is_legal_prefix(&self, prefix: &str) -> bool {
        self.affixes.is_legal_prefix(prefix)
    }

    /// Exact lemmatization: every (prefix, dictionary reading) split of the
    /// word, each scored 1.0. Candidates are not deduplicated.
    pub fn lemmatize(&self, word: &str) -> Vec<HebrewToken> {
        let mut candidates = Vec::new();
        self.collect(word, 1.0, &mut candidates);
        candidates
    }

    /// Lemmatize every alternate spelling of `word`, best score first.
    ///
    /// Each candidate's text is the alternate spelling that matched, and its
    /// score is the penalty of the rule that produced that spelling.
    pub fn lemmatize_tolerant(&self, word: &str) -> Vec<HebrewToken> {
        let mut candidates = Vec::new();
        if word.chars().count() > self.config.max_tolerant_word_length {
            return candidates;
        }
        for spelling in self.tolerance.alternate_spellings(word) {
            let before = candidates.len();
            self.collect(&spelling.text, spelling.penalty(), &mut candidates);
            if candidates.len() > before {
                trace!(
                    "{word}: {} matched {} readings via {}",
                    spelling.text,
                    candidates.len() - before,
                    spelling.rule
                );
            }
        }
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    fn collect(&self, word: &str, score: f32, out: &mut Vec<HebrewToken>) {
        if let Some(entry) = self.dictionary.get(word) {
            for lemma in entry.lemmas() {
                out.push(HebrewToken::new(word, 0, lemma.desc, lemma.text.clone(), score));
            }
        } else if let Some(bare) = word.strip_suffix(GERESH).filter(|bare| !bare.is_empty()) {
            // A trailing geresh is often a stray apostrophe.
            if let Some(entry) = self.dictionary.get(bare) {
                for lemma in entry.lemmas() {
                    let text = lemma.text.clone().unwrap_or_else(|| bare.to_string());
                    out.push(HebrewToken::new(word, 0, lemma.desc, Some(text), score));
                }
            }
        }

        let boundaries: Vec<usize> = word.char_indices().map(|(i, _)| i).collect();
        let max_prefix_len = self
            .affixes
            .max_prefix_len()
            .min(boundaries.len().saturating_sub(self.config.min_stem_length.max(1)));
        for prefix_len in 1..=max_prefix_len {
            let (prefix, stem) = word.split_at(boundaries[prefix_len]);
            let Some(mask) = self.affixes.mask(prefix) else {
                continue;
            };
            let Some(entry) = self.dictionary.get(stem) else {
                continue;
            };
            if !entry.permits(mask) {
                continue;
            }
            for lemma in entry.lemmas() {
                if lemma.desc.prefix_kinds().intersects(mask) {
                    out.push(HebrewToken::new(
                        word,
                        prefix_len,
                        lemma.desc,
                        lemma.text.clone(),
                        score,
                    ));
                }
            }
        }
    }

    /// Classify how (and whether) `word` is recognized.
    pub fn is_recognized_word(&self, word: &str, tolerate: bool) -> WordType {
        let classify = |candidates: &[HebrewToken], plain, prefixed| {
            if candidates.iter().any(|c| c.prefix_length == 0) {
                Some(plain)
            } else if candidates.is_empty() {
                None
            } else {
                Some(prefixed)
            }
        };

        let exact = self.lemmatize(word);
        if let Some(word_type) = classify(&exact, WordType::Hebrew, WordType::HebrewWithPrefix) {
            return word_type;
        }
        if tolerate {
            let tolerated = self.lemmatize_tolerant(word);
            if let Some(word_type) = classify(
                &tolerated,
                WordType::HebrewTolerated,
                WordType::HebrewToleratedWithPrefix,
            ) {
                return word_type;
            }
        }
        WordType::Unrecognized
    }

    /// Remove a legal prefix written before a quote mark (`ה"שטיח` → `שטיח`).
    pub fn try_stripping_prefix<'a>(&self, word: &'a str) -> &'a str {
        for mark in [GERSHAYIM, GERESH] {
            let Some(pos) = word.find(mark) else {
                continue;
            };
            let rest = &word[pos + mark.len_utf8()..];
            if pos > 0 && rest.chars().count() >= 2 && self.is_legal_prefix(&word[..pos]) {
                return rest;
            }
        }
        word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{DescFlag, DictionaryEntry, Lemma, PrefixKind};

    fn lemmatizer() -> Lemmatizer {
        let mut dict = HebrewDictionary::new();
        let noun = DescFlag::NOUN | DescFlag::MASCULINE | DescFlag::SINGULAR;
        dict.insert(
            "בית",
            DictionaryEntry::try_from_lemmas(
                vec![Lemma::own(noun), Lemma::new("בית", noun | DescFlag::SMICHUT)],
                PrefixKind::ALL,
            )
            .unwrap(),
        )
        .unwrap();
        dict.insert(
            "הלך",
            DictionaryEntry::new(
                Lemma::own(DescFlag::VERB | DescFlag::PAST | DescFlag::THIRD_PERSON),
                PrefixKind::VERB,
            ),
        )
        .unwrap();
        dict.insert(
            "אימא",
            DictionaryEntry::new(Lemma::own(DescFlag::NOUN | DescFlag::FEMININE), PrefixKind::ALL),
        )
        .unwrap();
        dict.insert(
            "אנציקלופדיה",
            DictionaryEntry::new(Lemma::own(DescFlag::NOUN | DescFlag::FEMININE), PrefixKind::ALL),
        )
        .unwrap();

        Lemmatizer::new(Arc::new(dict), Arc::new(AffixRules::hebrew()))
    }

    #[test]
    fn test_exact_match() {
        let candidates = lemmatizer().lemmatize("בית");
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.prefix_length == 0 && c.score == 1.0));
        assert!(candidates.iter().all(|c| c.lemma() == "בית"));
    }

    #[test]
    fn test_prefix_legality() {
        let lemmatizer = lemmatizer();

        // the article does not attach to the construct reading
        let candidates = lemmatizer.lemmatize("הבית");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].prefix_length, 1);
        assert_eq!(candidates[0].text, "הבית");
        assert!(!candidates[0].desc.is_construct());

        // a preposition attaches to both readings
        assert_eq!(lemmatizer.lemmatize("בבית").len(), 2);

        assert_eq!(lemmatizer.lemmatize("והלך").len(), 1);
        assert!(lemmatizer.lemmatize("ההלך").is_empty());
    }

    fn single_letter_lemmatizer() -> Lemmatizer {
        let mut dict = HebrewDictionary::new();
        dict.insert("ל", DictionaryEntry::new(Lemma::own(DescFlag::empty()), PrefixKind::ALL))
            .unwrap();
        Lemmatizer::new(Arc::new(dict), Arc::new(AffixRules::hebrew()))
    }

    #[test]
    fn test_single_letter_stems() {
        let lemmatizer = single_letter_lemmatizer();
        assert_eq!(lemmatizer.lemmatize("ל").len(), 1);

        let candidates = lemmatizer.lemmatize("של");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].prefix(), "ש");
        assert_eq!(candidates[0].lemma(), "ל");
        assert_eq!(lemmatizer.lemmatize("ול")[0].prefix_length, 1);
    }

    #[test]
    fn test_min_stem_length() {
        let config = LemmatizerConfig {
            min_stem_length: 2,
            ..Default::default()
        };
        let lemmatizer = single_letter_lemmatizer().with_config(config);
        assert!(lemmatizer.lemmatize("של").is_empty());
    }

    #[test]
    fn test_stem_is_never_empty() {
        let config = LemmatizerConfig {
            min_stem_length: 0,
            ..Default::default()
        };
        let lemmatizer = single_letter_lemmatizer().with_config(config);
        assert!(lemmatizer.lemmatize("וב").is_empty());
        assert!(lemmatizer.lemmatize("ו").is_empty());
        assert_eq!(lemmatizer.lemmatize("ול").len(), 1);
    }

    #[test]
    fn test_trailing_geresh() {
        let candidates = lemmatizer().lemmatize("בית'");
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.lemma() == "בית"));
    }

    #[test]
    fn test_tolerant() {
        let lemmatizer = lemmatizer();
        assert!(lemmatizer.lemmatize("אמא").is_empty());

        let candidates = lemmatizer.lemmatize_tolerant("אמא");
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].lemma(), "אימא");
        assert_eq!(candidates[0].text, "אימא");
        assert!(candidates[0].score < 1.0);

        let candidates = lemmatizer.lemmatize_tolerant("אנצקלופדיה");
        assert_eq!(candidates[0].lemma(), "אנציקלופדיה");
        assert_eq!(candidates[0].score, 0.8);
    }

    #[test]
    fn test_tolerant_never_inserts_before_last_letter() {
        let mut dict = HebrewDictionary::new();
        dict.insert("ספיר", DictionaryEntry::new(Lemma::own(DescFlag::NOUN), PrefixKind::ALL))
            .unwrap();
        let lemmatizer = Lemmatizer::new(Arc::new(dict), Arc::new(AffixRules::hebrew()));
        assert!(lemmatizer.lemmatize_tolerant("ספר").is_empty());
        assert!(lemmatizer.lemmatize_tolerant("ספור").is_empty());
        assert_eq!(lemmatizer.lemmatize_tolerant("ספרים").len(), 0);
    }

    #[test]
    fn test_tolerant_skips_long_words() {
        let config = LemmatizerConfig {
            max_tolerant_word_length: 2,
            ..Default::default()
        };
        let lemmatizer = lemmatizer().with_config(config);
        assert!(lemmatizer.lemmatize_tolerant("אמא").is_empty());
    }

    #[test]
    fn test_is_recognized_word() {
        let lemmatizer = lemmatizer();
        assert_eq!(lemmatizer.is_recognized_word("בית", false), WordType::Hebrew);
        assert_eq!(lemmatizer.is_recognized_word("לבית", false), WordType::HebrewWithPrefix);
        assert_eq!(lemmatizer.is_recognized_word("אמא", false), WordType::Unrecognized);
        assert_eq!(lemmatizer.is_recognized_word("אמא", true), WordType::HebrewTolerated);
        assert_eq!(
            lemmatizer.is_recognized_word("ואמא", true),
            WordType::HebrewToleratedWithPrefix
        );
        assert_eq!(lemmatizer.is_recognized_word("שולחן", true), WordType::Unrecognized);
    }

    #[test]
    fn test_try_stripping_prefix() {
        let lemmatizer = lemmatizer();
        assert_eq!(lemmatizer.try_stripping_prefix("ה\"שטיח"), "שטיח");
        assert_eq!(lemmatizer.try_stripping_prefix("ו'בית"), "בית");
        assert_eq!(lemmatizer.try_stripping_prefix("צה\"ל"), "צה\"ל");
        assert_eq!(lemmatizer.try_stripping_prefix("בית"), "בית");
    }
}

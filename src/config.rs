//! Aggregate configuration for the analysis pipeline.
//!
//! [`HebMorphConfig`] bundles the tokenizer, lemmatizer and filter settings
//! together with the special-case literals to register, and can be read
//! from JSON. Missing fields take their defaults.
//!
//! # Examples
//!
//! ```
//! use hebmorph::config::HebMorphConfig;
//!
//! let config = HebMorphConfig::from_json_str(
//!     r#"{ "lemmatizer": { "tolerate": false }, "special_cases": ["C++"] }"#,
//! )
//! .unwrap();
//! assert!(!config.lemmatizer.tolerate);
//! assert_eq!(config.tokenizer.buffer_size, 4096);
//! assert!(config.special_case_set().unwrap().contains("c++"));
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::lemma_filter::{BasicLemmaFilter, BasicLemmaFilterConfig};
use crate::analysis::special_cases::SpecialCaseSet;
use crate::analysis::tokenizer::TokenizerConfig;
use crate::dictionary::HebrewDictionary;
use crate::error::{HebMorphError, Result};
use crate::morphology::affix::AffixRules;
use crate::morphology::lemmatizer::{Lemmatizer, LemmatizerConfig};
use crate::morphology::stream::StreamLemmatizer;

/// Settings for every stage of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HebMorphConfig {
    pub tokenizer: TokenizerConfig,
    pub lemmatizer: LemmatizerConfig,
    pub filter: BasicLemmaFilterConfig,
    /// Literals registered as special cases on every new stream.
    pub special_cases: Vec<String>,
}

impl HebMorphConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: HebMorphConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that all values are within range.
    pub fn validate(&self) -> Result<()> {
        if self.tokenizer.buffer_size == 0 {
            return Err(HebMorphError::config("buffer_size must be at least 1"));
        }
        if self.tokenizer.max_token_length == 0 {
            return Err(HebMorphError::config("max_token_length must be at least 1"));
        }
        if self.lemmatizer.min_stem_length == 0 {
            return Err(HebMorphError::config("min_stem_length must be at least 1"));
        }
        for (name, value) in [
            ("min_score", self.filter.min_score),
            ("min_verb_score", self.filter.min_verb_score),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HebMorphError::config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The configured special cases as a set.
    pub fn special_case_set(&self) -> Result<SpecialCaseSet> {
        SpecialCaseSet::with_cases(&self.special_cases)
    }

    pub fn lemmatizer(
        &self,
        dictionary: Arc<HebrewDictionary>,
        affixes: Arc<AffixRules>,
    ) -> Lemmatizer {
        Lemmatizer::new(dictionary, affixes).with_config(self.lemmatizer.clone())
    }

    pub fn lemma_filter(&self) -> BasicLemmaFilter {
        BasicLemmaFilter::with_config(self.filter.clone())
    }

    /// A stream lemmatizer over `input` with the configured tokenizer
    /// settings, special cases and filter.
    pub fn stream_lemmatizer<I: Iterator<Item = char>>(
        &self,
        input: I,
        lemmatizer: Arc<Lemmatizer>,
    ) -> Result<StreamLemmatizer<I>> {
        let special_cases = self.special_case_set()?;
        Ok(
            StreamLemmatizer::with_tokenizer_config(input, lemmatizer, self.tokenizer.clone())
                .with_special_cases(special_cases)
                .with_lemma_filter(Arc::new(self.lemma_filter())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HebMorphConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tokenizer.max_token_length, 127);
        assert!(config.lemmatizer.tolerate);
        assert_eq!(config.filter.min_verb_score, 0.85);
        assert!(config.special_cases.is_empty());

        let parsed = HebMorphConfig::from_json_str("{}").unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json() {
        let config = HebMorphConfig::from_json_str(
            r#"{ "tokenizer": { "suffix_for_exact_match": "$" }, "filter": { "min_score": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.tokenizer.suffix_for_exact_match, Some('$'));
        assert_eq!(config.tokenizer.buffer_size, 4096);
        assert_eq!(config.filter.min_score, 0.5);
        assert_eq!(config.filter.min_verb_score, 0.85);
    }

    #[test]
    fn test_validation() {
        let mut config = HebMorphConfig::default();
        config.tokenizer.buffer_size = 0;
        assert!(matches!(config.validate(), Err(HebMorphError::Config(_))));

        let mut config = HebMorphConfig::default();
        config.filter.min_score = 1.5;
        assert!(matches!(config.validate(), Err(HebMorphError::Config(_))));

        let result = HebMorphConfig::from_json_str(r#"{ "tokenizer": { "max_token_length": 0 } }"#);
        assert!(matches!(result, Err(HebMorphError::Config(_))));

        let result = HebMorphConfig::from_json_str("not json");
        assert!(matches!(result, Err(HebMorphError::Json(_))));
    }

    #[test]
    fn test_bad_special_case() {
        let config = HebMorphConfig {
            special_cases: vec!["two words".to_string()],
            ..Default::default()
        };
        assert!(config.special_case_set().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = HebMorphConfig {
            special_cases: vec!["C#".to_string()],
            ..Default::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(HebMorphConfig::from_json_str(&json).unwrap(), config);
    }
}

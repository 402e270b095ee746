//! Orthographic tolerance rules.
//!
//! Hebrew is written both with and without the vowel letters `ו` and `י`
//! ("full" and "defective" spelling), so a word missing from the dictionary
//! is often a spelling variant of one that is present. [`ToleranceRules`]
//! generates those variants, one edit at a time, each rule carrying a fixed
//! penalty that becomes the score of any lemma reached through it.
//!
//! # Examples
//!
//! ```
//! use hebmorph::morphology::tolerance::{ToleranceRule, ToleranceRules};
//!
//! let rules = ToleranceRules::hebrew();
//! let spellings = rules.alternate_spellings("אמא");
//! assert!(spellings.iter().any(|s| s.text == "אימא" && s.rule == ToleranceRule::InsertYod));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::chars::{VAV, YOD};

/// A single-edit spelling substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToleranceRule {
    /// Add a `י` written in full spelling (`אמא` → `אימא`).
    InsertYod,
    /// Add a `ו` written in full spelling (`שמר` → `שומר`).
    InsertVav,
    /// Reduce `וו` to `ו`.
    CollapseDoubledVav,
    /// Reduce `יי` to `י` (`עניין` → `ענין`).
    CollapseDoubledYod,
}

impl ToleranceRule {
    pub const ALL: [ToleranceRule; 4] = [
        ToleranceRule::CollapseDoubledYod,
        ToleranceRule::InsertYod,
        ToleranceRule::InsertVav,
        ToleranceRule::CollapseDoubledVav,
    ];

    /// Score factor of lemmas reached through this rule; always below 1.0.
    pub fn penalty(self) -> f32 {
        match self {
            ToleranceRule::CollapseDoubledYod => 0.9,
            ToleranceRule::InsertYod | ToleranceRule::InsertVav => 0.8,
            ToleranceRule::CollapseDoubledVav => 0.8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ToleranceRule::InsertYod => "insert_yod",
            ToleranceRule::InsertVav => "insert_vav",
            ToleranceRule::CollapseDoubledVav => "collapse_doubled_vav",
            ToleranceRule::CollapseDoubledYod => "collapse_doubled_yod",
        }
    }

    /// Apply the rule at `pos`, if it is eligible there. Insertions go before
    /// `word[pos]`; collapses remove `word[pos]`, the second of the pair.
    ///
    /// No rule touches the first or the last letter of the word.
    pub fn apply(self, word: &[char], pos: usize) -> Option<Vec<char>> {
        let n = word.len();
        if pos == 0 || pos + 1 >= n {
            return None;
        }
        let prev = word[pos - 1];
        let cur = word[pos];

        let eligible = match self {
            ToleranceRule::InsertYod => cur != YOD && prev != YOD,
            ToleranceRule::InsertVav => cur != VAV && prev != VAV,
            // the pair itself must not start the word
            ToleranceRule::CollapseDoubledYod => cur == YOD && prev == YOD && pos >= 2,
            ToleranceRule::CollapseDoubledVav => cur == VAV && prev == VAV && pos >= 2,
        };
        if !eligible {
            return None;
        }

        let mut spelling = word.to_vec();
        match self {
            ToleranceRule::InsertYod => spelling.insert(pos, YOD),
            ToleranceRule::InsertVav => spelling.insert(pos, VAV),
            _ => {
                spelling.remove(pos);
            }
        }
        Some(spelling)
    }
}

impl fmt::Display for ToleranceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One alternate spelling of a word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateSpelling {
    pub text: String,
    pub rule: ToleranceRule,
    /// Character position the rule was applied at.
    pub position: usize,
}

impl AlternateSpelling {
    pub fn penalty(&self) -> f32 {
        self.rule.penalty()
    }
}

/// The set of tolerance rules in use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToleranceRules {
    rules: Vec<ToleranceRule>,
}

impl Default for ToleranceRules {
    fn default() -> Self {
        Self::hebrew()
    }
}

impl ToleranceRules {
    /// All rules.
    pub fn hebrew() -> Self {
        Self::with_rules(ToleranceRule::ALL)
    }

    pub fn with_rules<I: IntoIterator<Item = ToleranceRule>>(rules: I) -> Self {
        let mut unique: Vec<ToleranceRule> = Vec::new();
        for rule in rules {
            if !unique.contains(&rule) {
                unique.push(rule);
            }
        }
        let mut rules = unique;
        // Best penalty first, so duplicate spellings keep the better score.
        rules.sort_by(|a, b| b.penalty().total_cmp(&a.penalty()));
        ToleranceRules { rules }
    }

    pub fn rules(&self) -> &[ToleranceRule] {
        &self.rules
    }

    /// Every single-edit spelling of `word`, each distinct text once.
    pub fn alternate_spellings(&self, word: &str) -> Vec<AlternateSpelling> {
        let chars: Vec<char> = word.chars().collect();
        let mut spellings: Vec<AlternateSpelling> = Vec::new();
        for &rule in &self.rules {
            for pos in 1..chars.len() {
                let Some(spelling) = rule.apply(&chars, pos) else {
                    continue;
                };
                let text: String = spelling.into_iter().collect();
                if text != word && !spellings.iter().any(|s| s.text == text) {
                    spellings.push(AlternateSpelling {
                        text,
                        rule,
                        position: pos,
                    });
                }
            }
        }
        spellings
    }
}

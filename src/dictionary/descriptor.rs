//! Morphological descriptor flags and prefix-kind masks.
//!
//! A [`DescFlag`] encodes the grammatical reading of one lemma sense
//! (part of speech, gender, person, number, tense, possessive suffix and a
//! few markers) in a single `u32`. Several fields are multi-bit enumerations
//! packed into a shared mask, so they are read through the accessor methods
//! ([`DescFlag::word_class`], [`DescFlag::tense`], ...) rather than with
//! `contains`.
//!
//! A [`PrefixKind`] mask says which grammatical prefixes may attach to a word.
//! The same bit assignment is used by the prefix table and by every
//! dictionary entry, and a prefix may attach when the two masks intersect.
//!
//! # Examples
//!
//! ```
//! use hebmorph::dictionary::descriptor::{DescFlag, PrefixKind, WordClass};
//!
//! let desc = DescFlag::NOUN | DescFlag::MASCULINE | DescFlag::SINGULAR;
//! assert_eq!(desc.word_class(), WordClass::Noun);
//! assert_eq!(desc.prefix_kinds(), PrefixKind::ALL);
//! assert_eq!(desc.to_string(), "ע,ז,יחיד");
//! ```

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Grammatical descriptor of a lemma sense.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct DescFlag: u32 {
        const NOUN = 1;
        const VERB = 2;
        const ADJECTIVE = 3;

        const MASCULINE = 4;
        const FEMININE = 8;

        const FIRST_PERSON = 16;
        const SECOND_PERSON = 32;
        const THIRD_PERSON = 48;

        const SINGULAR = 64;
        const DOUBLE = 128;
        const PLURAL = 192;

        const INFINITIVE = 256;
        const PAST = 512;
        const PRESENT = 768;
        const FUTURE = 1024;
        const IMPERATIVE = 1280;
        const B_INFINITIVE = 1536;

        /// Possessive (pronominal) suffix attributes.
        const POSSESSIVE_MASCULINE = 2048;
        const POSSESSIVE_FEMININE = 4096;
        const POSSESSIVE_FIRST_PERSON = 8192;
        const POSSESSIVE_SECOND_PERSON = 16384;
        const POSSESSIVE_THIRD_PERSON = 24576;
        const POSSESSIVE_SINGULAR = 32768;
        const POSSESSIVE_DOUBLE = 65536;
        const POSSESSIVE_PLURAL = 98304;

        /// Construct state (smichut).
        const SMICHUT = 131072;
        const PROPER_NOUN = 262144;
        const ACRONYM = 1048576;
    }
}

bitflags! {
    /// Kinds of grammatical prefixes a word accepts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct PrefixKind: u8 {
        /// The preposition ב before a b-infinitive.
        const B = 1;
        /// The preposition ל before an infinitive.
        const L = 2;
        const VERB = 4;
        /// Prefixes that do not imply definiteness.
        const NONDEF = 8;
        const IMPER = 16;
        const MISC = 32;
        const ALL = 63;
    }
}

/// Part of speech encoded in the two lowest descriptor bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Other,
    Noun,
    Verb,
    Adjective,
}

/// Verb tense encoded in the tense field of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tense {
    None,
    Infinitive,
    Past,
    Present,
    Future,
    Imperative,
    BInfinitive,
}

impl DescFlag {
    pub const TYPE_MASK: u32 = 3;
    pub const GENDER_MASK: u32 = 12;
    pub const PERSON_MASK: u32 = 48;
    pub const NUMBER_MASK: u32 = 192;
    pub const TENSE_MASK: u32 = 1792;
    pub const POSSESSIVE_GENDER_MASK: u32 = 6144;
    pub const POSSESSIVE_PERSON_MASK: u32 = 24576;
    pub const POSSESSIVE_NUMBER_MASK: u32 = 98304;
    pub const POSSESSIVE_MASK: u32 = 129024;

    pub fn word_class(self) -> WordClass {
        match self.bits() & Self::TYPE_MASK {
            1 => WordClass::Noun,
            2 => WordClass::Verb,
            3 => WordClass::Adjective,
            _ => WordClass::Other,
        }
    }

    pub fn is_verb(self) -> bool {
        self.word_class() == WordClass::Verb
    }

    pub fn tense(self) -> Tense {
        match self.bits() & Self::TENSE_MASK {
            256 => Tense::Infinitive,
            512 => Tense::Past,
            768 => Tense::Present,
            1024 => Tense::Future,
            1280 => Tense::Imperative,
            1536 => Tense::BInfinitive,
            _ => Tense::None,
        }
    }

    pub fn is_construct(self) -> bool {
        self.contains(DescFlag::SMICHUT)
    }

    pub fn has_possessive(self) -> bool {
        self.bits() & Self::POSSESSIVE_MASK != 0
    }

    pub fn is_proper_noun(self) -> bool {
        self.contains(DescFlag::PROPER_NOUN)
    }

    /// The prefix kinds this lemma sense accepts.
    ///
    /// Words that are already definite (construct forms, words carrying a
    /// possessive suffix, proper nouns) take only non-definite prefixes.
    /// Conjugated verbs take verb prefixes, imperatives take only the
    /// imperative set, and infinitives are tied to their own preposition.
    pub fn prefix_kinds(self) -> PrefixKind {
        let definite = self.is_construct() || self.has_possessive();
        match self.word_class() {
            WordClass::Verb => match self.tense() {
                Tense::Imperative => PrefixKind::IMPER,
                Tense::Infinitive => PrefixKind::L,
                Tense::BInfinitive => PrefixKind::B,
                Tense::Present if definite => PrefixKind::NONDEF,
                Tense::Present => PrefixKind::ALL,
                _ => PrefixKind::VERB,
            },
            WordClass::Noun | WordClass::Adjective if definite || self.is_proper_noun() => {
                PrefixKind::NONDEF
            }
            _ => PrefixKind::ALL,
        }
    }
}

const PERSON_NAMES: [&str; 4] = ["", "1", "2", "3"];
const NUMBER_NAMES: [&str; 4] = ["", "יחיד", "זוגי", "רבים"];

/// Short Hebrew grammatical description, e.g. `פ,ז,3,יחיד,עבר`.
impl fmt::Display for DescFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits = self.bits();
        let mut parts: Vec<&str> = Vec::new();

        parts.push(match self.word_class() {
            WordClass::Noun => "ע",
            WordClass::Verb => "פ",
            WordClass::Adjective => "ת",
            WordClass::Other => "x",
        });
        // Both genders may be set at once.
        if bits & DescFlag::MASCULINE.bits() != 0 {
            parts.push("ז");
        }
        if bits & DescFlag::FEMININE.bits() != 0 {
            parts.push("נ");
        }
        let person = ((bits & Self::PERSON_MASK) >> 4) as usize;
        if person != 0 {
            parts.push(PERSON_NAMES[person]);
        }
        let number = ((bits & Self::NUMBER_MASK) >> 6) as usize;
        if number != 0 {
            parts.push(NUMBER_NAMES[number]);
        }
        match self.tense() {
            Tense::Past => parts.push("עבר"),
            Tense::Present => parts.push("הווה"),
            Tense::Future => parts.push("עתיד"),
            Tense::Imperative => parts.push("ציווי"),
            Tense::Infinitive => parts.push("מקור"),
            Tense::BInfinitive => parts.extend(["מקור", "ב"]),
            Tense::None => {}
        }
        if self.is_proper_noun() {
            parts.push("פרטי");
        }
        if self.is_construct() {
            parts.push("סמיכות");
        }
        write!(f, "{}", parts.join(","))?;

        if self.has_possessive() {
            f.write_str(",כינוי/")?;
            let mut suffix: Vec<&str> = Vec::new();
            match bits & Self::POSSESSIVE_GENDER_MASK {
                2048 => suffix.push("ז"),
                4096 => suffix.push("נ"),
                _ => {}
            }
            let person = ((bits & Self::POSSESSIVE_PERSON_MASK) >> 13) as usize;
            if person != 0 {
                suffix.push(PERSON_NAMES[person]);
            }
            let number = ((bits & Self::POSSESSIVE_NUMBER_MASK) >> 15) as usize;
            if number != 0 {
                suffix.push(NUMBER_NAMES[number]);
            }
            write!(f, "{}", suffix.join(","))?;
        }
        Ok(())
    }
}

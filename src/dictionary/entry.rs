//! Dictionary entries stored under each surface key.
//!
//! A [`DictionaryEntry`] holds every lemma sense a surface form can stand for,
//! ordered by descriptor flag, plus the mask of prefix kinds that may be glued
//! to the surface form. Entries are built once while the dictionary is loaded
//! and never change afterwards.

use serde::{Deserialize, Serialize};

use crate::dictionary::descriptor::{DescFlag, PrefixKind};
use crate::error::{HebMorphError, Result};

/// One lemma sense of a surface form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lemma {
    /// The lemma text; `None` when the surface form is its own lemma.
    pub text: Option<String>,
    pub desc: DescFlag,
}

impl Lemma {
    pub fn new<S: Into<String>>(text: S, desc: DescFlag) -> Self {
        Lemma {
            text: Some(text.into()),
            desc,
        }
    }

    /// A lemma sense whose lemma is the surface form itself.
    pub fn own(desc: DescFlag) -> Self {
        Lemma { text: None, desc }
    }
}

/// The morphological payload stored per surface key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EntryParts", into = "EntryParts")]
pub struct DictionaryEntry {
    lemmas: Vec<Lemma>,
    prefixes: PrefixKind,
}

/// Serialized shape of a [`DictionaryEntry`].
#[derive(Serialize, Deserialize)]
struct EntryParts {
    lemmas: Vec<Lemma>,
    prefixes: PrefixKind,
}

impl TryFrom<EntryParts> for DictionaryEntry {
    type Error = HebMorphError;

    fn try_from(parts: EntryParts) -> Result<Self> {
        DictionaryEntry::from_raw_parts(parts.lemmas, parts.prefixes)
    }
}

impl From<DictionaryEntry> for EntryParts {
    fn from(entry: DictionaryEntry) -> Self {
        EntryParts {
            lemmas: entry.lemmas,
            prefixes: entry.prefixes,
        }
    }
}

impl DictionaryEntry {
    pub fn new(lemma: Lemma, prefixes: PrefixKind) -> Self {
        DictionaryEntry {
            lemmas: vec![lemma],
            prefixes,
        }
    }

    /// Build an entry from several lemma senses, rejecting an empty list and
    /// duplicate (lemma, descriptor) pairs.
    pub fn try_from_lemmas(lemmas: Vec<Lemma>, prefixes: PrefixKind) -> Result<Self> {
        let mut iter = lemmas.into_iter();
        let first = iter
            .next()
            .ok_or_else(|| HebMorphError::invalid_argument("entry must have at least one lemma"))?;
        let mut entry = DictionaryEntry::new(first, prefixes);
        for lemma in iter {
            entry.add_lemma(lemma)?;
        }
        Ok(entry)
    }

    /// Build an entry from already-serialized data.
    ///
    /// Duplicates are passed through untouched; the list is still required to
    /// be non-empty and is put in descriptor order.
    pub fn from_raw_parts(mut lemmas: Vec<Lemma>, prefixes: PrefixKind) -> Result<Self> {
        if lemmas.is_empty() {
            return Err(HebMorphError::invalid_argument(
                "entry must have at least one lemma",
            ));
        }
        lemmas.sort_by_key(|lemma| lemma.desc.bits());
        Ok(DictionaryEntry { lemmas, prefixes })
    }

    /// Add a lemma sense, keeping the list ordered by descriptor flag.
    pub fn add_lemma(&mut self, lemma: Lemma) -> Result<()> {
        if self.lemmas.contains(&lemma) {
            return Err(HebMorphError::invalid_argument(format!(
                "duplicate lemma {:?} with descriptor {}",
                lemma.text, lemma.desc
            )));
        }
        let pos = self
            .lemmas
            .partition_point(|existing| existing.desc.bits() <= lemma.desc.bits());
        self.lemmas.insert(pos, lemma);
        Ok(())
    }

    pub fn lemmas(&self) -> &[Lemma] {
        &self.lemmas
    }

    pub fn prefixes(&self) -> PrefixKind {
        self.prefixes
    }

    /// Whether a prefix of the given kinds may be glued to this surface form.
    pub fn permits(&self, kinds: PrefixKind) -> bool {
        self.prefixes.intersects(kinds)
    }
}

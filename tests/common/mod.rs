//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use hebmorph::prelude::*;

const NOUN_M: DescFlag = DescFlag::NOUN.union(DescFlag::MASCULINE).union(DescFlag::SINGULAR);
const NOUN_F: DescFlag = DescFlag::NOUN.union(DescFlag::FEMININE).union(DescFlag::SINGULAR);

/// A small dictionary covering nouns, a construct form, a verb and an
/// acronym.
pub fn dictionary() -> HebrewDictionary {
    let mut dict = HebrewDictionary::new();
    let mut add = |key: &str, lemmas: Vec<Lemma>, prefixes: PrefixKind| {
        let entry = DictionaryEntry::try_from_lemmas(lemmas, prefixes).unwrap();
        dict.insert(key, entry).unwrap();
    };

    add("אימא", vec![Lemma::own(NOUN_F)], PrefixKind::ALL);
    add("בית", vec![Lemma::own(NOUN_M)], PrefixKind::ALL);
    add("בתי", vec![Lemma::new("בית", NOUN_M | DescFlag::PLURAL | DescFlag::SMICHUT)], PrefixKind::ALL);
    add("ספר", vec![Lemma::own(NOUN_M)], PrefixKind::ALL);
    add("שטיח", vec![Lemma::own(NOUN_M)], PrefixKind::ALL);
    add("אנציקלופדיה", vec![Lemma::own(NOUN_F)], PrefixKind::ALL);
    add("ענין", vec![Lemma::own(NOUN_M)], PrefixKind::ALL);
    add(
        "הלכו",
        vec![Lemma::new("הלך", DescFlag::VERB | DescFlag::PAST | DescFlag::THIRD_PERSON | DescFlag::PLURAL)],
        PrefixKind::VERB,
    );
    add("צה\"ל", vec![Lemma::own(DescFlag::NOUN | DescFlag::ACRONYM)], PrefixKind::ALL);
    dict
}

pub fn lemmatizer() -> Arc<Lemmatizer> {
    Arc::new(Lemmatizer::new(
        Arc::new(dictionary()),
        Arc::new(AffixRules::hebrew()),
    ))
}

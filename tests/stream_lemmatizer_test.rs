//! Integration tests for stream lemmatization.

mod common;

use std::sync::Arc;

use hebmorph::analysis::{BasicLemmaFilterConfig, ChainedLemmaFilter, TokenizerConfig};
use hebmorph::prelude::*;

fn analyze(text: &str) -> Vec<AnalyzedToken> {
    StreamLemmatizer::new(text.chars(), common::lemmatizer()).collect()
}

#[test]
fn test_sentence() {
    let text = "הלכו לבית-הספר של אמא ב-1948.";
    let tokens = analyze(text);
    let chars: Vec<char> = text.chars().collect();

    let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(words, vec!["הלכו", "לבית", "הספר", "של", "אמא", "1948"]);

    assert_eq!(tokens[0].lemmas(), vec!["הלך"]);
    assert_eq!(tokens[1].lemmas(), vec!["בית"]);
    assert_eq!(tokens[2].lemmas(), vec!["ספר"]);
    // unknown words are their own lemma
    assert_eq!(tokens[3].lemmas(), vec!["של"]);
    assert_eq!(tokens[4].lemmas(), vec!["אימא"]);
    assert_eq!(tokens[5].candidates, vec![Candidate::verbatim("1948", true)]);

    // the "ב-" construct is only a prefix and yields no token
    assert!(tokens.iter().all(|t| t.text != "ב"));

    for token in &tokens {
        assert!(!token.candidates.is_empty());
        let source: String = chars[token.start_offset..token.end_offset].iter().collect();
        assert!(source.starts_with(&token.text), "{source} / {}", token.text);
    }
}

#[test]
fn test_buffer_interface() {
    let mut stream = StreamLemmatizer::new("בבית hello".chars(), common::lemmatizer());
    let mut word = String::from("stale");
    let mut candidates = vec![Candidate::verbatim("stale", false)];

    let token_type = stream.get_lemmatize_next_token(&mut word, &mut candidates);
    assert_eq!(token_type, TokenType::HEBREW);
    assert_eq!(word, "בבית");
    assert_eq!(candidates.len(), 1);
    let candidate = candidates[0].as_hebrew().unwrap();
    assert_eq!(candidate.prefix(), "ב");
    assert_eq!(candidate.lemma(), "בית");
    assert_eq!((stream.start_offset(), stream.end_offset()), (0, 4));

    let token_type = stream.get_lemmatize_next_token(&mut word, &mut candidates);
    assert_eq!(token_type, TokenType::NON_HEBREW);
    assert_eq!(word, "hello");
    assert_eq!((stream.start_offset(), stream.end_offset()), (5, 10));

    let token_type = stream.get_lemmatize_next_token(&mut word, &mut candidates);
    assert!(token_type.is_empty());
    assert!(word.is_empty());
    assert!(candidates.is_empty());
}

#[test]
fn test_reset() {
    let mut stream = StreamLemmatizer::new("ספר".chars(), common::lemmatizer());
    assert_eq!(stream.next().unwrap().text, "ספר");
    assert!(stream.next().is_none());

    stream.reset("בית".chars());
    let token = stream.next().unwrap();
    assert_eq!(token.text, "בית");
    assert_eq!(token.start_offset, 0);
}

#[test]
fn test_known_acronym() {
    let tokens = analyze("צה\"ל ובצה\"ל");
    assert_eq!(tokens[0].token_type, TokenType::HEBREW | TokenType::ACRONYM);
    assert_eq!(tokens[0].candidates.len(), 1);
    assert_eq!(tokens[0].candidates[0].score(), 1.0);
    assert!(tokens[0].candidates[0].as_hebrew().unwrap().desc.contains(DescFlag::ACRONYM));

    assert_eq!(tokens[1].lemmas(), vec!["צה\"ל"]);
    assert_eq!(tokens[1].candidates[0].as_hebrew().unwrap().prefix(), "וב");
}

#[test]
fn test_tolerated_lemmas_are_distinct() {
    let tokens = analyze("עניין");
    assert_eq!(tokens[0].lemmas(), vec!["ענין"]);
    assert_eq!(tokens[0].candidates.len(), 1);
    assert_eq!(tokens[0].candidates[0].score(), 0.9);
}

#[test]
fn test_lemma_filter() {
    let lemmatizer = common::lemmatizer();
    let strict = BasicLemmaFilter::with_config(BasicLemmaFilterConfig {
        min_score: 0.95,
        min_verb_score: 0.95,
    });
    let filter = Arc::new(ChainedLemmaFilter::new().add_filter(Arc::new(strict)));

    // a lone low-scoring candidate is kept; filters never empty a list
    let tokens: Vec<AnalyzedToken> = StreamLemmatizer::new("עניין".chars(), lemmatizer)
        .with_lemma_filter(filter)
        .collect();
    assert_eq!(tokens[0].candidates.len(), 1);
    assert_eq!(tokens[0].candidates[0].score(), 0.9);
}

#[test]
fn test_special_cases_through_stream() {
    let config = TokenizerConfig {
        buffer_size: 2,
        ..Default::default()
    };
    let mut stream =
        StreamLemmatizer::with_tokenizer_config("למדתי C# וC++".chars(), common::lemmatizer(), config);
    stream.add_special_case("C#").unwrap();
    stream.add_special_case("C++").unwrap();

    let tokens: Vec<AnalyzedToken> = stream.collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1].text, "C#");
    assert_eq!(tokens[1].candidates, vec![Candidate::verbatim("C#", false)]);
    assert_eq!(tokens[2].text, "C++");
    assert_eq!((tokens[2].start_offset, tokens[2].end_offset), (9, 13));
}

#[test]
fn test_independent_streams_share_a_lemmatizer() {
    let lemmatizer = common::lemmatizer();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lemmatizer = lemmatizer.clone();
            std::thread::spawn(move || {
                let text = "לבית ".repeat(500);
                StreamLemmatizer::new(text.chars(), lemmatizer)
                    .map(|token| token.start_offset)
                    .collect::<Vec<usize>>()
            })
        })
        .collect();

    for handle in handles {
        let offsets = handle.join().unwrap();
        assert_eq!(offsets.len(), 500);
        assert!(offsets.iter().enumerate().all(|(i, &offset)| offset == i * 5));
    }
}

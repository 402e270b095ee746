//! Hebrew character classes.
//!
//! Several Unicode code points are used interchangeably in real-world text for
//! the geresh (apostrophe), gershayim (double quote) and makaf (hyphen); the
//! tokenizer folds each group into one canonical character.

pub const ALEF: char = 'א';
pub const HE: char = 'ה';
pub const VAV: char = 'ו';
pub const YOD: char = 'י';

/// Canonical geresh.
pub const GERESH: char = '\'';
/// Canonical gershayim.
pub const GERSHAYIM: char = '"';

/// Letters that legitimately end with a geresh (`ג'`, `צ'`, ...).
const LETTERS_ACCEPTING_GERESH: &[char] = &['ז', 'ג', 'ץ', 'צ', 'ח'];

/// Whether `c` is one of the 27 Hebrew letters (final forms included).
pub fn is_hebrew_letter(c: char) -> bool {
    matches!(c, '\u{05D0}'..='\u{05EA}')
}

/// Whether `c` is a final-form letter (ך ם ן ף ץ).
pub fn is_final_letter(c: char) -> bool {
    matches!(c, 'ך' | 'ם' | 'ן' | 'ף' | 'ץ')
}

/// Vowel points plus dagesh and the shin/sin dots.
pub fn is_niqqud(c: char) -> bool {
    matches!(c, '\u{05B0}'..='\u{05B9}' | '\u{05BB}' | '\u{05BC}' | '\u{05C1}' | '\u{05C2}')
}

/// Any Hebrew point or cantillation mark, the range removed when niqqud is
/// stripped from a word.
fn is_hebrew_mark(c: char) -> bool {
    matches!(c, '\u{05AF}'..='\u{05C4}')
}

pub fn is_geresh(c: char) -> bool {
    matches!(
        c,
        '\'' | '\u{05F3}' | '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{FF07}'
    )
}

pub fn is_gershayim(c: char) -> bool {
    matches!(
        c,
        '"' | '\u{05F4}' | '\u{201C}' | '\u{201D}' | '\u{201F}' | '\u{275E}' | '\u{FF02}'
    )
}

pub fn is_makaf(c: char) -> bool {
    matches!(
        c,
        '-' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}' | '\u{05BE}'
    )
}

pub fn accepts_geresh(c: char) -> bool {
    LETTERS_ACCEPTING_GERESH.contains(&c)
}

/// Whether every character of `word` is a Hebrew letter.
pub fn is_hebrew_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_hebrew_letter)
}

/// Remove niqqud and cantillation marks from `word`.
pub fn remove_niqqud(word: &str) -> String {
    word.chars().filter(|&c| !is_hebrew_mark(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_classes() {
        assert!(is_hebrew_letter('א'));
        assert!(is_hebrew_letter('ת'));
        assert!(is_hebrew_letter('ץ'));
        assert!(!is_hebrew_letter('a'));
        assert!(!is_hebrew_letter('\u{05B0}'));

        assert!(is_final_letter('ם'));
        assert!(!is_final_letter('מ'));
    }

    #[test]
    fn test_punctuation_classes() {
        assert!(is_geresh('\u{05F3}'));
        assert!(is_geresh('\''));
        assert!(!is_geresh('"'));
        assert!(is_gershayim('\u{05F4}'));
        assert!(is_gershayim('"'));
        assert!(is_makaf('\u{05BE}'));
        assert!(is_makaf('-'));
        assert!(accepts_geresh('צ'));
        assert!(!accepts_geresh('ל'));
    }

    #[test]
    fn test_remove_niqqud() {
        assert_eq!(remove_niqqud("שָׁלוֹם"), "שלום");
        assert_eq!(remove_niqqud("בְּדִיקָה"), "בדיקה");
        assert_eq!(remove_niqqud("שלום"), "שלום");
    }
}

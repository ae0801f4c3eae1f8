// src/page/normalize.rs
// =============================================================================
// Text normalization so that visually identical strings compare equal.
//
// Two steps:
// 1. Remove invisible characters (Unicode category "Other": control codes,
//    zero-width joiners, byte order marks, private use, ...). This is done
//    line by line so the line breaks themselves survive.
// 2. Apply a Unicode normalization form. The default is NFKC, which folds
//    full-width letters ("ＡＢＣ") into plain ones ("ABC") and composes
//    decomposed accents ("e\u{301}" -> "é").
//
// The same function is applied to the search word and to every fetched page
// when --normalize is on.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// Any line break: CRLF, a lone CR or a lone LF
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("line break pattern is valid"));

// General category C: Cc, Cf, Cs, Co, Cn
static OTHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{C}").expect("category pattern is valid"));

/// Unicode normalization forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizationForm {
    Nfc,
    Nfd,
    #[default]
    Nfkc,
    Nfkd,
}

/// Normalizes `text` with the default compatibility composition (NFKC).
pub fn normalize(text: &str) -> String {
    normalize_with(text, NormalizationForm::default())
}

/// Strips invisible characters line by line, joins the lines with `\n` and
/// applies `form`.
pub fn normalize_with(text: &str, form: NormalizationForm) -> String {
    let stripped = LINE_BREAK
        .split(text)
        .map(|line| OTHER.replace_all(line, ""))
        .collect::<Vec<_>>()
        .join("\n");

    match form {
        NormalizationForm::Nfc => stripped.nfc().collect(),
        NormalizationForm::Nfd => stripped.nfd().collect(),
        NormalizationForm::Nfkc => stripped.nfkc().collect(),
        NormalizationForm::Nfkd => stripped.nfkd().collect(),
    }
}

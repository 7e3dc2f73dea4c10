use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Punctuation trimmed from both ends of a token before anything else.
const BOUNDARY: &[char] = &[
    '.', ',', ';', '-', ':', '!', '?', '"', '\'', '(', ')', '[', ']', '{', '}', '<', '>', '—',
];

lazy_static! {
    static ref DASHES: Regex = Regex::new(r"[-–—]").expect("valid regex");
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-zA-Z0-9]").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Canonical form of a raw token: lowercase, boundary punctuation trimmed,
/// dashes collapsed and everything outside `[a-zA-Z0-9]` removed.
///
/// An empty result means the token is not indexable. The output only
/// contains ASCII lowercase letters and digits, so the function is
/// idempotent.
pub fn normalize(token: &str) -> String {
    let lowered = token.to_lowercase();
    let trimmed = lowered.trim_matches(BOUNDARY);
    let joined = DASHES.replace_all(trimmed, "");
    NON_ALNUM.replace_all(&joined, "").into_owned()
}

/// Per-token pipeline shared by indexing and querying.
///
/// Normalization always runs; English stemming is optional and applied
/// after it, so indexed terms and query terms go through identical steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer {
    stem: bool,
}

impl Analyzer {
    pub fn new(stem: bool) -> Self {
        Self { stem }
    }

    pub fn stems(&self) -> bool {
        self.stem
    }

    /// Returns `None` when the token normalizes to nothing.
    pub fn analyze(&self, token: &str) -> Option<String> {
        let term = normalize(token);
        if term.is_empty() {
            return None;
        }
        if self.stem {
            return Some(STEMMER.stem(&term).into_owned());
        }
        Some(term)
    }

    /// Whitespace-split `text` and yield the indexable terms in document order.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        text.split_whitespace().filter_map(move |raw| self.analyze(raw))
    }
}

use crate::config::CleanerConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Typographic and math symbols that survive PDF text extraction as noise.
///
/// Each occurrence is replaced with a single space.
pub const NOISE_SYMBOLS: &[char] = &[
    '\u{2211}', // ∑ n-ary summation
    '\u{03C3}', // σ
    '\u{03BB}', // λ
    '\u{03C0}', // π
    '\u{03BC}', // μ
    '\u{0394}', // Δ
    '\u{2202}', // ∂ partial differential
    '\u{03B1}', // α
    '\u{03B2}', // β
    '\u{03B3}', // γ
    '\u{2264}', // ≤
    '\u{2265}', // ≥
    '\u{2248}', // ≈
    '\u{2260}', // ≠
    '\u{2192}', // →
    '\u{2190}', // ←
    '\u{00D7}', // ×
    '[',
    ']',
    '|',
    '=',
    '+',
];

// Compatibility code points folded onto their canonical symbol first.
const FOLDED: &[(char, char)] = &[
    ('\u{00B5}', '\u{03BC}'), // micro sign -> μ
    ('\u{2206}', '\u{0394}'), // increment -> Δ
    ('\u{2215}', '/'),
];

// Invisible characters extraction tends to leave behind.
const INVISIBLE: &[char] = &[
    '\u{FEFF}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{2060}', '\u{00AD}',
];

// One level of nested parentheses, as in "(Bahdanau et al. (2014))".
static CITATION: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)\((?:[^()]|\([^()]*\))*?\bet\s+al\.(?:[^()]|\([^()]*\))*?\)")
});

static PROBABILITY: Lazy<Regex> = Lazy::new(|| compile(r"Pr\s*\([^)]*\)"));

static SYMBOLS: Lazy<Regex> = Lazy::new(|| {
    let class: String = NOISE_SYMBOLS
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    compile(&format!("[{class}]"))
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("Cleaner pattern {pattern:?} is invalid: {err}"),
    }
}

/// Post-retrieval normalization of context text before generation.
///
/// Removes citation parentheticals, `Pr(...)` fragments and [`NOISE_SYMBOLS`],
/// then keeps the first distinct sentences that are long enough. The result is
/// a fixed point: cleaning it again changes nothing.
#[derive(Debug, Clone, Default)]
pub struct ContextCleaner {
    config: CleanerConfig,
}

impl ContextCleaner {
    #[must_use]
    pub const fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &CleanerConfig {
        &self.config
    }

    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        // A pass can expose a new match (dropping a sentence may bring a
        // citation back together), so iterate until nothing changes. Every
        // non-final pass strictly shrinks the text.
        let mut current = self.clean_once(text);
        loop {
            let next = self.clean_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
    }

    fn clean_once(&self, text: &str) -> String {
        let text = strip_noise(text);

        let mut seen = HashSet::new();
        let mut kept: Vec<&str> = Vec::new();
        for sentence in text.split('.') {
            if kept.len() >= self.config.max_sentences {
                break;
            }
            let sentence = sentence.trim();
            if sentence.chars().count() <= self.config.min_sentence_chars {
                continue;
            }
            if seen.insert(sentence.to_lowercase()) {
                kept.push(sentence);
            }
        }

        kept.join(". ")
    }
}

/// Character-level cleanup: invisible chars, citations, `Pr(...)`, symbols, whitespace.
#[must_use]
pub fn strip_noise(text: &str) -> String {
    let text = normalize_encoding(text);
    let text = CITATION.replace_all(&text, "");
    let text = PROBABILITY.replace_all(&text, "");
    let text = SYMBOLS.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").into_owned()
}

fn normalize_encoding(text: &str) -> String {
    text.chars()
        .filter(|c| !INVISIBLE.contains(c))
        .map(|c| {
            FOLDED
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

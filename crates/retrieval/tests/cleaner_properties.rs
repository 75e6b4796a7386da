use docqa_retrieval::{CleanerConfig, ContextCleaner};
use proptest::prelude::*;
use std::collections::HashSet;

const PIECES: &[&str] = &[
    "(",
    ")",
    " et al.",
    "Pr",
    ". ",
    ".",
    " ",
    "\n",
    "σ",
    "+",
    "[",
    "]",
    "\u{00B5}",
    "\u{200B}",
    "attention weights are computed per head",
    "ATTENTION WEIGHTS ARE COMPUTED PER HEAD",
    "Vaswani",
    "x",
    "residual connections stabilise deep training",
];

fn noisy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(PIECES), 0..60).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn cleaning_is_idempotent(text in noisy_text()) {
        let cleaner = ContextCleaner::default();
        let once = cleaner.clean(&text);
        prop_assert_eq!(cleaner.clean(&once), once);
    }

    #[test]
    fn cleaning_arbitrary_text_is_idempotent(text in ".{0,300}") {
        let cleaner = ContextCleaner::default();
        let once = cleaner.clean(&text);
        prop_assert_eq!(cleaner.clean(&once), once);
    }

    #[test]
    fn output_sentences_are_long_distinct_and_capped(
        text in noisy_text(),
        max_sentences in 1usize..6,
    ) {
        let config = CleanerConfig { max_sentences, ..CleanerConfig::default() };
        let cleaned = ContextCleaner::new(config).clean(&text);
        if cleaned.is_empty() {
            return Ok(());
        }

        let sentences: Vec<&str> = cleaned.split('.').map(str::trim).collect();
        prop_assert!(sentences.len() <= max_sentences);

        let mut seen = HashSet::new();
        for sentence in sentences {
            prop_assert!(sentence.chars().count() > config.min_sentence_chars);
            prop_assert!(seen.insert(sentence.to_lowercase()), "duplicate sentence {:?}", sentence);
            prop_assert!(!sentence.contains('σ') && !sentence.contains('+'));
        }
    }
}

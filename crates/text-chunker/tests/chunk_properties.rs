use docqa_text_chunker::{chunk, Chunker, ChunkerConfig, ChunkerError};
use proptest::prelude::*;

fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("t{i}")).collect()
}

proptest! {
    #[test]
    fn windows_cover_every_word_in_order(
        n in 0usize..400,
        window in 1usize..60,
        overlap_frac in 0.0f64..1.0,
    ) {
        let overlap = ((window as f64) * overlap_frac) as usize % window;
        let source = words(n);
        let text = source.join(" ");
        let chunks = chunk(&text, "doc", window, overlap).unwrap();
        let step = window - overlap;

        prop_assert_eq!(chunks.len(), n.div_ceil(step));

        let mut hits = vec![0usize; n];
        for (i, c) in chunks.iter().enumerate() {
            prop_assert!(!c.text.is_empty());
            prop_assert_eq!(c.start_word, i * step);
            prop_assert!(c.word_count() <= window);
            prop_assert_eq!(&c.text, &source[c.start_word..c.end_word].join(" "));
            for slot in &mut hits[c.start_word..c.end_word] {
                *slot += 1;
            }
        }
        prop_assert!(hits.iter().all(|&h| h >= 1));

        // Between two full windows exactly `overlap` words are shared.
        for pair in chunks.windows(2) {
            if pair[0].word_count() == window && pair[1].end_word >= pair[0].end_word {
                prop_assert_eq!(pair[0].end_word - pair[1].start_word, overlap);
            }
        }
    }
}

#[test]
fn configuration_errors_never_loop() {
    for (window, overlap) in [(0, 0), (3, 3), (3, 7)] {
        let err = Chunker::new(ChunkerConfig::with_window(window, overlap)).unwrap_err();
        assert!(matches!(err, ChunkerError::InvalidConfig(_)));
    }
}

#[test]
fn newline_heavy_text_is_chunked_after_normalization() {
    let raw = words(300).join("\n");
    let chunker = Chunker::new(ChunkerConfig::with_window(100, 10)).unwrap();
    let chunks = chunker.chunk_document(&raw, "lines.txt").unwrap();
    assert_eq!(chunks.len(), 4);
    assert!(chunks.iter().all(|c| !c.text.contains('\n')));
}

//! Character-budget chunking at whitespace boundaries.
//!
//! Words are never split: a word longer than the budget becomes a chunk of its own. Lengths are
//! counted in characters rather than bytes so multi-byte text gets the same budget as ASCII.

use super::types::ChunkingError;

/// Split `text` into chunks of at most `max_chunk_size` characters.
///
/// - The text is split on whitespace; chunks rejoin their words with single spaces.
/// - A word joins the current chunk while `current + word + 1 <= max_chunk_size`, where
///   `current` is the joined length of the chunk so far and `+ 1` is the joining space.
/// - The first word of a chunk is always accepted, so an oversized word forms its own chunk.
///
/// Returns an empty vector when the input is empty or all whitespace.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Result<Vec<String>, ChunkingError> {
    if max_chunk_size == 0 {
        return Err(ChunkingError::InvalidChunkSize);
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_size = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if !current.is_empty() && current_size + word_len + 1 > max_chunk_size {
            chunks.push(current.join(" "));
            current.clear();
            current_size = 0;
        }
        current_size += word_len + usize::from(!current.is_empty());
        current.push(word);
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn chunk_text_respects_character_budget() {
        let chunks = chunk_text("one two three four five", 10).expect("chunks");
        assert_eq!(chunks, vec!["one two", "three four", "five"]);
    }

    #[test]
    fn chunk_fills_exactly_to_the_limit() {
        let chunks = chunk_text("aaaa bbbb cccc dddd", 9).expect("chunks");
        assert_eq!(chunks, vec!["aaaa bbbb", "cccc dddd"]);
        assert!(chunks.iter().all(|chunk| chunk.chars().count() == 9));

        let chunks = chunk_text("aaaa bbbb cccc dddd", 8).expect("chunks");
        assert_eq!(chunks, vec!["aaaa", "bbbb", "cccc", "dddd"]);
    }

    #[test]
    fn chunk_text_handles_empty_input() {
        assert!(chunk_text("", 4).expect("chunks").is_empty());
        assert!(chunk_text(" \n\t ", 4).expect("chunks").is_empty());
    }

    #[test]
    fn chunk_text_rejects_zero_chunk_size() {
        let error = chunk_text("hello", 0).unwrap_err();
        assert!(matches!(error, ChunkingError::InvalidChunkSize));
    }

    #[test]
    fn oversized_word_forms_its_own_chunk() {
        let chunks = chunk_text("a supercalifragilistic b", 5).expect("chunks");
        assert_eq!(chunks, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn collapses_whitespace_between_words() {
        let chunks = chunk_text("  Rust\n\nengineer\t since   2015 ", 100).expect("chunks");
        assert_eq!(chunks, vec!["Rust engineer since 2015"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Each word is 4 characters but 8 bytes.
        let text = "\u{e9}\u{e9}\u{e9}\u{e9} \u{fc}\u{fc}\u{fc}\u{fc} \u{e9}\u{e9}\u{e9}\u{e9}";
        let chunks = chunk_text(text, 10).expect("chunks");
        assert_eq!(
            chunks,
            vec!["\u{e9}\u{e9}\u{e9}\u{e9} \u{fc}\u{fc}\u{fc}\u{fc}", "\u{e9}\u{e9}\u{e9}\u{e9}"]
        );
    }

    #[test]
    fn chunks_stay_within_budget_and_preserve_words() {
        let text = "Led a team of five engineers building a distributed ingestion service. \
                    Migrated legacy Python workers to Rust, cutting p99 latency by 40 percent. \
                    BSc Computer Science, University of Somewhere.";
        for size in [1, 3, 8, 16, 40, 120, 1000] {
            let chunks = chunk_text(text, size).expect("chunks");
            for chunk in &chunks {
                assert!(!chunk.is_empty());
                let len = chunk.chars().count();
                assert!(
                    len <= size || !chunk.contains(' '),
                    "chunk {chunk:?} exceeds {size}"
                );
            }
            assert_eq!(words(&chunks.join(" ")), words(text));
        }
    }
}

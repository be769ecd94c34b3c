//! Sentence-aligned text chunking

/// Default soft limit for chunk length, in characters
pub const DEFAULT_MAX_CHARS: usize = 800;

/// Splits text into sentences
///
/// A sentence ends at `.`, `!` or `?` when the next character is whitespace;
/// the punctuation stays with the sentence and the whitespace run is dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let Some(&(next_idx, next)) = chars.peek() else {
            break;
        };
        if !next.is_whitespace() {
            continue;
        }

        let sentence = text[start..next_idx].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }

        // Skip the whitespace run after the boundary
        start = next_idx;
        while let Some(&(ws_idx, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                break;
            }
            start = ws_idx + ws.len_utf8();
            chars.next();
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}

/// Splits text into sentence-aligned chunks of at most `max_chars` characters
///
/// Sentences are packed greedily: a sentence joins the current chunk while
/// the combined length stays below `max_chars`, otherwise the chunk is
/// closed and the sentence starts the next one. A single sentence longer than
/// `max_chars` becomes a chunk of its own and is not cut.
///
/// # Example
///
/// ```
/// use site_gleaner::crawler::chunk_text;
///
/// let chunks = chunk_text("Cats are great pets. Dogs are loyal too.", 25);
/// assert_eq!(chunks, vec!["Cats are great pets.", "Dogs are loyal too."]);
/// ```
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_len = 0;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();

        if buffer_len + sentence_len >= max_chars {
            push_chunk(&mut chunks, &buffer);
            buffer.clear();
            buffer_len = 0;
        }

        buffer.push_str(sentence);
        buffer.push(' ');
        buffer_len += sentence_len + 1;
    }

    push_chunk(&mut chunks, &buffer);
    chunks
}

fn push_chunk(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

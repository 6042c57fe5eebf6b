pub mod string_builder;

/// Number of characters (Unicode scalar values) in `text`. All offsets in
/// this crate are expressed in characters, never in bytes.
pub fn char_len(text: &str) -> usize { text.chars().count() }

/// Returns the part of `text` from character index `start` (inclusive) to
/// `end` (exclusive). Indices past the end of the text are clamped.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_index = |char_index: usize| {
        text.char_indices()
            .nth(char_index)
            .map_or(text.len(), |(index, _)| index)
    };

    let start_byte = byte_index(start);
    let end_byte = byte_index(end.max(start));

    &text[start_byte..end_byte]
}

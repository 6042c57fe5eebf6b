use regex::Regex;

use crate::{
    errors::EditorError,
    types::{
        buffer_state::BufferState, payload::Payload, range_list::RangeList,
        token_range::TokenRange,
    },
    utils::char_len,
};

/// Turns a payload into a string, e.g. the readable form of a token shown in
/// the display text or the serialized form used in canonical text.
pub type PayloadFormatter = dyn Fn(&Payload) -> String;

/// Finds serialized tokens in canonical text and extracts their payloads.
#[derive(Debug, Clone)]
pub struct MarkerParser {
    pattern: Regex,
    payload_arity: usize,
}

impl MarkerParser {
    /// Compile `pattern`. With a `payload_arity` of zero, the whole match
    /// becomes the payload; otherwise the first `payload_arity` capture
    /// groups do.
    ///
    /// # Errors
    ///
    /// Fails if the pattern does not compile or has fewer capture groups than
    /// `payload_arity`.
    pub fn new(pattern: &str, payload_arity: usize) -> Result<Self, EditorError> {
        let pattern = Regex::new(pattern)?;
        let available = pattern.captures_len() - 1;

        if payload_arity > available {
            return Err(EditorError::ArityMismatch {
                arity: payload_arity,
                available,
            });
        }

        Ok(Self {
            pattern,
            payload_arity,
        })
    }

    #[must_use]
    pub fn payload_arity(&self) -> usize { self.payload_arity }

    /// Replace every token marker in `canonical` with the readable form
    /// produced by `format_matched_item` and record where each token ended up
    /// in the resulting display text.
    ///
    /// Matches are found left to right and never overlap, so the ranges come
    /// out sorted.
    #[must_use]
    pub fn parse(&self, canonical: &str, format_matched_item: &PayloadFormatter) -> BufferState {
        let mut display_text = String::with_capacity(canonical.len());
        let mut display_length = 0;
        let mut ranges = RangeList::new();
        let mut last_match_end = 0;

        for captures in self.pattern.captures_iter(canonical) {
            let Some(whole) = captures.get(0) else {
                continue;
            };

            let prefix = &canonical[last_match_end..whole.start()];
            display_text.push_str(prefix);
            display_length += char_len(prefix);

            let payload = self.payload_of(&captures);
            let formatted = format_matched_item(&payload);
            let formatted_length = char_len(&formatted);

            ranges.insert(TokenRange::new(
                display_length,
                display_length + formatted_length,
                payload,
            ));

            display_text.push_str(&formatted);
            display_length += formatted_length;
            last_match_end = whole.end();
        }

        display_text.push_str(&canonical[last_match_end..]);

        BufferState::new(display_text, ranges)
    }

    fn payload_of(&self, captures: &regex::Captures<'_>) -> Payload {
        if self.payload_arity == 0 {
            return Payload::new(vec![captures[0].to_owned()]);
        }

        (1..=self.payload_arity)
            .map(|group| {
                captures
                    .get(group)
                    .map_or_else(String::new, |matched| matched.as_str().to_owned())
            })
            .collect::<Vec<_>>()
            .into()
    }
}

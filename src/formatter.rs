use crate::{
    parser::PayloadFormatter,
    types::{buffer_state::BufferState, change_data::ChangeData},
    utils::string_builder::StringBuilder,
};

/// Serialize `state` into canonical text: every token's display form is
/// replaced by `format(payload)`, the text around tokens is kept as-is.
///
/// Pure: calling it repeatedly on the same state gives the same result. A
/// panicking `format` is a caller error and is not caught.
#[must_use]
pub fn format_buffer(state: &BufferState, format: &PayloadFormatter) -> ChangeData {
    let mut payloads = Vec::with_capacity(state.ranges.len());

    if state.ranges.is_empty() {
        return ChangeData {
            display_text: state.display_text.clone(),
            canonical_text: state.display_text.clone(),
            payloads,
        };
    }

    let mut builder = StringBuilder::new(&state.display_text);

    for range in &state.ranges {
        builder.retain_until(range.start);
        builder.delete(range.len());
        builder.insert(&format(range.payload()));

        payloads.push(range.payload().clone());
    }

    ChangeData {
        display_text: state.display_text.clone(),
        canonical_text: builder.build(),
        payloads,
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        parser::MarkerParser,
        types::{payload::Payload, range_list::RangeList, token_range::TokenRange},
    };

    fn mention(payload: &Payload) -> String {
        format!("@[{}](id:{})", payload.field(0), payload.field(1))
    }

    #[test]
    fn test_format_without_tokens() {
        let state = BufferState::from("just text");
        let data = format_buffer(&state, &mention);

        assert_eq!(data.canonical_text, "just text");
        assert_eq!(data.display_text, "just text");
        assert!(data.payloads.is_empty());
    }

    #[test]
    fn test_format_tokens_in_order() {
        let state = BufferState::new(
            "@Alice, meet @Bob!".to_owned(),
            RangeList::from_ranges(vec![
                TokenRange::new(13, 17, Payload::from(["Bob", "2"])),
                TokenRange::new(0, 6, Payload::from(["Alice", "1"])),
            ]),
        );
        let data = format_buffer(&state, &mention);

        assert_snapshot!(&data.canonical_text, @"@[Alice](id:1), meet @[Bob](id:2)!");
        assert_eq!(
            data.payloads,
            vec![Payload::from(["Alice", "1"]), Payload::from(["Bob", "2"])]
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let parser = MarkerParser::new(r"@\[([^\]]+?)\]\(id:([^\]]+?)\)", 2).unwrap();
        let state = parser.parse("hi @[刘云](id:10086) there", &|payload: &Payload| {
            format!("@{}", payload.field(0))
        });

        let first = format_buffer(&state, &mention);
        let second = format_buffer(&state, &mention);

        assert_eq!(first, second);
        assert_eq!(first.canonical_text, "hi @[刘云](id:10086) there");
    }
}

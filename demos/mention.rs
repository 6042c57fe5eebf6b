use std::{cell::RefCell, rc::Rc};

use token_text::{HeadlessSurface, RawTextInput, Selection, TokenEditor, mention};

/// Walks through a mention session without a real text input: the user types
/// `@`, a picker answers with a user, and then deletes the mention with a
/// single backspace.
///
/// Run it with:
/// `cargo run --example mention`
fn main() {
    let mut editor = TokenEditor::new(
        mention::config("Thanks @[Alice](id:1)! "),
        mention::formatters(),
        HeadlessSurface::new(),
    )
    .unwrap_or_else(|error| {
        eprintln!("Error creating editor: {error}");
        std::process::exit(1);
    });

    let picker_open = Rc::new(RefCell::new(false));
    let open = Rc::clone(&picker_open);
    editor.on_trigger(move || *open.borrow_mut() = true);
    editor.on_change(|change| {
        println!("display:   {:?}", change.display_text);
        println!("canonical: {:?}", change.canonical_text);
        println!("users:     {:?}\n", mention::users(change));
    });

    editor.mount();

    let end = editor.state().len();
    editor.handle_text_input(RawTextInput {
        text: mention::MENTION_TRIGGER.to_owned(),
        range: Selection::caret(end),
        commit_id: Some(1),
    });

    if picker_open.replace(false) {
        editor.complete_trigger(mention::MentionUser::new("刘云", 10086).to_payload());
    }

    // Backspace on the last character of "@刘云".
    let token_end = editor
        .state()
        .ranges
        .iter()
        .last()
        .map_or(0, |range| range.end);
    editor.handle_text_input(RawTextInput {
        text: String::new(),
        range: Selection::new(token_end.saturating_sub(1), token_end),
        commit_id: Some(2),
    });
}

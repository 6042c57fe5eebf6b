//! Expose a mention editor to WebAssembly. The JavaScript side owns the
//! actual text input: it forwards edits to `handleTextInput`, mirrors
//! `displayText` and `selection` back into the input, and calls `fireFrame`
//! after each animation frame.
use wasm_bindgen::prelude::*;

use crate::{
    HeadlessSurface, InputStatus, RawTextInput, Selection, SelectionTiming, TokenEditor,
    mention::{self, MentionUser},
};

#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc<'_> = wee_alloc::WeeAlloc::INIT;

/// WASM wrapper around a `TokenEditor` configured for mentions.
#[wasm_bindgen(js_name = MentionEditor)]
#[derive(Debug)]
pub struct WasmMentionEditor {
    editor: TokenEditor<HeadlessSurface>,
}

#[wasm_bindgen(js_class = MentionEditor)]
impl WasmMentionEditor {
    /// # Errors
    ///
    /// Never fails with the built-in mention pattern; the error is kept for
    /// parity with `TokenEditor::new`.
    #[wasm_bindgen(constructor)]
    pub fn new(default_text: &str, deferred_selection: bool) -> Result<WasmMentionEditor, JsError> {
        set_panic_hook();

        let timing = if deferred_selection {
            SelectionTiming::Deferred
        } else {
            SelectionTiming::Immediate
        };
        let config = mention::config(default_text).with_selection_timing(timing);
        let mut editor = TokenEditor::new(config, mention::formatters(), HeadlessSurface::new())
            .map_err(|error| JsError::new(&error.to_string()))?;
        editor.mount();

        Ok(Self { editor })
    }

    /// Apply an edit from the text input. Returns `true` if the user typed
    /// the mention trigger.
    #[wasm_bindgen(js_name = handleTextInput)]
    pub fn handle_text_input(
        &mut self,
        text: &str,
        start: usize,
        end: usize,
        commit_id: Option<u32>,
    ) -> bool {
        let status = self.editor.handle_text_input(RawTextInput {
            text: text.to_owned(),
            range: Selection::new(start, end),
            commit_id: commit_id.map(u64::from),
        });

        status == InputStatus::Triggered
    }

    /// Report the selection of the text input.
    #[wasm_bindgen(js_name = setSelection)]
    pub fn set_selection(&mut self, start: usize, end: usize) {
        self.editor.surface_mut().selection = Some(Selection::new(start, end));
    }

    #[wasm_bindgen(js_name = addUser)]
    pub fn add_user(&mut self, username: &str, id: &str) {
        self.editor.add(MentionUser::new(username, id).to_payload());
    }

    /// Insert a user in place of the `@` typed right before the caret.
    #[wasm_bindgen(js_name = completeMention)]
    pub fn complete_mention(&mut self, username: &str, id: &str) {
        self.editor
            .complete_trigger(MentionUser::new(username, id).to_payload());
    }

    pub fn trigger(&mut self) -> bool { self.editor.trigger_synthetic() == InputStatus::Triggered }

    pub fn clear(&mut self) { self.editor.clear(); }

    /// Apply a selection write that was waiting for the next frame.
    #[wasm_bindgen(js_name = fireFrame)]
    pub fn fire_frame(&mut self) {
        if let Some(token) = self.editor.surface_mut().take_frame() {
            self.editor.on_frame(token);
        }
    }

    #[wasm_bindgen(getter, js_name = displayText)]
    #[must_use]
    pub fn display_text(&self) -> String { self.editor.state().display_text.clone() }

    #[wasm_bindgen(getter, js_name = canonicalText)]
    #[must_use]
    pub fn canonical_text(&self) -> String { self.editor.change_data().canonical_text }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn selection(&self) -> Option<Selection> { self.editor.surface().selection }

    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn users(&self) -> Vec<MentionUser> { mention::users(&self.editor.change_data()) }
}

fn set_panic_hook() {
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

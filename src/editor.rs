use std::fmt::Debug;

use log::debug;

use crate::{
    caret::{DeferredSelection, RequestToken, plan_caret},
    config::EditorConfig,
    errors::EditorError,
    formatter::format_buffer,
    parser::{MarkerParser, PayloadFormatter},
    reconciler::{EditOutcome, EditReconciler, reconcile_edit},
    surface::TextSurface,
    types::{
        buffer_state::BufferState, change_data::ChangeData, edit_event::EditEvent,
        payload::Payload, selection::Selection, token_range::TokenRange,
    },
    utils::{char_len, char_slice},
};

type ChangeListener = dyn FnMut(&ChangeData);
type TriggerListener = dyn FnMut();

/// The two ways of rendering a payload: `display` produces the readable form
/// shown in the text input, `canonical` the serialized form matched by the
/// marker pattern.
pub struct Formatters {
    display: Box<PayloadFormatter>,
    canonical: Box<PayloadFormatter>,
}

impl Formatters {
    pub fn new(
        display: impl Fn(&Payload) -> String + 'static,
        canonical: impl Fn(&Payload) -> String + 'static,
    ) -> Self {
        Self {
            display: Box::new(display),
            canonical: Box::new(canonical),
        }
    }

    #[must_use]
    pub fn display(&self, payload: &Payload) -> String { (self.display)(payload) }

    #[must_use]
    pub fn canonical(&self, payload: &Payload) -> String { (self.canonical)(payload) }
}

impl Debug for Formatters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatters").finish_non_exhaustive()
    }
}

/// An edit as reported by the text surface: `text` replaced the characters
/// in `range`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTextInput {
    pub text: String,
    pub range: Selection,
    pub commit_id: Option<u64>,
}

impl From<RawTextInput> for EditEvent {
    fn from(input: RawTextInput) -> Self {
        EditEvent {
            replaced_span: input.range,
            inserted_text: input.text,
            commit_id: input.commit_id,
        }
    }
}

/// What happened to a reported edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStatus {
    /// Nothing changed, e.g. because the edit was a repeated delivery.
    Ignored,
    Applied,
    /// Applied, and the inserted text was the trigger.
    Triggered,
}

/// A text input whose tokens are edited as whole units.
///
/// The editor owns the buffer and is the only thing mutating it. Edits come
/// in through `handle_text_input` (typing) or `add` (programmatic), and after
/// each one the surface is updated and the change listener receives the
/// display text, the canonical text and the token payloads.
pub struct TokenEditor<S> {
    config: EditorConfig,
    formatters: Formatters,
    state: BufferState,
    reconciler: EditReconciler,
    deferred: DeferredSelection,
    surface: S,
    on_change: Option<Box<ChangeListener>>,
    on_trigger: Option<Box<TriggerListener>>,
}

impl<S> TokenEditor<S>
where
    S: TextSurface,
{
    /// Create an editor whose buffer starts out with `config.default_text`.
    ///
    /// # Errors
    ///
    /// Fails if the marker pattern is invalid, if it has fewer capture groups
    /// than the payload arity or if the trigger is empty.
    pub fn new(
        config: EditorConfig,
        formatters: Formatters,
        surface: S,
    ) -> Result<Self, EditorError> {
        if config.trigger.as_deref() == Some("") {
            return Err(EditorError::EmptyTrigger);
        }

        let parser = MarkerParser::new(&config.pattern, config.payload_arity)?;
        let state = parser.parse(&config.default_text, &*formatters.display);

        debug!(
            "Parsed {} tokens from the default text ({} characters)",
            state.ranges.len(),
            state.len()
        );

        Ok(Self {
            config,
            formatters,
            state,
            reconciler: EditReconciler::new(),
            deferred: DeferredSelection::new(),
            surface,
            on_change: None,
            on_trigger: None,
        })
    }

    /// Called with the new contents after every accepted edit.
    pub fn on_change(&mut self, listener: impl FnMut(&ChangeData) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Called when the inserted text equals the configured trigger.
    pub fn on_trigger(&mut self, listener: impl FnMut() + 'static) {
        self.on_trigger = Some(Box::new(listener));
    }

    /// Push the initial text to the surface and, if there is any, report it
    /// to the change listener.
    pub fn mount(&mut self) {
        self.surface.set_text(&self.state.display_text, None);

        if !self.config.default_text.is_empty() {
            self.emit_change();
        }
    }

    /// Apply an edit reported by the surface.
    pub fn handle_text_input(&mut self, input: RawTextInput) -> InputStatus {
        let is_trigger = self.config.trigger.as_deref() == Some(input.text.as_str());

        if self.apply_edit(&input.into(), false).is_none() {
            return InputStatus::Ignored;
        }

        if !is_trigger {
            return InputStatus::Applied;
        }

        if let Some(listener) = self.on_trigger.as_mut() {
            listener();
        }

        InputStatus::Triggered
    }

    /// Write a deferred caret position once the frame for `token` has been
    /// rendered. Stale tokens are ignored.
    pub fn on_frame(&mut self, token: RequestToken) {
        if let Some(selection) = self.deferred.fire(token) {
            self.surface.set_selection(selection);
        }
    }

    /// Insert a token for `payload` at the caret, or at the end of the text if
    /// the surface never had a caret. The token is padded with a space on
    /// each side. An empty payload is ignored.
    pub fn add(&mut self, payload: impl Into<Payload>) {
        let payload = payload.into();
        if payload.is_empty() {
            return;
        }

        let span = self.current_selection();
        self.insert_token(span, payload);
    }

    /// Like `add`, but first removes the trigger typed right before the
    /// caret, completing a "type `@`, pick a user" interaction.
    pub fn complete_trigger(&mut self, payload: impl Into<Payload>) {
        let payload = payload.into();
        if payload.is_empty() {
            return;
        }

        let mut span = self.current_selection();

        if let Some(trigger) = self.config.trigger.as_deref() {
            let trigger_length = char_len(trigger);

            if span.start >= trigger_length
                && char_slice(&self.state.display_text, span.start - trigger_length, span.start)
                    == trigger
            {
                span.start -= trigger_length;
            }
        }

        self.insert_token(span, payload);
    }

    /// Simulate typing the trigger at the caret, e.g. to open a picker from a
    /// button. Does nothing without a configured trigger.
    pub fn trigger_synthetic(&mut self) -> InputStatus {
        let Some(trigger) = self.config.trigger.clone() else {
            return InputStatus::Ignored;
        };

        let range = self.current_selection();
        self.handle_text_input(RawTextInput {
            text: trigger,
            range,
            commit_id: None,
        })
    }

    /// Empty the text and forget all tokens. The change listener is not
    /// called.
    pub fn clear(&mut self) {
        self.deferred.cancel();
        self.state.clear();
        self.surface.set_text("", Some(Selection::caret(0)));
    }

    pub fn focus(&mut self) { self.surface.focus(); }

    pub fn blur(&mut self) { self.surface.blur(); }

    /// The current contents in the form handed to the change listener.
    #[must_use]
    pub fn change_data(&self) -> ChangeData {
        format_buffer(&self.state, &*self.formatters.canonical)
    }

    #[must_use]
    pub fn state(&self) -> &BufferState { &self.state }

    #[must_use]
    pub fn surface(&self) -> &S { &self.surface }

    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }

    fn apply_edit(&mut self, event: &EditEvent, explicit_caret: bool) -> Option<EditOutcome> {
        let outcome = self.reconciler.apply(&mut self.state, event, None)?;

        self.deferred.cancel();
        self.update_surface(outcome.caret, outcome.widened || explicit_caret);
        self.emit_change();

        Some(outcome)
    }

    fn insert_token(&mut self, span: Selection, payload: Payload) {
        let formatted = self.formatters.display(&payload);
        let formatted_length = char_len(&formatted);

        let event = EditEvent::new(span, format!(" {formatted} "));
        let outcome = reconcile_edit(&mut self.state, &event, None);

        let start = outcome.replaced_span.start + 1;
        let end = start + formatted_length;
        self.state.ranges.insert(TokenRange::new(start, end, payload));

        self.deferred.cancel();
        self.update_surface(end + 1, true);
        self.emit_change();
    }

    fn update_surface(&mut self, caret: usize, explicit_caret: bool) {
        let update = plan_caret(self.config.selection_timing, caret, explicit_caret);

        self.surface.set_text(&self.state.display_text, update.with_text);

        if let Some(selection) = update.next_frame {
            let token = self.deferred.schedule(selection);
            self.surface.request_frame(token);
        }
    }

    fn current_selection(&self) -> Selection {
        let length = self.state.len();

        self.surface
            .selection()
            .map_or(Selection::caret(length), |selection| selection.clamped(length))
    }

    fn emit_change(&mut self) {
        let Some(listener) = self.on_change.as_mut() else {
            return;
        };

        listener(&format_buffer(&self.state, &*self.formatters.canonical));
    }
}

impl<S> TokenEditor<S> {
    /// Forget any pending deferred caret, so a late frame can't write into a
    /// surface that is going away.
    fn teardown(&mut self) {
        if let Some(token) = self.deferred.pending() {
            debug!("Cancelling deferred selection {} on teardown", token.value());
        }

        self.deferred.cancel();
    }
}

impl<S> Drop for TokenEditor<S> {
    fn drop(&mut self) { self.teardown(); }
}

impl<S> Debug for TokenEditor<S>
where
    S: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEditor")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("deferred", &self.deferred)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{caret::SelectionTiming, surface::HeadlessSurface};

    const PLACEHOLDER: &str = r"\$\{([^\}]+?)\}";

    fn placeholders() -> Formatters {
        Formatters::new(
            |payload: &Payload| format!("${{{}}}", payload.field(0)),
            |payload: &Payload| payload.field(0).to_owned(),
        )
    }

    fn editor(default_text: &str, timing: SelectionTiming) -> TokenEditor<HeadlessSurface> {
        let config = EditorConfig::new(PLACEHOLDER)
            .with_payload_arity(1)
            .with_default_text(default_text)
            .with_trigger("$")
            .with_selection_timing(timing);

        TokenEditor::new(config, placeholders(), HeadlessSurface::new()).unwrap()
    }

    fn record_changes(editor: &mut TokenEditor<HeadlessSurface>) -> Rc<RefCell<Vec<ChangeData>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        editor.on_change(move |data| sink.borrow_mut().push(data.clone()));
        changes
    }

    fn typing(text: &str, start: usize, end: usize) -> RawTextInput {
        RawTextInput {
            text: text.to_owned(),
            range: Selection::new(start, end),
            commit_id: None,
        }
    }

    #[test]
    fn test_mount_reports_default_text() {
        let mut editor = editor("Dear ${name}, hi", SelectionTiming::Immediate);
        let changes = record_changes(&mut editor);

        editor.mount();

        assert_eq!(editor.surface().text, "Dear ${name}, hi");
        assert_eq!(changes.borrow().len(), 1);
        let canonical = changes.borrow()[0].canonical_text.clone();
        assert_snapshot!(canonical, @"Dear name, hi");
    }

    #[test]
    fn test_mount_without_default_text_is_silent() {
        let mut editor = editor("", SelectionTiming::Immediate);
        let changes = record_changes(&mut editor);

        editor.mount();

        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_typing_updates_surface_and_listener() {
        let mut editor = editor("${a} b", SelectionTiming::Immediate);
        let changes = record_changes(&mut editor);

        assert_eq!(editor.handle_text_input(typing("c", 6, 6)), InputStatus::Applied);

        assert_eq!(editor.surface().text, "${a} bc");
        assert_eq!(editor.surface().selection, Some(Selection::caret(7)));
        assert_eq!(changes.borrow().last().unwrap().canonical_text, "a bc");
    }

    #[test]
    fn test_trigger_fires_listener() {
        let mut editor = editor("", SelectionTiming::Immediate);
        let triggered = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&triggered);
        editor.on_trigger(move || *counter.borrow_mut() += 1);

        assert_eq!(editor.handle_text_input(typing("x", 0, 0)), InputStatus::Applied);
        assert_eq!(editor.handle_text_input(typing("$", 1, 1)), InputStatus::Triggered);
        assert_eq!(*triggered.borrow(), 1);

        assert_eq!(editor.trigger_synthetic(), InputStatus::Triggered);
        assert_eq!(editor.state().display_text, "x$$");
        assert_eq!(*triggered.borrow(), 2);
    }

    #[test]
    fn test_repeated_commit_is_ignored() {
        let mut editor = editor("", SelectionTiming::Immediate);
        let changes = record_changes(&mut editor);
        let input = RawTextInput {
            commit_id: Some(1),
            ..typing("ab", 0, 0)
        };

        assert_eq!(editor.handle_text_input(input.clone()), InputStatus::Applied);
        assert_eq!(editor.handle_text_input(input), InputStatus::Ignored);

        assert_eq!(editor.state().display_text, "ab");
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn test_add_at_caret() {
        let mut editor = editor("Hi !", SelectionTiming::Immediate);
        let changes = record_changes(&mut editor);
        editor.surface_mut().selection = Some(Selection::caret(3));

        editor.add(["x"]);

        assert_eq!(editor.state().display_text, "Hi  ${x} !");
        assert_eq!(editor.surface().selection, Some(Selection::caret(9)));
        assert_eq!(changes.borrow().last().unwrap().canonical_text, "Hi  x !");
        assert_eq!(
            changes.borrow().last().unwrap().payloads,
            vec![Payload::from(["x"])]
        );
    }

    #[test]
    fn test_add_without_caret_appends() {
        let mut editor = editor("${a}", SelectionTiming::Immediate);
        editor.add(["b"]);

        assert_eq!(editor.state().display_text, "${a} ${b} ");
        assert_eq!(editor.state().ranges.len(), 2);
        assert!(editor.state().is_consistent());
    }

    #[test]
    fn test_add_empty_payload_is_ignored() {
        let mut editor = editor("abc", SelectionTiming::Immediate);
        let changes = record_changes(&mut editor);

        editor.add(Vec::<String>::new());

        assert_eq!(editor.state().display_text, "abc");
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_complete_trigger_replaces_trigger() {
        let mut editor = editor("Hi ", SelectionTiming::Immediate);
        editor.handle_text_input(typing("$", 3, 3));
        editor.surface_mut().selection = Some(Selection::caret(4));

        editor.complete_trigger(["name"]);

        assert_eq!(editor.state().display_text, "Hi  ${name} ");
        assert_eq!(editor.change_data().canonical_text, "Hi  name ");
    }

    #[test]
    fn test_deferred_caret_after_widened_edit() {
        let mut editor = editor("ab ${x} cd", SelectionTiming::Deferred);

        editor.handle_text_input(typing("", 5, 6));
        assert_eq!(editor.state().display_text, "ab  cd");

        let token = editor.surface_mut().take_frame().unwrap();
        assert_eq!(editor.surface().selection, None);

        editor.on_frame(token);
        assert_eq!(editor.surface().selection, Some(Selection::caret(3)));
    }

    #[test]
    fn test_teardown_cancels_deferred_caret() {
        let mut editor = editor("ab ${x} cd", SelectionTiming::Deferred);

        editor.handle_text_input(typing("", 5, 6));
        let token = editor.surface_mut().take_frame().unwrap();
        assert_eq!(editor.deferred.pending(), Some(token));

        editor.teardown();
        assert_eq!(editor.deferred.pending(), None);

        editor.on_frame(token);
        assert_eq!(editor.surface().selection, None);
    }

    #[test]
    fn test_deferred_caret_is_cancelled_by_next_edit() {
        let mut editor = editor("${x}", SelectionTiming::Deferred);

        editor.handle_text_input(typing("", 3, 4));
        let stale = editor.surface_mut().take_frame().unwrap();

        editor.handle_text_input(typing("y", 0, 0));
        assert_eq!(editor.surface_mut().take_frame(), None);

        editor.on_frame(stale);
        assert_eq!(editor.surface().selection, None);
    }

    #[test]
    fn test_plain_edit_with_deferred_timing_leaves_caret_alone() {
        let mut editor = editor("ab", SelectionTiming::Deferred);
        editor.handle_text_input(typing("c", 2, 2));

        assert_eq!(editor.surface_mut().take_frame(), None);
        assert_eq!(editor.surface().selection, None);
    }

    #[test]
    fn test_clear() {
        let mut editor = editor("${x} y", SelectionTiming::Deferred);
        editor.handle_text_input(typing("", 0, 1));
        assert!(editor.surface().requested_frame.is_some());

        editor.clear();

        assert_eq!(editor.state(), &BufferState::default());
        assert_eq!(editor.surface().text, "");

        let token = editor.surface_mut().take_frame().unwrap();
        editor.on_frame(token);
        assert_eq!(editor.surface().selection, Some(Selection::caret(0)));
    }

    #[test]
    fn test_focus_and_blur() {
        let mut editor = editor("", SelectionTiming::Immediate);

        editor.focus();
        assert!(editor.surface().focused);

        editor.blur();
        assert!(!editor.surface().focused);
    }

    #[test]
    fn test_empty_trigger_is_rejected() {
        let config = EditorConfig::new(PLACEHOLDER).with_trigger("");

        assert_eq!(
            TokenEditor::new(config, placeholders(), HeadlessSurface::new()).unwrap_err(),
            EditorError::EmptyTrigger
        );
    }
}

use crate::{caret::RequestToken, types::selection::Selection};

/// The native text input a buffer is attached to. The editor pushes text and
/// caret positions into it; the surface reports edits back through
/// `TokenEditor::handle_text_input` and frames through
/// `TokenEditor::on_frame`.
pub trait TextSurface {
    /// Replace the whole text, optionally setting the selection in the same
    /// call.
    fn set_text(&mut self, text: &str, selection: Option<Selection>);

    fn set_selection(&mut self, selection: Selection);

    /// Ask for `TokenEditor::on_frame(token)` to be called once the next
    /// frame has been rendered.
    fn request_frame(&mut self, token: RequestToken);

    /// The last selection the surface reported, if it has ever had one.
    fn selection(&self) -> Option<Selection>;

    fn focus(&mut self);

    fn blur(&mut self);
}

/// A surface without a screen. It remembers what it was told, which is all
/// tests, demos and bindings without a native widget need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessSurface {
    pub text: String,
    pub selection: Option<Selection>,
    pub focused: bool,
    pub requested_frame: Option<RequestToken>,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Take the frame request made since the last call, as a render loop
    /// would.
    pub fn take_frame(&mut self) -> Option<RequestToken> { self.requested_frame.take() }
}

impl TextSurface for HeadlessSurface {
    fn set_text(&mut self, text: &str, selection: Option<Selection>) {
        text.clone_into(&mut self.text);

        if selection.is_some() {
            self.selection = selection;
        }
    }

    fn set_selection(&mut self, selection: Selection) { self.selection = Some(selection); }

    fn request_frame(&mut self, token: RequestToken) { self.requested_frame = Some(token); }

    fn selection(&self) -> Option<Selection> { self.selection }

    fn focus(&mut self) { self.focused = true; }

    fn blur(&mut self) { self.focused = false; }
}

use std::{cell::RefCell, rc::Rc};

use pretty_assertions::assert_eq;
use serde::Deserialize;
use token_text::{
    EditorConfig, Formatters, HeadlessSurface, Payload, RawTextInput, Selection, SelectionTiming,
    TokenEditor, mention,
};

/// One editing session described in YAML: an editor configuration, the
/// steps a user performs and what the buffer looks like afterwards.
#[derive(Debug, Deserialize)]
pub struct EditScenario {
    name: String,
    pattern: String,
    #[serde(default)]
    payload_arity: usize,
    formats: Formats,
    #[serde(default)]
    default_text: String,
    #[serde(default)]
    trigger: Option<String>,
    #[serde(default)]
    deferred_selection: bool,
    #[serde(default)]
    steps: Vec<Step>,
    expected: Expected,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Formats {
    /// `@name` in the input, `@[name](id:id)` in canonical text
    Mention,
    /// `${name}` in the input, `name` in canonical text
    Placeholder,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Step {
    Input {
        text: String,
        start: usize,
        end: usize,
        #[serde(default)]
        commit_id: Option<u64>,
    },
    Caret {
        position: usize,
    },
    Add {
        payload: Vec<String>,
    },
    CompleteTrigger {
        payload: Vec<String>,
    },
    Trigger,
    Clear,
}

#[derive(Debug, Deserialize)]
struct Expected {
    display_text: String,
    canonical_text: String,
    ranges: Vec<(usize, usize)>,
    #[serde(default)]
    payloads: Option<Vec<Vec<String>>>,
    #[serde(default)]
    changes: Option<usize>,
    #[serde(default)]
    triggers: Option<usize>,
}

impl Formats {
    fn formatters(self) -> Formatters {
        match self {
            Formats::Mention => mention::formatters(),
            Formats::Placeholder => Formatters::new(
                |payload: &Payload| format!("${{{}}}", payload.field(0)),
                |payload: &Payload| payload.field(0).to_owned(),
            ),
        }
    }
}

impl EditScenario {
    pub fn name(&self) -> &str { &self.name }

    fn config(&self) -> EditorConfig {
        let mut config = EditorConfig::new(&self.pattern)
            .with_payload_arity(self.payload_arity)
            .with_default_text(&self.default_text)
            .with_selection_timing(if self.deferred_selection {
                SelectionTiming::Deferred
            } else {
                SelectionTiming::Immediate
            });

        if let Some(trigger) = &self.trigger {
            config = config.with_trigger(trigger);
        }

        config
    }

    /// Replay the steps and compare the result with the expectations.
    pub fn assert_expected(&self) {
        let mut editor = TokenEditor::new(
            self.config(),
            self.formats.formatters(),
            HeadlessSurface::new(),
        )
        .unwrap_or_else(|error| panic!("Scenario `{}` failed to build: {error}", self.name));

        let changes = Rc::new(RefCell::new(0));
        let triggers = Rc::new(RefCell::new(0));
        {
            let changes = Rc::clone(&changes);
            editor.on_change(move |_| *changes.borrow_mut() += 1);
            let triggers = Rc::clone(&triggers);
            editor.on_trigger(move || *triggers.borrow_mut() += 1);
        }

        editor.mount();

        for step in &self.steps {
            match step {
                Step::Input {
                    text,
                    start,
                    end,
                    commit_id,
                } => {
                    editor.handle_text_input(RawTextInput {
                        text: text.clone(),
                        range: Selection::new(*start, *end),
                        commit_id: *commit_id,
                    });
                }
                Step::Caret { position } => {
                    editor.surface_mut().selection = Some(Selection::caret(*position));
                }
                Step::Add { payload } => editor.add(payload.clone()),
                Step::CompleteTrigger { payload } => editor.complete_trigger(payload.clone()),
                Step::Trigger => {
                    editor.trigger_synthetic();
                }
                Step::Clear => editor.clear(),
            }
        }

        let change = editor.change_data();
        let ranges = editor
            .state()
            .ranges
            .iter()
            .map(|range| (range.start, range.end))
            .collect::<Vec<_>>();

        assert!(
            editor.state().is_consistent(),
            "Scenario `{}` left inconsistent ranges",
            self.name
        );
        assert_eq!(
            change.display_text, self.expected.display_text,
            "display text of `{}`",
            self.name
        );
        assert_eq!(
            change.canonical_text, self.expected.canonical_text,
            "canonical text of `{}`",
            self.name
        );
        assert_eq!(ranges, self.expected.ranges, "ranges of `{}`", self.name);

        if let Some(payloads) = &self.expected.payloads {
            let actual = change
                .payloads
                .into_iter()
                .map(Payload::into_inner)
                .collect::<Vec<_>>();
            assert_eq!(&actual, payloads, "payloads of `{}`", self.name);
        }

        if let Some(expected_changes) = self.expected.changes {
            assert_eq!(
                *changes.borrow(),
                expected_changes,
                "change callbacks of `{}`",
                self.name
            );
        }

        if let Some(expected_triggers) = self.expected.triggers {
            assert_eq!(
                *triggers.borrow(),
                expected_triggers,
                "trigger callbacks of `{}`",
                self.name
            );
        }
    }
}

//! Multi-field input form for new presets and one-off runs.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::{Display, IntoStaticStr};

use mediasort_core::{Preset, ValidationError};
use mediasort_store::codec;

use super::input::{InputResult, InputState};

/// Maximum characters in a preset name.
pub const NAME_LIMIT: usize = 32;
/// Maximum characters in a source or destination path.
pub const PATH_LIMIT: usize = 256;

/// A field of the input form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum FormField {
    Name,
    Source,
    Destination,
}

const PRESET_FIELDS: &[FormField] = &[FormField::Name, FormField::Source, FormField::Destination];
const CUSTOM_FIELDS: &[FormField] = &[FormField::Source, FormField::Destination];

/// What the form wants the controller to do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    /// Keep editing.
    Continue,
    /// Leave the form, discarding edits.
    Cancel,
    /// Enter was pressed on the last field.
    Submit,
}

/// A validated form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// Name to persist the pairing under, when creating a preset.
    pub name: Option<String>,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl FormSubmission {
    /// The preset to persist, if this submission creates one.
    pub fn preset(&self) -> Option<Preset> {
        self.name
            .as_ref()
            .map(|name| Preset::new(name.clone(), self.source.clone(), self.destination.clone()))
    }
}

/// Input form state.
///
/// Focus moves only over the active fields: all three when creating a
/// preset, source and destination for a custom run.
#[derive(Debug, Clone)]
pub struct InputForm {
    name: InputState,
    source: InputState,
    destination: InputState,
    /// Index into [`fields`](Self::fields).
    focus: usize,
    is_new_preset: bool,
    error: Option<ValidationError>,
}

impl InputForm {
    fn with_mode(is_new_preset: bool) -> Self {
        Self {
            name: InputState::with_limit(NAME_LIMIT),
            source: InputState::with_limit(PATH_LIMIT),
            destination: InputState::with_limit(PATH_LIMIT),
            focus: 0,
            is_new_preset,
            error: None,
        }
    }

    /// Form for creating a preset, focused on the name.
    pub fn new_preset() -> Self {
        Self::with_mode(true)
    }

    /// Form for a one-off run, focused on the source.
    pub fn custom() -> Self {
        Self::with_mode(false)
    }

    pub fn is_new_preset(&self) -> bool {
        self.is_new_preset
    }

    /// Fields that take part in focus rotation, in order.
    pub fn fields(&self) -> &'static [FormField] {
        if self.is_new_preset {
            PRESET_FIELDS
        } else {
            CUSTOM_FIELDS
        }
    }

    /// The field receiving edits.
    pub fn focused(&self) -> FormField {
        self.fields()[self.focus]
    }

    pub fn field(&self, field: FormField) -> &InputState {
        match field {
            FormField::Name => &self.name,
            FormField::Source => &self.source,
            FormField::Destination => &self.destination,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut InputState {
        match field {
            FormField::Name => &mut self.name,
            FormField::Source => &mut self.source,
            FormField::Destination => &mut self.destination,
        }
    }

    /// The last validation failure, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn set_error(&mut self, error: ValidationError) {
        self.error = Some(error);
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    fn on_last_field(&self) -> bool {
        self.focus + 1 == self.fields().len()
    }

    /// Handle a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match (key.code, key.modifiers) {
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.focus_next();
                FormAction::Continue
            }
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => {
                self.focus_prev();
                FormAction::Continue
            }
            _ => {
                let focused = self.focused();
                match self.field_mut(focused).handle_key(key) {
                    InputResult::Continue => FormAction::Continue,
                    InputResult::Cancel => FormAction::Cancel,
                    InputResult::Submit(_) if self.on_last_field() => FormAction::Submit,
                    InputResult::Submit(_) => {
                        self.focus_next();
                        FormAction::Continue
                    }
                }
            }
        }
    }

    /// Validate the fields against the stored presets.
    ///
    /// A new-preset form with an empty name starts a run without saving.
    pub fn submission(&self, presets: &[Preset]) -> Result<FormSubmission, ValidationError> {
        let source = self.source.value();
        let destination = self.destination.value();
        if source.is_empty() || destination.is_empty() {
            return Err(ValidationError::MissingPaths);
        }

        let name = Some(self.name.value())
            .filter(|name| self.is_new_preset && !name.is_empty())
            .map(str::to_string);

        let submission = FormSubmission {
            name,
            source: PathBuf::from(source),
            destination: PathBuf::from(destination),
        };

        if let Some(preset) = submission.preset() {
            if presets.iter().any(|p| p.name == preset.name) {
                return Err(ValidationError::DuplicateName { name: preset.name });
            }
            codec::check_storable(&preset)?;
        }

        Ok(submission)
    }
}

//! Reactive-style form state: controls, groups and free-text arrays.
//!
//! A control only shows its error message after it has been touched. A failed
//! submit marks every control as touched so all messages render at once.

pub mod validators;

pub use validators::{is_valid_email, ValidationError, Validator};

/// A single input with its validators and interaction state.
#[derive(Debug, Clone, Default)]
pub struct FormControl {
    value: String,
    validators: Vec<Validator>,
    touched: bool,
    message: String,
}

impl FormControl {
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            validators,
            ..Self::default()
        }
    }

    /// Field-level message rendered when the control is touched and invalid.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.validators
            .iter()
            .filter_map(|v| v.check(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validators.iter().all(|v| v.check(&self.value).is_none())
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn mark_as_touched(&mut self) {
        self.touched = true;
    }

    /// The message to render, if any.
    pub fn visible_error(&self) -> Option<&str> {
        if self.touched && !self.is_valid() {
            Some(self.message.as_str())
        } else {
            None
        }
    }
}

/// An ordered set of named controls.
#[derive(Debug, Clone, Default)]
pub struct FormGroup {
    controls: Vec<(String, FormControl)>,
}

impl FormGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control (builder style).
    pub fn control(mut self, name: impl Into<String>, control: FormControl) -> Self {
        self.controls.push((name.into(), control));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FormControl> {
        self.controls.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormControl> {
        self.controls.iter_mut().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Current value of a control; unknown names read as empty.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).map(FormControl::value).unwrap_or("")
    }

    /// Set a control's value. Returns false when no such control exists.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.get_mut(name) {
            Some(control) => {
                control.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.controls.iter().map(|(n, _)| n.as_str())
    }

    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(|(_, c)| c.is_valid())
    }

    pub fn mark_all_as_touched(&mut self) {
        for (_, control) in &mut self.controls {
            control.mark_as_touched();
        }
    }

    pub fn all_touched(&self) -> bool {
        self.controls.iter().all(|(_, c)| c.is_touched())
    }

    /// `(name, message)` for every touched, invalid control, in declaration order.
    pub fn visible_errors(&self) -> Vec<(&str, &str)> {
        self.controls
            .iter()
            .filter_map(|(n, c)| c.visible_error().map(|m| (n.as_str(), m)))
            .collect()
    }
}

/// A growable list of free-text entries (assumptions, unexpected factors).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormArray {
    entries: Vec<String>,
}

impl FormArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, value: impl Into<String>) -> usize {
        self.entries.push(value.into());
        self.entries.len() - 1
    }

    pub fn set(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                *entry = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries with blanks removed, as sent to the server.
    pub fn cleaned(&self) -> Vec<String> {
        crate::decision::clean_entries(&self.entries)
    }
}

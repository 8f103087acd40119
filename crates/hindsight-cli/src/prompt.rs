//! Interactive prompts for form values missing from the command line.

use std::io::IsTerminal;

use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};
use hindsight_core::decision::model::SuccessLevel;

/// Prompts only when enabled and stdin is a terminal. Otherwise every
/// question answers with what the caller already has.
pub struct Prompter {
    interactive: bool,
}

impl Prompter {
    pub fn new(enabled: bool) -> Self {
        Self {
            interactive: enabled && std::io::stdin().is_terminal(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Free text. Asked only when `current` is blank.
    pub fn text(&self, label: &str, current: &str) -> Result<String> {
        if !self.interactive || !current.trim().is_empty() {
            return Ok(current.to_string());
        }
        let value: String = Input::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    pub fn password(&self, label: &str, current: &str) -> Result<String> {
        if !self.interactive || !current.is_empty() {
            return Ok(current.to_string());
        }
        let value = Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()?;
        Ok(value)
    }

    /// Collect entries one per line until an empty answer.
    /// Skipped when entries were already given.
    pub fn list(&self, label: &str, current: Vec<String>) -> Result<Vec<String>> {
        if !self.interactive || !current.is_empty() {
            return Ok(current);
        }
        println!("{label} (empty line to finish)");
        let mut entries = Vec::new();
        loop {
            let entry: String = Input::new()
                .with_prompt(format!("  #{}", entries.len() + 1))
                .allow_empty(true)
                .interact_text()?;
            if entry.trim().is_empty() {
                break;
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Pick a success level, or skip it.
    pub fn success_level(&self, current: Option<u8>) -> Result<Option<u8>> {
        if !self.interactive || current.is_some() {
            return Ok(current);
        }
        let levels: Vec<SuccessLevel> = SuccessLevel::all().collect();
        let mut items: Vec<String> = vec!["Skip".to_string()];
        items.extend(levels.iter().map(ToString::to_string));

        let choice = Select::new()
            .with_prompt("Success level")
            .items(&items)
            .default(0)
            .interact()?;
        Ok(choice
            .checked_sub(1)
            .and_then(|i| levels.get(i))
            .map(|level| level.value()))
    }

    /// Yes/no question. Non-interactive sessions answer `false`.
    pub fn confirm(&self, question: &str) -> Result<bool> {
        if !self.interactive {
            return Ok(false);
        }
        Ok(Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()?)
    }
}

//! Interactive prompts

use dialoguer::{Confirm, Input, Select};

/// Questions a command can ask the user.
///
/// [`DialoguerPrompter`] asks on the terminal; tests script the answers.
pub trait Prompter {
    /// Pick one of `items`, returning its index
    fn select(&self, prompt: &str, items: &[String], default: usize) -> anyhow::Result<usize>;

    /// Yes/no question
    fn confirm(&self, prompt: &str, default: bool) -> anyhow::Result<bool>;

    /// Free text, re-asked until `validate` accepts it
    fn input(
        &self,
        prompt: &str,
        default: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> anyhow::Result<String>;
}

/// Accepts any input
pub fn any_input(_: &str) -> Result<(), String> {
    Ok(())
}

/// Terminal prompts backed by dialoguer
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String], default: usize) -> anyhow::Result<usize> {
        Ok(Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?)
    }

    fn confirm(&self, prompt: &str, default: bool) -> anyhow::Result<bool> {
        Ok(Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn input(
        &self,
        prompt: &str,
        default: &str,
        validate: &dyn Fn(&str) -> Result<(), String>,
    ) -> anyhow::Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }
        let value = input
            .validate_with(|value: &String| validate(value))
            .interact_text()?;
        Ok(value.trim().to_string())
    }
}

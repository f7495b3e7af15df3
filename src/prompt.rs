//! Interactive prompts and confirmations.
//!
//! Prompts go through the [`Prompter`] trait so tasks can run against a
//! terminal ([`StdinPrompter`]), unattended ([`AssumeYes`]), or a mock in
//! tests.

use std::io::{self, BufRead as _, Write as _};

use crate::error::PromptError;

/// Source of answers for interactive questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question. An empty answer selects `default`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Cancelled`] on end of input and
    /// [`PromptError::Io`] if the terminal cannot be read.
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Ask for a line of text. An empty answer selects `default` (which may
    /// itself be empty).
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained.
    fn input(&self, message: &str, default: &str) -> Result<String, PromptError>;

    /// Ask for a value without echoing it to the terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained.
    fn secret(&self, message: &str) -> Result<String, PromptError>;
}

/// Prompter reading answers from standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompter;

impl StdinPrompter {
    #[allow(clippy::print_stdout)]
    fn read_line(prompt: &str) -> Result<String, PromptError> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(PromptError::Cancelled);
        }
        Ok(input.trim().to_string())
    }
}

impl Prompter for StdinPrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = Self::read_line(&format!("  {message} {hint} "))?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }

    fn input(&self, message: &str, default: &str) -> Result<String, PromptError> {
        let prompt = if default.is_empty() {
            format!("  {message}: ")
        } else {
            format!("  {message} [{default}]: ")
        };
        let answer = Self::read_line(&prompt)?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    fn secret(&self, message: &str) -> Result<String, PromptError> {
        let value = rpassword::prompt_password(format!("  {message}: "))?;
        Ok(value.trim().to_string())
    }
}

/// Unattended prompter used with `--yes`: confirms everything and accepts
/// defaults. Questions without a default cannot be answered.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&self, _message: &str, _default: bool) -> Result<bool, PromptError> {
        Ok(true)
    }

    fn input(&self, _message: &str, default: &str) -> Result<String, PromptError> {
        if default.is_empty() {
            return Err(PromptError::NotInteractive);
        }
        Ok(default.to_string())
    }

    fn secret(&self, _message: &str) -> Result<String, PromptError> {
        Err(PromptError::NotInteractive)
    }
}

/// Interpret a yes/no answer. Returns `None` for empty or unrecognised input.
#[must_use]
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

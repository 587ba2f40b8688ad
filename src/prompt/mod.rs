//! Interactive prompting
//!
//! Commands never talk to the terminal directly; they go through [`Prompter`]
//! so the wizard flows run headless under test.

use console::Term;
use owo_colors::OwoColorize;

use crate::error::Result;

pub trait Prompter {
    /// Free-form text answer.
    fn ask_text(&self, message: &str) -> Result<String>;

    /// Pick one of `choices`; returns the selected index.
    fn ask_choice(&self, message: &str, choices: &[&str]) -> Result<usize>;

    /// Yes/no question with a default.
    fn ask_confirm(&self, message: &str, default: bool) -> Result<bool>;
}

/// Re-ask until the answer passes `accept`; `hint` is shown on rejection.
pub fn ask_until<P, F>(prompter: &P, message: &str, hint: &str, accept: F) -> Result<String>
where
    P: Prompter + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let answer = prompter.ask_text(message)?;
        let answer = answer.trim().to_string();
        if accept(&answer) {
            return Ok(answer);
        }
        eprintln!("  {}", hint.yellow());
    }
}

/// Terminal-backed prompter.
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn ask_text(&self, message: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} {} ", "?".cyan().bold(), message.bold()))?;
        let line = self.term.read_line()?;
        Ok(line.trim().to_string())
    }

    fn ask_choice(&self, message: &str, choices: &[&str]) -> Result<usize> {
        self.term
            .write_line(&format!("{} {}", "?".cyan().bold(), message.bold()))?;
        for (i, choice) in choices.iter().enumerate() {
            self.term
                .write_line(&format!("  {}. {}", (i + 1).to_string().cyan(), choice))?;
        }

        loop {
            self.term.write_str("  > ")?;
            let line = self.term.read_line()?;
            if let Ok(n) = line.trim().parse::<usize>() {
                if n >= 1 && n <= choices.len() {
                    return Ok(n - 1);
                }
            }
            self.term.write_line(&format!(
                "  {}",
                format!("Enter a number between 1 and {}", choices.len()).yellow()
            ))?;
        }
    }

    fn ask_confirm(&self, message: &str, default: bool) -> Result<bool> {
        let suffix = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            self.term.write_str(&format!(
                "{} {} {} ",
                "?".cyan().bold(),
                message.bold(),
                suffix.dimmed()
            ))?;
            let line = self.term.read_line()?;
            match line.trim().to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => {}
            }
        }
    }
}

//! Defaulted prompts and numbered menus
//!
//! A single suggested default is shown inline as `Message [default]` and used
//! when the operator just presses Enter. Several defaults become a numbered
//! menu; picking the menu number is itself a defaulted prompt, so the
//! resolver calls back into itself exactly one level deep.

use crate::error::{PromptError, Result};
use crate::filter::{self, Filter};
use crate::logging::LogSink;
use crate::prompt::{PromptRequest, Prompter};
use crate::terminal::TerminalChannel;

/// Closing line of every menu
pub const MENU_INSTRUCTION: &str = "Please select a number or choose 0 to enter a new value";

/// Message for the free-text fallback after an unusable menu choice
pub const NEW_VALUE_MESSAGE: &str = "New value";

/// Hint for which menu entry to offer as the default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// 1-based menu number, offered as-is without a range check; 0 means none
    Index(usize),
    /// A previously chosen value; offered as its menu number when listed
    Value(String),
}

impl Selection {
    fn menu_default(&self, candidates: &[String]) -> String {
        match self {
            Selection::Index(0) => "1".to_string(),
            Selection::Index(n) => n.to_string(),
            Selection::Value(value) => candidates
                .iter()
                .position(|c| c == value)
                .map(|i| (i + 1).to_string())
                .unwrap_or_else(|| value.clone()),
        }
    }
}

/// Numbered menu text, without terminator.
pub fn render_menu(message: &str, candidates: &[String]) -> String {
    let mut menu = format!("{}:", message);
    for (i, candidate) in candidates.iter().enumerate() {
        menu.push_str(&format!("\n{}. {}", i + 1, candidate));
    }
    menu.push('\n');
    menu.push_str(MENU_INSTRUCTION);
    menu
}

/// Zero-based index for a menu answer, if it names a listed entry.
pub fn menu_index(choice: &str, len: usize) -> Option<usize> {
    let number = choice.trim().parse::<i64>().ok()?;
    let index = number.checked_sub(1)?;
    usize::try_from(index).ok().filter(|i| *i < len)
}

impl<C: TerminalChannel, S: LogSink> Prompter<C, S> {
    /// Ask with suggested defaults until `filter` accepts.
    ///
    /// Defaults go through `filter` like typed input does. An empty
    /// `defaults` slice is rejected before anything is displayed.
    pub fn prompt_with_defaults<F, D>(
        &mut self,
        request: &PromptRequest,
        defaults: &[D],
        previous: Option<&Selection>,
        filter: &F,
    ) -> Result<F::Output>
    where
        F: Filter,
        D: AsRef<str>,
    {
        if defaults.is_empty() {
            return Err(PromptError::precondition(
                "prompt_with_defaults requires at least one default",
            ));
        }
        let message = request.message.render()?;
        let candidates: Vec<String> = defaults.iter().map(|d| d.as_ref().to_string()).collect();
        self.resolve(request, &message, &candidates, previous, filter)
    }

    fn resolve<F: Filter>(
        &mut self,
        request: &PromptRequest,
        message: &str,
        candidates: &[String],
        previous: Option<&Selection>,
        filter: &F,
    ) -> Result<F::Output> {
        loop {
            let working = match candidates {
                [only] => {
                    let inline = request.with_rendered(format!("{} [{}]", message, only));
                    let raw = self.prompt(&inline, &filter::identity())?;
                    if raw.is_empty() { only.clone() } else { raw }
                }
                _ => {
                    let menu = render_menu(message, candidates);
                    let hint = previous
                        .map(|p| p.menu_default(candidates))
                        .unwrap_or_else(|| "1".to_string());
                    // Single candidate, so this never draws a second menu
                    let choice = self.resolve(
                        request,
                        &menu,
                        std::slice::from_ref(&hint),
                        None,
                        &filter::identity(),
                    )?;
                    match menu_index(&choice, candidates.len()) {
                        Some(i) => candidates[i].clone(),
                        None => {
                            let fallback = request.with_rendered(NEW_VALUE_MESSAGE.to_string());
                            self.prompt(&fallback, &filter::identity())?
                        }
                    }
                }
            };

            match filter.apply(&working) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => self.report_rejection(&e, &working, request.echo),
                Err(e) => return Err(e),
            }
        }
    }
}

//! Prompt engine
//!
//! Asks for a single value, validates it through a [`Filter`] and asks again
//! until the filter accepts. There is no retry limit; the loop only ends on an
//! accepted value, a configuration error, or a channel error such as closed
//! input.

use crate::error::Result;
use crate::filter::Filter;
use crate::logging::{LogSink, Severity, TracingSink};
use crate::template::MessageTemplate;
use crate::terminal::TerminalChannel;

/// Default text appended after every prompt message
pub const DEFAULT_TERMINATOR: &str = ": ";

/// What to ask and how to show it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub message: MessageTemplate,
    /// Visible input; `false` asks for a hidden read
    pub echo: bool,
    pub terminator: String,
}

impl PromptRequest {
    pub fn new(message: impl Into<MessageTemplate>) -> Self {
        Self {
            message: message.into(),
            echo: true,
            terminator: DEFAULT_TERMINATOR.to_string(),
        }
    }

    pub fn arg(mut self, value: impl ToString) -> Self {
        self.message = self.message.arg(value);
        self
    }

    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Shorthand for `echo(false)`, used for secrets
    pub fn hidden(self) -> Self {
        self.echo(false)
    }

    pub fn terminator(mut self, terminator: impl Into<String>) -> Self {
        self.terminator = terminator.into();
        self
    }

    /// Same display options, different (already rendered) message
    pub(crate) fn with_rendered(&self, message: String) -> Self {
        Self {
            message: MessageTemplate::new(escape_braces(&message)),
            echo: self.echo,
            terminator: self.terminator.clone(),
        }
    }
}

/// Make rendered text safe to reuse as a template
fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Drives prompts over one terminal channel and one log sink.
pub struct Prompter<C, S = TracingSink> {
    pub(crate) channel: C,
    pub(crate) sink: S,
}

impl<C: TerminalChannel> Prompter<C, TracingSink> {
    /// Prompter logging through `tracing`
    pub fn new(channel: C) -> Self {
        Self::with_sink(channel, TracingSink)
    }
}

impl<C: TerminalChannel, S: LogSink> Prompter<C, S> {
    pub fn with_sink(channel: C, sink: S) -> Self {
        Self { channel, sink }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (C, S) {
        (self.channel, self.sink)
    }

    /// Ask until `filter` accepts the input.
    pub fn prompt<F: Filter>(&mut self, request: &PromptRequest, filter: &F) -> Result<F::Output> {
        let mut message = request.message.render()?;
        message.push_str(&request.terminator);

        loop {
            let input = self.read_raw(&message, request.echo)?;
            match filter.apply(&input) {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => self.report_rejection(&e, &input, request.echo),
                Err(e) => return Err(e),
            }
        }
    }

    /// One display-and-read cycle with the engine's logging and spacing.
    fn read_raw(&mut self, message: &str, echo: bool) -> Result<String> {
        self.sink.log(Severity::Debug, message);
        let input = self.channel.read_line(message, echo)?;
        if echo {
            self.sink.log(Severity::Debug, &format!("User input: {}", input));
        }
        // Downstream consumers split non-interactive output on blank lines
        if !self.channel.is_interactive() {
            self.channel.write_blank_line()?;
        }
        Ok(input)
    }

    pub(crate) fn report_rejection(
        &self,
        error: &crate::error::PromptError,
        input: &str,
        echo: bool,
    ) {
        self.sink.log(Severity::Warning, &error.to_string());
        if echo {
            self.sink
                .log(Severity::Debug, &format!("Rejected user input: {}", input));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use crate::filter;
    use crate::logging::RecordingSink;
    use crate::terminal::ScriptedTerminal;

    fn prompter(responses: &[&str]) -> Prompter<ScriptedTerminal, RecordingSink> {
        Prompter::with_sink(
            ScriptedTerminal::new(responses.iter().copied()),
            RecordingSink::new(),
        )
    }

    #[test]
    fn test_returns_first_accepted_value() {
        let mut p = prompter(&["tempZone"]);
        let value = p
            .prompt(&PromptRequest::new("Zone name"), &filter::identity())
            .unwrap();
        assert_eq!(value, "tempZone");
        assert!(p.sink().warnings().is_empty());
    }

    #[test]
    fn test_renders_arguments_and_terminator() {
        let mut p = prompter(&["1247"]);
        let request = PromptRequest::new("Port for {}").arg("catalog").terminator(" > ");
        let port = p.prompt(&request, &filter::integer("Port")).unwrap();
        assert_eq!(port, 1247);
        assert!(p.channel().output().starts_with("Port for catalog > "));
    }

    #[test]
    fn test_retries_until_valid() {
        let mut p = prompter(&["maybe", "yes"]);
        let answer = p
            .prompt(
                &PromptRequest::new("Continue"),
                &filter::membership(["yes", "no"], "Answer"),
            )
            .unwrap();
        assert_eq!(answer, "yes");
        assert_eq!(p.sink().warnings().len(), 1);
        // Same message shown on both attempts
        assert_eq!(p.channel().output().matches("Continue: ").count(), 2);
    }

    #[test]
    fn test_config_error_is_not_retried() {
        let mut p = prompter(&["abc", "abcdef"]);
        let result = p.prompt(
            &PromptRequest::new("Name"),
            &filter::length(Some(5), Some(2), "Name"),
        );
        assert!(matches!(result, Err(PromptError::Config(_))));
        assert_eq!(p.channel().remaining(), 1);
        assert!(p.sink().warnings().is_empty());
    }

    #[test]
    fn test_bad_template_fails_before_reading() {
        let mut p = prompter(&["unused"]);
        let result = p.prompt(&PromptRequest::new("{} {}").arg("one"), &filter::identity());
        assert!(matches!(result, Err(PromptError::Config(_))));
        assert_eq!(p.channel().remaining(), 1);
    }

    #[test]
    fn test_debug_logs_message_and_visible_input() {
        let mut p = prompter(&["value"]);
        p.prompt(&PromptRequest::new("Field"), &filter::identity())
            .unwrap();
        let debug = p.sink().messages(Severity::Debug);
        assert_eq!(debug, vec!["Field: ", "User input: value"]);
    }

    #[test]
    fn test_hidden_input_is_never_logged() {
        let mut p = Prompter::with_sink(
            ScriptedTerminal::new(["", "hunter22"]).interactive(true),
            RecordingSink::new(),
        );
        let secret = p
            .prompt(
                &PromptRequest::new("Password").hidden(),
                &filter::length(Some(1), None, "Password"),
            )
            .unwrap();
        assert_eq!(secret, "hunter22");
        assert_eq!(p.channel().hidden_reads(), 2);
        for entry in p.sink().entries() {
            assert!(!entry.message.contains("hunter22"));
        }
        assert_eq!(p.sink().warnings().len(), 1);
    }

    #[test]
    fn test_non_interactive_spacing() {
        let mut visible = prompter(&["a"]);
        visible
            .prompt(&PromptRequest::new("Field"), &filter::identity())
            .unwrap();
        assert_eq!(visible.channel().output(), "Field: \n");

        // Echo fallback adds its own blank line on top of the engine's
        let mut hidden = prompter(&["a"]);
        hidden
            .prompt(&PromptRequest::new("Secret").hidden(), &filter::identity())
            .unwrap();
        assert_eq!(hidden.channel().output(), "Secret: \n\n");
        assert_eq!(hidden.channel().diagnostics().len(), 1);
    }

    #[test]
    fn test_interactive_has_no_extra_spacing() {
        let mut p = Prompter::with_sink(
            ScriptedTerminal::new(["a"]).interactive(true),
            RecordingSink::new(),
        );
        p.prompt(&PromptRequest::new("Field"), &filter::identity())
            .unwrap();
        assert_eq!(p.channel().output(), "Field: a\n");
    }

    #[test]
    fn test_closed_input_propagates() {
        let mut p = prompter(&["x"]);
        let result = p.prompt(&PromptRequest::new("Number"), &filter::integer("Number"));
        assert!(matches!(result, Err(PromptError::InputClosed)));
        assert_eq!(p.sink().warnings().len(), 1);
    }

    #[test]
    fn test_with_rendered_keeps_braces_literal() {
        let request = PromptRequest::new("x").terminator("? ").hidden();
        let nested = request.with_rendered("menu {item}".to_string());
        assert_eq!(nested.message.render().unwrap(), "menu {item}");
        assert_eq!(nested.terminator, "? ");
        assert!(!nested.echo);
    }
}

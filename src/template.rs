//! Prompt message templates
//!
//! A template is a runtime format string with positional `{}` placeholders,
//! filled in order from its argument list. `{{` and `}}` produce literal
//! braces.

use crate::error::{PromptError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageTemplate {
    template: String,
    args: Vec<String>,
}

impl MessageTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            args: Vec::new(),
        }
    }

    /// Append one positional argument
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Append several positional arguments
    pub fn args<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.args.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    /// Substitute the arguments into the template.
    ///
    /// A placeholder without an argument, a leftover argument, or an
    /// unbalanced brace is a configuration error.
    pub fn render(&self) -> Result<String> {
        let mut out = String::with_capacity(self.template.len());
        let mut args = self.args.iter();
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    out.push('{');
                }
                '{' if chars.peek() == Some(&'}') => {
                    chars.next();
                    let value = args.next().ok_or_else(|| {
                        PromptError::config(format!(
                            "Template {:?} has more placeholders than arguments ({})",
                            self.template,
                            self.args.len()
                        ))
                    })?;
                    out.push_str(value);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    out.push('}');
                }
                '{' | '}' => {
                    return Err(PromptError::config(format!(
                        "Template {:?} contains an unbalanced brace",
                        self.template
                    )));
                }
                _ => out.push(c),
            }
        }

        if args.next().is_some() {
            return Err(PromptError::config(format!(
                "Template {:?} has fewer placeholders than arguments ({})",
                self.template,
                self.args.len()
            )));
        }

        Ok(out)
    }
}

impl From<&str> for MessageTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<String> for MessageTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message() {
        assert_eq!(MessageTemplate::new("Zone name").render().unwrap(), "Zone name");
    }

    #[test]
    fn test_positional_substitution() {
        let t = MessageTemplate::new("Port for {} on {}").arg("catalog").arg(1247);
        assert_eq!(t.render().unwrap(), "Port for catalog on 1247");
    }

    #[test]
    fn test_escaped_braces() {
        let t = MessageTemplate::new("{{literal}} {}").args(["x"]);
        assert_eq!(t.render().unwrap(), "{literal} x");
    }

    #[test]
    fn test_argument_mismatch_is_config_error() {
        let missing = MessageTemplate::new("{} and {}").arg("one");
        assert!(matches!(missing.render(), Err(PromptError::Config(_))));

        let extra = MessageTemplate::new("none").arg("one");
        assert!(matches!(extra.render(), Err(PromptError::Config(_))));

        let unbalanced = MessageTemplate::new("oops {");
        assert!(matches!(unbalanced.render(), Err(PromptError::Config(_))));
    }
}

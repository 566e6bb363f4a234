use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::error::Result;
use crate::filter::{self, Filter, Integer, Length, Membership};
use crate::menu::Selection;
use crate::prompt::{DEFAULT_TERMINATOR, PromptRequest};

/// Operator prompt - validated prompts for setup and test scripts
#[derive(Parser)]
#[command(name = "operator-prompt")]
#[command(about = "Ask an operator for validated input and print the accepted value")]
#[command(version)]
pub struct Cli {
    /// Replay responses from a JSON answer file instead of reading stdin
    #[arg(long, global = true)]
    pub answers: Option<PathBuf>,

    /// Treat stdin as non-interactive even when it is a terminal
    #[arg(long, global = true)]
    pub non_interactive: bool,

    /// Log prompts and input at debug level on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prompt for one value; the accepted value is the last line of stdout
    Ask(AskArgs),
    /// Print a boxed section header
    Header {
        /// Header text; embedded newlines produce several rows
        message: String,
    },
    /// Validate an answer file
    Validate {
        /// Path to the answer file
        file: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AskArgs {
    /// Message template with `{}` placeholders
    pub message: String,

    /// Values substituted into the placeholders, in order
    pub args: Vec<String>,

    /// Do not echo input (passwords, keys)
    #[arg(long)]
    pub hidden: bool,

    /// Text appended after the message
    #[arg(long, default_value = DEFAULT_TERMINATOR)]
    pub terminator: String,

    /// Require a base-10 integer
    #[arg(long, conflicts_with_all = ["choices", "min_length", "max_length"])]
    pub integer: bool,

    /// Allowed value; repeat for several
    #[arg(long = "choice")]
    pub choices: Vec<String>,

    /// Minimum input length in characters
    #[arg(long, allow_hyphen_values = true)]
    pub min_length: Option<i64>,

    /// Maximum input length in characters
    #[arg(long, allow_hyphen_values = true)]
    pub max_length: Option<i64>,

    /// Field name used in validation messages
    #[arg(long, default_value = "Input")]
    pub field: String,

    /// Suggested default; repeat to offer a numbered menu
    #[arg(long = "default")]
    pub defaults: Vec<String>,

    /// Menu number or value to pre-select in a menu
    #[arg(long, requires = "defaults")]
    pub previous: Option<String>,
}

impl AskArgs {
    pub fn request(&self) -> PromptRequest {
        let mut request = PromptRequest::new(self.message.as_str())
            .echo(!self.hidden)
            .terminator(self.terminator.as_str());
        for arg in &self.args {
            request = request.arg(arg);
        }
        request
    }

    pub fn filter(&self) -> AskFilter {
        if self.integer {
            return AskFilter::Integer(filter::integer(self.field.as_str()));
        }
        let length = (self.min_length.is_some() || self.max_length.is_some())
            .then(|| filter::length(self.min_length, self.max_length, self.field.as_str()));
        let choices = (!self.choices.is_empty())
            .then(|| filter::membership(self.choices.iter().cloned(), self.field.as_str()));
        AskFilter::Text { length, choices }
    }

    /// A listed default wins over reading the text as a menu number.
    pub fn previous(&self) -> Option<Selection> {
        self.previous.as_ref().map(|p| {
            if self.defaults.contains(p) {
                return Selection::Value(p.clone());
            }
            match p.trim().parse::<usize>() {
                Ok(n) => Selection::Index(n),
                Err(_) => Selection::Value(p.clone()),
            }
        })
    }
}

/// Filter assembled from command-line flags; accepted values print as text.
#[derive(Debug, Clone)]
pub enum AskFilter {
    Integer(Integer),
    Text {
        length: Option<Length>,
        choices: Option<Membership>,
    },
}

impl Filter for AskFilter {
    type Output = String;

    fn apply(&self, input: &str) -> Result<String> {
        match self {
            AskFilter::Integer(f) => f.apply(input).map(|n| n.to_string()),
            AskFilter::Text { length, choices } => {
                let mut value = input.to_string();
                if let Some(f) = length {
                    value = f.apply(&value)?;
                }
                if let Some(f) = choices {
                    value = f.apply(&value)?;
                }
                Ok(value)
            }
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

//! Operator Prompt Library
//!
//! Validated interactive prompts for setup and integration-test tooling:
//! composable input filters, a retrying prompt engine, and defaulted prompts
//! that turn several suggestions into a numbered menu.

pub mod cli;
pub mod config_file;
pub mod error;
pub mod filter;
pub mod header;
pub mod logging;
pub mod menu;
pub mod prompt;
pub mod template;
pub mod terminal;

// Re-export main types for convenience
pub use config_file::SessionConfig;
pub use error::{PromptError, Result};
pub use filter::{Filter, FilterExt};
pub use header::render_header;
pub use logging::{LogSink, RecordingSink, Severity, TracingSink};
pub use menu::{Selection, render_menu};
pub use prompt::{PromptRequest, Prompter};
pub use template::MessageTemplate;
pub use terminal::{ScriptedTerminal, StdTerminal, TerminalChannel};

//! Answer files for unattended prompting.
//!
//! An answer file lists the lines an operator would type, in order. Loading
//! one produces a [`ScriptedTerminal`] so the same prompt code runs in CI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::terminal::ScriptedTerminal;

/// Scripted session that can be saved/loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// One entry per line read, hidden reads included
    pub responses: Vec<String>,
    /// Whether the scripted channel claims to be a terminal
    pub interactive: bool,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl SessionConfig {
    pub fn new<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Save the session to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize answer file to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write answer file to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a session from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read answer file from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse answer file JSON")?;

        Ok(config)
    }

    /// Validate the session
    pub fn validate(&self) -> Result<()> {
        for (i, response) in self.responses.iter().enumerate() {
            if response.contains('\n') || response.contains('\r') {
                anyhow::bail!("Response {} contains a line break; use one entry per line", i + 1);
            }
        }

        if let Some(filter) = &self.log_filter {
            tracing_subscriber::EnvFilter::try_new(filter)
                .with_context(|| format!("Invalid log filter {:?}", filter))?;
        }

        Ok(())
    }

    /// Channel that replays the responses
    pub fn into_terminal(self) -> ScriptedTerminal {
        ScriptedTerminal::new(self.responses).interactive(self.interactive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::TerminalChannel;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("answers.json");

        let mut config = SessionConfig::new(["tempZone", "1247"]);
        config.log_filter = Some("debug".to_string());
        config.save_to_file(&path).unwrap();

        let loaded = SessionConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"responses": ["a"]}"#).unwrap();
        assert_eq!(config.responses, vec!["a"]);
        assert!(!config.interactive);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_validate_rejects_multiline_response() {
        let config = SessionConfig::new(["ok", "two\nlines"]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Response 2"));
        assert!(SessionConfig::new(["ok"]).validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let dir = tempdir().unwrap();
        let err = SessionConfig::load_from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read answer file"));
    }

    #[test]
    fn test_into_terminal_replays_responses() {
        let mut terminal = SessionConfig::new(["first", "second"]).into_terminal();
        assert!(!terminal.is_interactive());
        assert_eq!(terminal.read_visible().unwrap(), "first");
        assert_eq!(terminal.remaining(), 1);
    }
}

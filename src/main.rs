//! Operator Prompt - command-line entry point
//!
//! Lets shell-driven setup and test scripts reuse the prompt engine.

use anyhow::Context;
use tracing::{debug, error, info};

use operator_prompt::cli::{AskArgs, Cli, Commands};
use operator_prompt::logging::init_tracing;
use operator_prompt::{
    Prompter, ScriptedTerminal, SessionConfig, StdTerminal, TerminalChannel, render_header,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let session = match &cli.answers {
        Some(path) => Some(SessionConfig::load_from_file(path)?),
        None => None,
    };

    let default_filter = if cli.verbose {
        "debug".to_string()
    } else {
        session
            .as_ref()
            .and_then(|s| s.log_filter.clone())
            .unwrap_or_else(|| "warn".to_string())
    };
    init_tracing(&default_filter);
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Validate { file } => {
            info!("Validating answer file: {:?}", file);
            let result = SessionConfig::load_from_file(&file).and_then(|config| config.validate());
            match result {
                Ok(()) => println!("✓ Answer file is valid: {:?}", file),
                Err(e) => {
                    error!("Answer file validation failed: {:#}", e);
                    eprintln!("✗ Answer file validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Header { message } => {
            println!("{}", render_header(&message));
        }
        Commands::Ask(args) => {
            let value = match session {
                Some(session) => {
                    session.validate()?;
                    run_scripted(session.into_terminal(), &args)?
                }
                None if cli.non_interactive => {
                    run_ask(StdTerminal::force_non_interactive(), &args)?
                }
                None => run_ask(StdTerminal::new(), &args)?,
            };
            println!("{}", value);
        }
    }

    Ok(())
}

/// Run the prompt over `channel` and return the accepted value
fn run_ask<C: TerminalChannel>(channel: C, args: &AskArgs) -> anyhow::Result<String> {
    let mut prompter = Prompter::new(channel);
    ask_with(&mut prompter, args)
}

/// Replay an answer file, echoing the transcript an operator would have seen
fn run_scripted(channel: ScriptedTerminal, args: &AskArgs) -> anyhow::Result<String> {
    let mut prompter = Prompter::new(channel);
    let result = ask_with(&mut prompter, args);
    print!("{}", prompter.channel().output());
    for line in prompter.channel().diagnostics() {
        eprintln!("{}", line);
    }
    result
}

fn ask_with<C: TerminalChannel>(
    prompter: &mut Prompter<C>,
    args: &AskArgs,
) -> anyhow::Result<String> {
    let request = args.request();
    let filter = args.filter();

    let value = if args.defaults.is_empty() {
        prompter.prompt(&request, &filter)
    } else {
        let previous = args.previous();
        prompter.prompt_with_defaults(
            &request,
            args.defaults.as_slice(),
            previous.as_ref(),
            &filter,
        )
    };

    value.with_context(|| format!("Failed to read {:?}", args.field))
}

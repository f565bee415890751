//! tell - convert natural language to shell commands.
//!
//! Detects the host environment, asks the Groq API for a single command,
//! shows it with shell-aware highlighting, and executes it only after
//! explicit confirmation. A small rolling history on disk lets follow-up
//! requests refer to prior turns.

mod config;
mod context;
mod display;
mod error;
mod exec;
mod generate;
mod history;
mod llm;
mod prompt;
mod session;

use anyhow::Result;
use clap::Parser;
use config::Config;
use context::SessionContext;
use generate::Generator;
use history::HistoryStore;
use llm::groq::GroqClient;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tell")]
#[command(author, version, about = "Convert natural language to shell commands via Groq")]
struct Cli {
    /// Natural language task description
    #[arg(value_name = "PROMPT")]
    prompt: Option<String>,

    /// Start interactive mode
    #[arg(short, long)]
    interactive: bool,

    /// Clear stored conversation history and exit
    #[arg(long)]
    clear: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("tell=warn".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let history = HistoryStore::new(Config::history_path()?);

    // --clear short-circuits before any environment or credential work
    if cli.clear {
        history.clear()?;
        println!("History cleared.");
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = SessionContext::resolve()?;
    let config = Config::load()?;
    let client = GroqClient::new(&config)?;
    let generator = Generator::new(Box::new(client), history);
    debug!(model = %config.model, "startup complete");

    match (cli.prompt, cli.interactive) {
        (Some(prompt), false) => {
            let code = session::one_shot(&generator, &ctx, &prompt).await?;
            Ok(exit_code_from(code))
        }
        _ => {
            // -i, or no prompt argument at all, enters the REPL
            session::interactive(&generator, &ctx).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn exit_code_from(code: i32) -> ExitCode {
    ExitCode::from(code.clamp(0, 255) as u8)
}

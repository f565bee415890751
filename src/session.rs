//! One-shot and interactive session orchestration.
//!
//! One-shot runs a single generate→present→execute cycle and maps its
//! outcome onto the process exit code. Interactive mode loops on a
//! readline prompt; declines, failing commands, and generation errors are
//! all reported without ending the loop.

use crate::context::SessionContext;
use crate::display::{self, flavor_for};
use crate::exec::run_command;
use crate::generate::Generator;
use anyhow::Result;
use crossterm::style::Stylize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

/// What a line of interactive input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// End the loop (`exit`/`quit`, any case).
    Quit,
    /// Blank or whitespace-only input; nothing happens.
    Blank,
    /// Wipe the stored history, keep looping.
    ClearHistory,
    /// Treat the trimmed line as a task description.
    Generate(String),
}

pub fn parse_directive(line: &str) -> Directive {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Directive::Blank;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "exit" | "quit" => Directive::Quit,
        "clear" => Directive::ClearHistory,
        _ => Directive::Generate(trimmed.to_string()),
    }
}

/// Outcome of one generate→present→execute cycle.
pub enum CycleOutcome {
    Declined,
    Ran(i32),
}

/// Run one full cycle for `prompt`. Errors from generation or shell launch
/// propagate; a declined confirmation and a failing command do not.
pub async fn run_cycle(
    generator: &Generator,
    ctx: &SessionContext,
    prompt: &str,
) -> Result<CycleOutcome> {
    let command = generator.generate(prompt, ctx).await?;

    display::print_command(&command, flavor_for(&ctx.shell.name));
    if !display::confirm("Run this command?") {
        println!("{}", "Aborted.".yellow());
        return Ok(CycleOutcome::Declined);
    }

    let code = run_command(&command, &ctx.shell.path)?;
    if code != 0 {
        eprintln!("{}", format!("Command exited with code {}.", code).red());
    }
    Ok(CycleOutcome::Ran(code))
}

/// One-shot mode: decline is success; a failing command's exit code
/// becomes the process's own.
pub async fn one_shot(generator: &Generator, ctx: &SessionContext, prompt: &str) -> Result<i32> {
    match run_cycle(generator, ctx, prompt).await? {
        CycleOutcome::Declined => Ok(0),
        CycleOutcome::Ran(code) => Ok(code),
    }
}

/// Interactive mode: loop until `exit`/`quit`, end of input, or interrupt.
pub async fn interactive(generator: &Generator, ctx: &SessionContext) -> Result<()> {
    println!(
        "{} interactive mode. Type 'exit' or 'quit' to stop, 'clear' to wipe history.",
        "tell".bold()
    );

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("Describe a task> ") {
            Ok(line) => match parse_directive(&line) {
                Directive::Blank => continue,
                Directive::Quit => break,
                Directive::ClearHistory => {
                    match generator.history().clear() {
                        Ok(()) => println!("History cleared."),
                        Err(e) => eprintln!("{}", format!("Failed to clear history: {}", e).red()),
                    }
                }
                Directive::Generate(prompt) => {
                    let _ = rl.add_history_entry(line.as_str());
                    // Errors end this request, not the session
                    if let Err(e) = run_cycle(generator, ctx, &prompt).await {
                        eprintln!("{}", format!("Error: {:#}", e).red());
                    }
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    debug!("interactive session ended");
    Ok(())
}

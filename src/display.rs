//! Candidate command rendering and confirmation.
//!
//! The command is shown with token-level styling before the user decides.
//! Highlighting is shell-aware only in the shallow sense the tool needs:
//! zsh selects a slightly larger reserved-word set, everything else is
//! treated as POSIX.

use crossterm::style::Stylize;
use std::io::{self, Write};

/// Highlighting flavor, selected from the shell's base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    Zsh,
    Posix,
}

pub fn flavor_for(shell_name: &str) -> Flavor {
    if shell_name == "zsh" {
        Flavor::Zsh
    } else {
        Flavor::Posix
    }
}

const POSIX_KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "in",
];

const ZSH_KEYWORDS: &[&str] = &["foreach", "repeat", "always", "end"];

const OPERATORS: &[&str] = &["|", "||", "&&", ";", "&", ">", ">>", "<", "2>", "2>&1"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Command,
    Keyword,
    Flag,
    Str,
    Operator,
    Plain,
}

fn classify(token: &str, at_command_position: bool, flavor: Flavor) -> TokenKind {
    if OPERATORS.contains(&token) {
        return TokenKind::Operator;
    }
    if POSIX_KEYWORDS.contains(&token)
        || (flavor == Flavor::Zsh && ZSH_KEYWORDS.contains(&token))
    {
        return TokenKind::Keyword;
    }
    if token.starts_with('\'') || token.starts_with('"') {
        return TokenKind::Str;
    }
    if token.starts_with('-') {
        return TokenKind::Flag;
    }
    if at_command_position {
        return TokenKind::Command;
    }
    TokenKind::Plain
}

/// Print the proposed command with shell-appropriate highlighting.
pub fn print_command(command: &str, flavor: Flavor) {
    println!("{}", "Proposed command:".bold());

    let mut at_command_position = true;
    let styled: Vec<String> = command
        .split_whitespace()
        .map(|token| {
            let kind = classify(token, at_command_position, flavor);
            // A new command starts after an operator or a control keyword
            at_command_position = matches!(kind, TokenKind::Operator | TokenKind::Keyword);
            match kind {
                TokenKind::Command => token.green().bold().to_string(),
                TokenKind::Keyword => token.yellow().bold().to_string(),
                TokenKind::Flag => token.cyan().to_string(),
                TokenKind::Str => token.dark_yellow().to_string(),
                TokenKind::Operator => token.magenta().to_string(),
                TokenKind::Plain => token.to_string(),
            }
        })
        .collect();

    println!("  {}", styled.join(" "));
}

/// Yes/no prompt. A bare enter, end of input, or anything but y/yes
/// declines.
pub fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
    }
}

//! Host environment detection and directory context sampling.
//!
//! Collects what the model needs to generate an appropriate command: the
//! OS family, the user's shell, and a bounded listing of the current
//! directory so referential requests ("delete that csv") can be resolved.

use crate::error::TellError;
use std::path::Path;
use tracing::debug;

/// Default cap on directory entries passed to the model.
pub const MAX_DIR_ENTRIES: usize = 50;

/// What the sampler reports when there is nothing visible to list.
const EMPTY_DIR_PLACEHOLDER: &str = "(no visible files)";

/// The user's shell, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Shell {
    /// Base name, used for syntax selection (e.g. "zsh").
    pub name: String,
    /// Full path, used for execution.
    pub path: String,
}

/// Environment resolved once at startup and read-only thereafter.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub os_name: &'static str,
    pub shell: Shell,
}

impl SessionContext {
    pub fn resolve() -> Result<Self, TellError> {
        let os_name = detect_os()?;
        let shell = detect_shell();
        debug!(os = os_name, shell = %shell.path, "resolved session context");
        Ok(Self { os_name, shell })
    }
}

/// Gate on the host OS family. A platform mismatch is fatal, not retryable.
pub fn detect_os() -> Result<&'static str, TellError> {
    if std::env::consts::OS == "linux" {
        Ok("Linux")
    } else {
        Err(TellError::UnsupportedPlatform)
    }
}

/// Read $SHELL, falling back to /bin/bash when unset.
pub fn detect_shell() -> Shell {
    let path = std::env::var("SHELL").unwrap_or_else(|_| "/bin/bash".to_string());
    let name = Path::new(&path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("bash")
        .to_ascii_lowercase();
    Shell { name, path }
}

/// List the current directory for the model: non-hidden entries, sorted,
/// comma-joined, truncated at `max_entries` with a count of what was cut.
/// Any I/O problem degrades to the placeholder rather than propagating.
pub fn sample_directory(max_entries: usize) -> String {
    match std::env::current_dir() {
        Ok(dir) => sample_dir_at(&dir, max_entries),
        Err(_) => EMPTY_DIR_PLACEHOLDER.to_string(),
    }
}

fn sample_dir_at(dir: &Path, max_entries: usize) -> String {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return EMPTY_DIR_PLACEHOLDER.to_string(),
    };

    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect();

    if names.is_empty() {
        return EMPTY_DIR_PLACEHOLDER.to_string();
    }

    names.sort();

    if names.len() > max_entries {
        let omitted = names.len() - max_entries;
        names.truncate(max_entries);
        format!("{}, ... (+{} more)", names.join(", "), omitted)
    } else {
        names.join(", ")
    }
}

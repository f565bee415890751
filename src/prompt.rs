//! System prompt construction.

/// Build the instruction the model sees before the conversation. Pure and
/// deterministic: stable output for stable inputs.
pub fn build_system_prompt(os_name: &str, shell_name: &str, dir_context: &str) -> String {
    format!(
        r#"You are a shell command generator. Your ONLY output is the exact command to run.

Rules:
- Output ONLY the command, nothing else
- No markdown, no backticks, no explanations
- Exactly one command line
- Prefer GNU coreutils
- Use the directory listing to resolve references like "that file" or "the csv"
- Make reasonable assumptions for ambiguous requests

Target OS: {}
Shell: {}
Current directory contains: {}"#,
        os_name, shell_name, dir_context
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_all_inputs() {
        let prompt = build_system_prompt("Linux", "zsh", "a.txt, b.txt");
        assert!(prompt.contains("Target OS: Linux"));
        assert!(prompt.contains("Shell: zsh"));
        assert!(prompt.contains("Current directory contains: a.txt, b.txt"));
    }

    #[test]
    fn test_stable_for_stable_inputs() {
        let a = build_system_prompt("Linux", "bash", "(no visible files)");
        let b = build_system_prompt("Linux", "bash", "(no visible files)");
        assert_eq!(a, b);
    }
}

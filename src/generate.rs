//! Command generation pipeline.
//!
//! One round: sample the directory, build the system prompt, replay the
//! stored history, send the new request, clean the response, persist both
//! turns. Persistence happens before the user decides whether to run the
//! command, so a declined command still informs follow-ups.

use crate::context::{sample_directory, SessionContext, MAX_DIR_ENTRIES};
use crate::error::TellError;
use crate::history::{HistoryStore, Turn};
use crate::llm::{ChatApi, ChatMessage};
use crate::prompt::build_system_prompt;
use anyhow::Result;
use tracing::debug;

pub struct Generator {
    client: Box<dyn ChatApi>,
    history: HistoryStore,
}

impl Generator {
    pub fn new(client: Box<dyn ChatApi>, history: HistoryStore) -> Self {
        Self { client, history }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Generate a single command for `user_prompt`.
    pub async fn generate(&self, user_prompt: &str, ctx: &SessionContext) -> Result<String> {
        let user_prompt = user_prompt.trim();
        let dir_context = sample_directory(MAX_DIR_ENTRIES);
        let system_prompt = build_system_prompt(ctx.os_name, &ctx.shell.name, &dir_context);

        let mut turns = self.history.load();
        debug!(prior_turns = turns.len(), "loaded history");

        let mut messages = Vec::with_capacity(turns.len() + 2);
        messages.push(ChatMessage::system(system_prompt));
        messages.extend(turns.iter().map(ChatMessage::from));
        messages.push(ChatMessage::user(user_prompt));

        let raw = self.client.send(&messages).await?;
        let command = strip_command(&raw);
        if command.is_empty() {
            return Err(TellError::EmptyGeneration.into());
        }
        debug!(%command, "generated command");

        turns.push(Turn::user(user_prompt));
        turns.push(Turn::assistant(command.clone()));
        self.history.save(&turns)?;

        Ok(command)
    }
}

/// Strip fenced or backticked wrapping the model sometimes emits despite
/// instructions: one leading fence line, one trailing fence, then any
/// backticks and whitespace at the edges. A narrow cleanup, not a markdown
/// parser. Idempotent.
pub fn strip_command(raw: &str) -> String {
    let mut cleaned = raw.trim();

    if let Some(rest) = cleaned.strip_prefix("```") {
        // The rest of the fence line is a language tag; drop the whole line.
        cleaned = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest,
        };
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest;
    }

    cleaned.trim().trim_matches('`').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Shell;
    use anyhow::anyhow;
    use async_trait::async_trait;

    #[test]
    fn test_strip_plain_command_unchanged() {
        assert_eq!(strip_command("ls -la"), "ls -la");
    }

    #[test]
    fn test_strip_fenced_block() {
        assert_eq!(strip_command("```\necho hi\n```"), "echo hi");
    }

    #[test]
    fn test_strip_fenced_block_with_language() {
        assert_eq!(strip_command("```bash\nls -la\n```"), "ls -la");
    }

    #[test]
    fn test_strip_backticks_and_whitespace() {
        assert_eq!(strip_command("  `ls -la`  "), "ls -la");
    }

    #[test]
    fn test_strip_is_idempotent() {
        for raw in ["```\necho hi\n```", "  `ls -la`  ", "ls -la", "``````"] {
            let once = strip_command(raw);
            assert_eq!(strip_command(&once), once);
        }
    }

    #[test]
    fn test_strip_preserves_inner_backticks() {
        assert_eq!(strip_command("echo `date`"), "echo `date`");
    }

    struct FakeApi {
        reply: String,
    }

    #[async_trait]
    impl ChatApi for FakeApi {
        async fn send(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(self.reply.clone())
        }
    }

    struct FailingApi;

    #[async_trait]
    impl ChatApi for FailingApi {
        async fn send(&self, _messages: &[ChatMessage]) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    fn test_ctx() -> SessionContext {
        SessionContext {
            os_name: "Linux",
            shell: Shell {
                name: "bash".to_string(),
                path: "/bin/bash".to_string(),
            },
        }
    }

    fn generator_in(dir: &tempfile::TempDir, client: Box<dyn ChatApi>) -> Generator {
        Generator::new(client, HistoryStore::new(dir.path().join("history.json")))
    }

    #[tokio::test]
    async fn test_generate_cleans_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let gen = generator_in(
            &dir,
            Box::new(FakeApi {
                reply: "```\nls -la\n```".to_string(),
            }),
        );

        let command = gen.generate("list everything", &test_ctx()).await.unwrap();
        assert_eq!(command, "ls -la");

        let turns = gen.history().load();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], Turn::user("list everything"));
        assert_eq!(turns[1], Turn::assistant("ls -la"));
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let gen = generator_in(
            &dir,
            Box::new(FakeApi {
                reply: "``````".to_string(),
            }),
        );

        let err = gen.generate("do nothing", &test_ctx()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TellError>(),
            Some(TellError::EmptyGeneration)
        ));
        // Nothing persisted on failure
        assert!(gen.history().load().is_empty());
    }

    #[tokio::test]
    async fn test_generate_transport_failure_leaves_history_alone() {
        let dir = tempfile::tempdir().unwrap();
        let gen = generator_in(&dir, Box::new(FailingApi));
        assert!(gen.generate("anything", &test_ctx()).await.is_err());
        assert!(gen.history().load().is_empty());
    }
}

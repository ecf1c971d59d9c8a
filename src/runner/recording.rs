// file: src/runner/recording.rs
// version: 1.0.0
// guid: c127c4db-6c8a-4b57-906f-84f72d0c3e9a

//! A runner that records invocations and replays canned replies

use super::{CommandRunner, CommandSpec};
use crate::error::WorkbenchError;
use crate::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Stdout(String),
    Fail { exit_code: i32, stderr: String },
}

/// Records every command instead of running it
///
/// Replies are queued per program name and consumed in order; a program
/// with no queued reply succeeds with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
}

impl RecordingRunner {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue stdout for the next call of `program`
    pub fn reply(self, program: &str, stdout: impl Into<String>) -> Self {
        self.push(program, Reply::Stdout(stdout.into()));
        self
    }

    /// Make the next call of `program` fail
    pub fn fail(self, program: &str, exit_code: i32, stderr: impl Into<String>) -> Self {
        self.push(
            program,
            Reply::Fail {
                exit_code,
                stderr: stderr.into(),
            },
        );
        self
    }

    fn push(&self, program: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(program.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Every command seen so far, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Every command seen so far, rendered as shell lines
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }

    fn record(&self, spec: &CommandSpec) -> Result<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(spec.clone());

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(&spec.program)
            .and_then(VecDeque::pop_front);

        match reply {
            None => Ok(String::new()),
            Some(Reply::Stdout(out)) => Ok(out),
            Some(Reply::Fail { exit_code, stderr }) => Err(WorkbenchError::ProcessError {
                command: spec.to_string(),
                exit_code: Some(exit_code),
                stderr,
            }),
        }
    }
}

#[async_trait::async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        self.record(spec).map(|_| ())
    }

    async fn output(&self, spec: &CommandSpec) -> Result<String> {
        self.record(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_are_consumed_in_order() {
        let runner = RecordingRunner::new()
            .reply("git", "first")
            .fail("git", 2, "second failed");

        let spec = CommandSpec::new("git").arg("ls-remote");
        assert_eq!(runner.output(&spec).await.unwrap(), "first");
        assert_eq!(runner.output(&spec).await.unwrap_err().exit_code(), Some(2));
        assert_eq!(runner.output(&spec).await.unwrap(), "");
        assert_eq!(runner.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_lines_render_commands() {
        let runner = RecordingRunner::new();
        runner
            .run(&CommandSpec::new("toolbox").args(["create", "dev"]))
            .await
            .unwrap();

        assert_eq!(runner.lines(), vec!["toolbox create dev"]);
    }
}

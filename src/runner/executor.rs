// ABOUTME: Command execution seam between the runner and the SSH transport.
// ABOUTME: Production uses a live session; tests substitute a scripted mock.

use crate::ssh::{self, CommandOutput, Session};
use async_trait::async_trait;
use std::time::Duration;

/// Anything that can run a shell command on the deployment target.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run_command(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> ssh::Result<CommandOutput>;
}

#[async_trait]
impl CommandRunner for Session {
    async fn run_command(
        &self,
        command: &str,
        timeout: Option<Duration>,
    ) -> ssh::Result<CommandOutput> {
        match timeout {
            Some(timeout) => self.exec_with_timeout(command, timeout).await,
            None => self.exec(command).await,
        }
    }
}

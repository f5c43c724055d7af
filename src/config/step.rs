// ABOUTME: Deployment step descriptors and shell command rendering.
// ABOUTME: Declared order is execution order; rendering prepends env exports and workdir.

use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct DeployStep {
    /// Descriptive label shown in progress output and the run report.
    pub name: String,

    /// Shell command executed on the remote host. A step may background a
    /// long-running process (`nohup … &`); the runner never waits for it.
    pub command: String,

    /// A failing step normally aborts the remaining sequence. Set this to
    /// tolerate non-zero exits (e.g. freeing a port nobody listens on).
    #[serde(default)]
    pub allow_failure: bool,

    /// Overrides the session command timeout for this step.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl DeployStep {
    /// Produce the final command string: env exports, then the optional
    /// workdir change, then the step command itself.
    pub fn render(&self, workdir: Option<&str>, env: &[(String, String)]) -> String {
        let mut rendered = String::new();
        for (key, value) in env {
            rendered.push_str("export ");
            rendered.push_str(key);
            rendered.push('=');
            rendered.push_str(&shell_quote(value));
            rendered.push_str("; ");
        }
        if let Some(dir) = workdir {
            rendered.push_str("cd ");
            rendered.push_str(&shell_quote(dir));
            rendered.push_str(" && ");
        }
        rendered.push_str(&self.command);
        rendered
    }
}

/// A step with its final command string, ready for remote execution.
#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub name: String,
    pub command: String,
    pub allow_failure: bool,
    pub timeout: Option<Duration>,
}

/// Single-quote a value for POSIX shells.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(command: &str) -> DeployStep {
        DeployStep {
            name: "test".to_string(),
            command: command.to_string(),
            allow_failure: false,
            timeout: None,
        }
    }

    #[test]
    fn render_bare_command() {
        assert_eq!(step("git pull").render(None, &[]), "git pull");
    }

    #[test]
    fn render_with_workdir() {
        assert_eq!(
            step("git pull").render(Some("/srv/app"), &[]),
            "cd '/srv/app' && git pull"
        );
    }

    #[test]
    fn render_with_env_and_workdir() {
        let env = vec![("LOG_LEVEL".to_string(), "info".to_string())];
        assert_eq!(
            step("git pull").render(Some("/srv/app"), &env),
            "export LOG_LEVEL='info'; cd '/srv/app' && git pull"
        );
    }

    #[test]
    fn quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }
}

// ABOUTME: Run report types: per-step outcomes and the aggregate result.
// ABOUTME: Serializable for the JSON output mode.

use crate::config::PlannedStep;
use crate::ssh::{self, CommandOutput};
use crate::types::ServiceName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Completed,
    Failed,
    Skipped,
}

/// What happened to a single step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub name: String,
    pub command: String,
    pub outcome: StepOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    pub allow_failure: bool,
    pub duration_secs: f64,
}

impl StepReport {
    pub fn completed(step: &PlannedStep, output: &CommandOutput, duration: Duration) -> Self {
        Self {
            name: step.name.clone(),
            command: step.command.clone(),
            outcome: if output.success() {
                StepOutcome::Completed
            } else {
                StepOutcome::Failed
            },
            exit_code: Some(output.exit_code),
            stdout: output.stdout.clone(),
            stderr: output.stderr.clone(),
            allow_failure: step.allow_failure,
            duration_secs: duration.as_secs_f64(),
        }
    }

    /// A step whose command never produced an exit status.
    pub fn errored(step: &PlannedStep, error: &ssh::Error, duration: Duration) -> Self {
        Self {
            name: step.name.clone(),
            command: step.command.clone(),
            outcome: StepOutcome::Failed,
            exit_code: None,
            stdout: String::new(),
            stderr: error.to_string(),
            allow_failure: step.allow_failure,
            duration_secs: duration.as_secs_f64(),
        }
    }

    pub fn skipped(step: &PlannedStep) -> Self {
        Self {
            name: step.name.clone(),
            command: step.command.clone(),
            outcome: StepOutcome::Skipped,
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
            allow_failure: step.allow_failure,
            duration_secs: 0.0,
        }
    }
}

/// Aggregate result of one deployment run.
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub service: ServiceName,
    /// Host the steps ran on.
    pub target: String,
    /// Hostname of the machine that ran the deployment.
    pub initiator: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub success: bool,
    pub steps: Vec<StepReport>,
}

impl RunResult {
    /// First strict step that failed, if any.
    pub fn failed_step(&self) -> Option<&StepReport> {
        self.steps
            .iter()
            .find(|s| s.outcome == StepOutcome::Failed && !s.allow_failure)
    }
}

// ABOUTME: The deployment runner: executes the planned step sequence in order.
// ABOUTME: A failing strict step aborts the remainder; later steps are recorded as skipped.

mod executor;
mod report;

pub use executor::CommandRunner;
pub use report::{RunResult, StepOutcome, StepReport};

use crate::config::PlannedStep;
use crate::output::Output;
use crate::types::ServiceName;
use chrono::Utc;
use std::time::Instant;

/// Execute the planned steps in declared order over one already-established
/// session.
///
/// Strict steps (the default) abort the remaining sequence on failure; the
/// remaining steps are recorded as skipped. Steps marked `allow_failure` are
/// recorded as failed but never affect the aggregate result. A transport
/// error mid-step (e.g. a command timeout) counts as a failure of that step.
pub async fn run_steps(
    executor: &dyn CommandRunner,
    service: &ServiceName,
    target: &str,
    plan: &[PlannedStep],
    output: &Output,
) -> RunResult {
    let started_at = Utc::now();
    let mut steps = Vec::with_capacity(plan.len());
    let mut aborted = false;

    for step in plan {
        if aborted {
            output.progress(&format!("  - {} (skipped)", step.name));
            steps.push(StepReport::skipped(step));
            continue;
        }

        output.progress(&format!("  → {}...", step.name));
        tracing::debug!(step = %step.name, command = %step.command, "executing step");
        let start = Instant::now();

        match executor.run_command(&step.command, step.timeout).await {
            Ok(cmd_output) => {
                if cmd_output.success() {
                    tracing::info!(step = %step.name, "step completed");
                } else if step.allow_failure {
                    tracing::warn!(
                        step = %step.name,
                        exit_code = cmd_output.exit_code,
                        "step failed (tolerated)"
                    );
                } else {
                    output.error(&format!(
                        "step '{}' exited with code {}",
                        step.name, cmd_output.exit_code
                    ));
                    aborted = true;
                }
                steps.push(StepReport::completed(step, &cmd_output, start.elapsed()));
            }
            Err(e) => {
                tracing::error!(step = %step.name, error = %e, "step execution error");
                if !step.allow_failure {
                    output.error(&format!("step '{}' failed: {}", step.name, e));
                    aborted = true;
                }
                steps.push(StepReport::errored(step, &e, start.elapsed()));
            }
        }
    }

    RunResult {
        service: service.clone(),
        target: target.to_string(),
        initiator: gethostname::gethostname().to_string_lossy().into_owned(),
        started_at,
        finished_at: Utc::now(),
        success: !aborted,
        steps,
    }
}

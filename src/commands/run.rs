// ABOUTME: Run command implementation.
// ABOUTME: Opens one SSH session, executes the step sequence, and reports the result.

use redeploy::config::Config;
use redeploy::diagnostics::{Diagnostics, Warning};
use redeploy::error::{Error, Result};
use redeploy::output::Output;
use redeploy::runner::{self, StepOutcome};
use redeploy::ssh::Session;

pub async fn run(config: Config, mut output: Output) -> Result<()> {
    output.start_timer();

    let plan = config.step_plan()?;
    let session_config = config.server.session_config()?;
    let target = session_config.host.clone();
    let mut diag = Diagnostics::default();

    output.progress(&format!(
        "Deploying {} to {} ({} step(s))",
        config.service,
        target,
        plan.len()
    ));
    output.progress(&format!("  → Connecting to {}...", target));

    // One session per run. Connection or auth failure surfaces here, before
    // any step executes.
    let session = Session::connect(session_config).await?;

    let result = runner::run_steps(&session, &config.service, &target, &plan, &output).await;

    // Disconnect SSH session (non-fatal if it fails)
    if let Err(e) = session.disconnect().await {
        diag.warn(Warning::ssh_disconnect(format!(
            "SSH disconnect failed for {}: {}",
            target, e
        )));
    }

    for step in &result.steps {
        if step.outcome == StepOutcome::Failed && step.allow_failure {
            diag.warn(Warning::step_tolerated(match step.exit_code {
                Some(code) => format!("step '{}' exited with code {}", step.name, code),
                None => format!("step '{}' failed: {}", step.name, step.stderr.trim()),
            }));
        }
    }

    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.json_line(&result);

    if result.success {
        output.success(&format!("Deployment of {} complete!", config.service));
        Ok(())
    } else {
        let step = result
            .failed_step()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "unknown".to_string());
        Err(Error::StepFailed { step })
    }
}

// ABOUTME: Plan command implementation.
// ABOUTME: Prints the rendered step sequence without opening a session.

use redeploy::config::Config;
use redeploy::error::Result;
use redeploy::output::Output;
use serde::Serialize;

pub fn plan(config: &Config, output: &Output) -> Result<()> {
    let plan = config.step_plan()?;

    output.progress(&format!("Plan for {}:", config.service));

    for (index, step) in plan.iter().enumerate() {
        let marker = if step.allow_failure { " (may fail)" } else { "" };
        output.progress(&format!("{}. {}{}", index + 1, step.name, marker));
        output.progress(&format!("   $ {}", step.command));
        output.json_line(&PlannedStepLine {
            index: index + 1,
            name: &step.name,
            command: &step.command,
            allow_failure: step.allow_failure,
        });
    }

    output.success(&format!("{} step(s) planned", plan.len()));
    Ok(())
}

#[derive(Serialize)]
struct PlannedStepLine<'a> {
    index: usize,
    name: &'a str,
    command: &'a str,
    allow_failure: bool,
}

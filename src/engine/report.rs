//! Scenario report rendering
//!
//! Passing steps get a single line. Failing steps add the request payload,
//! expected vs. actual values and the raw response body.

use std::io::{self, Write};

use crate::engine::result::{display_value, ScenarioOutcome, StepResult, StepStatus};

pub fn status_icon(status: &StepStatus) -> &'static str {
    match status {
        StepStatus::Passed => "✅",
        StepStatus::Failed { .. } => "❌",
        StepStatus::Skipped { .. } => "⊖",
    }
}

/// Write the human-readable report
pub fn render_text<W: Write>(outcome: &ScenarioOutcome, out: &mut W) -> io::Result<()> {
    for step in &outcome.steps {
        render_step(step, out)?;
    }

    if let Some(abort) = &outcome.aborted {
        writeln!(
            out,
            "{} gate not satisfied: {}. Skipping further tests.",
            abort.step.name(),
            abort.reason
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} passed, {} failed, {} skipped",
        outcome.passed_count(),
        outcome.failed_count(),
        outcome.skipped_count()
    )?;
    Ok(())
}

fn render_step<W: Write>(step: &StepResult, out: &mut W) -> io::Result<()> {
    let icon = status_icon(&step.status);

    match &step.status {
        StepStatus::Passed => match &step.detail {
            Some(detail) => writeln!(out, "{}: {} PASSED, {}", step.name, icon, detail),
            None => writeln!(out, "{}: {} PASSED", step.name, icon),
        },
        StepStatus::Skipped { reason } => {
            writeln!(out, "{}: {} SKIPPED ({})", step.name, icon, reason)
        }
        StepStatus::Failed { .. } => {
            writeln!(out, "{}: {} FAILED", step.name, icon)?;
            if let Some(payload) = &step.request_payload {
                writeln!(out, "  Request: {}", payload)?;
            }
            if let (Some(expected), Some(actual)) = (&step.expected, &step.actual) {
                writeln!(
                    out,
                    "  Expected: {}, Got: {}",
                    display_value(expected),
                    display_value(actual)
                )?;
            }
            if let Some(detail) = &step.detail {
                writeln!(out, "  Error: {}", detail)?;
            }
            match step.response_body.as_deref() {
                Some(body) if !body.is_empty() => writeln!(out, "  Response Body: {}", body),
                _ => Ok(()),
            }
        }
    }
}

/// Render the human-readable report into a string
pub fn to_text(outcome: &ScenarioOutcome) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = render_text(outcome, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

pub fn to_json(outcome: &ScenarioOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}

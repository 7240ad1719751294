use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use marquee_core::{CountdownResult, Phase, format_hms};
use serde::Serialize;

use crate::scenarios::ScenarioResult;
use crate::simulation::Timeline;

/// One evaluation requested from the command line.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub now: String,
    pub now_ms: i64,
    pub utc_offset_minutes: i32,
    pub locale: String,
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
    pub result: CountdownResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
}

fn phase_colored(phase: Phase) -> colored::ColoredString {
    match phase {
        Phase::Before => phase.as_str().normal(),
        Phase::DMinus1 | Phase::Today => phase.as_str().yellow(),
        Phase::Open => phase.as_str().green(),
        Phase::Ended => phase.as_str().red(),
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scenario Results".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{status} {}", result.scenario_name.bold())?;
        if let Some(phase) = result.phase {
            writeln!(out, "   Phase: {}", phase_colored(phase))?;
        }
        writeln!(out, "   Label: {}", result.button_label)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }
    Ok(())
}

pub fn generate_evaluation_report(out: &mut dyn Write, report: &EvaluationReport) -> Result<()> {
    let result = &report.result;
    writeln!(out, "Now:       {} ({})", report.now, report.locale)?;
    writeln!(out, "Phase:     {}", phase_colored(result.phase))?;
    writeln!(
        out,
        "Button:    {} [{}]",
        result.button_label.bold(),
        if result.disabled { "disabled" } else { "enabled" }
    )?;
    if let Some(helper) = result.helper_text.as_deref() {
        writeln!(out, "Helper:    {helper}")?;
    }
    if result.phase.is_live() {
        writeln!(out, "Remaining: {}", format_hms(result.remaining_ms))?;
    }

    if let Some(timeline) = report.timeline.as_ref() {
        writeln!(out)?;
        writeln!(out, "{}", "⏱  Simulated timeline".bright_yellow().bold())?;
        for entry in &timeline.entries {
            let timer = if entry.ticking { "tick" } else { "idle" };
            writeln!(
                out,
                "  {}  {:10} {:4}  {}",
                entry.at,
                phase_colored(entry.phase),
                timer,
                entry.button_label
            )?;
        }
        writeln!(
            out,
            "  {} steps, {} timer start(s), {} cancel(s), max {} concurrent",
            timeline.steps,
            timeline.timer_starts,
            timeline.timer_cancels,
            timeline.max_concurrent_timers
        )?;
        if timeline.moved_backwards {
            writeln!(out, "  {}", "phase moved backwards".red())?;
        }
    }
    Ok(())
}

pub fn generate_json_report<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    let json_output = serde_json::to_string_pretty(value)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

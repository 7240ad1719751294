//! Acceptance scenarios for the phase clock, anchored on a local calendar day.

use marquee_core::constants::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE};
use marquee_core::{CountdownResult, Phase, PhaseClock, ReservationWindow, Timestamp};
use serde::Serialize;

use crate::simulation::simulate;

/// Shared inputs for every scenario.
pub struct ScenarioCtx {
    pub clock: PhaseClock,
    /// Local noon of the anchor day; scenarios place windows around it.
    pub noon: Timestamp,
}

impl ScenarioCtx {
    pub fn new(clock: PhaseClock, anchor: Timestamp) -> Self {
        let offset = clock.offset();
        let day_start_ms = anchor
            .local_day(offset)
            .saturating_mul(MS_PER_DAY)
            .saturating_sub(i64::from(offset.local_minus_utc()) * 1_000);
        let noon = Timestamp::from_millis(day_start_ms).saturating_add_ms(12 * MS_PER_HOUR);
        Self { clock, noon }
    }

    fn at(&self, delta_ms: i64) -> Timestamp {
        self.noon.saturating_add_ms(delta_ms)
    }

    fn window(&self, start_delta: i64, end_delta: i64) -> ReservationWindow {
        ReservationWindow::from_timestamps(self.at(start_delta), self.at(end_delta))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub passed: bool,
    pub phase: Option<Phase>,
    pub button_label: String,
    pub failures: Vec<String>,
}

type ScenarioFn = fn(&ScenarioCtx) -> (Option<CountdownResult>, Vec<String>);

struct Scenario {
    key: &'static str,
    description: &'static str,
    run: ScenarioFn,
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        key: "d-minus-one",
        description: "Sale opens tomorrow at the same time",
        run: d_minus_one,
    },
    Scenario {
        key: "d-three",
        description: "Sale opens in three days",
        run: d_three,
    },
    Scenario {
        key: "today",
        description: "Sale opens later today",
        run: today,
    },
    Scenario {
        key: "open",
        description: "Sale started an hour ago",
        run: open,
    },
    Scenario {
        key: "ended",
        description: "Sale ended yesterday",
        run: ended,
    },
    Scenario {
        key: "unknown",
        description: "Window bounds not loaded yet",
        run: unknown,
    },
    Scenario {
        key: "midnight",
        description: "Opening just after midnight, seen before and after it",
        run: midnight,
    },
    Scenario {
        key: "lifecycle",
        description: "Full sale replay: forward-only phases, one timer at most",
        run: lifecycle,
    },
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description)).collect()
}

/// Expand `all` and validate keys.
///
/// # Errors
///
/// Returns the first unknown scenario key.
pub fn resolve_scenarios(requested: &[String]) -> Result<Vec<&'static str>, String> {
    if requested.is_empty() || requested.iter().any(|k| k == "all") {
        return Ok(SCENARIOS.iter().map(|s| s.key).collect());
    }
    requested
        .iter()
        .map(|key| {
            SCENARIOS
                .iter()
                .find(|s| s.key == key)
                .map(|s| s.key)
                .ok_or_else(|| format!("unknown scenario '{key}'"))
        })
        .collect()
}

pub fn run_scenario(key: &str, ctx: &ScenarioCtx) -> Option<ScenarioResult> {
    let scenario = SCENARIOS.iter().find(|s| s.key == key)?;
    let (observed, failures) = (scenario.run)(ctx);
    log::debug!("scenario {key}: {} failure(s)", failures.len());
    Some(ScenarioResult {
        scenario_name: scenario.key.to_string(),
        passed: failures.is_empty(),
        phase: observed.as_ref().map(|r| r.phase),
        button_label: observed.map(|r| r.button_label).unwrap_or_default(),
        failures,
    })
}

fn expect_phase(result: &CountdownResult, phase: Phase, failures: &mut Vec<String>) {
    if result.phase != phase {
        failures.push(format!("expected phase {phase}, got {}", result.phase));
    }
    if result.disabled == phase.allows_reservation() {
        failures.push(format!("disabled={} is wrong for {phase}", result.disabled));
    }
}

fn expect_label(result: &CountdownResult, expected: &str, failures: &mut Vec<String>) {
    if result.button_label != expected {
        failures.push(format!(
            "expected label '{expected}', got '{}'",
            result.button_label
        ));
    }
}

fn expect_remaining(result: &CountdownResult, expected: i64, failures: &mut Vec<String>) {
    if result.remaining_ms != expected {
        failures.push(format!(
            "expected remaining {expected} ms, got {}",
            result.remaining_ms
        ));
    }
}

fn d_minus_one(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    let result = ctx
        .clock
        .evaluate(ctx.noon, &ctx.window(MS_PER_DAY, 2 * MS_PER_DAY));
    let mut failures = Vec::new();
    expect_phase(&result, Phase::DMinus1, &mut failures);
    expect_remaining(&result, MS_PER_DAY, &mut failures);
    if !result.button_label.contains("12:00") || !result.button_label.contains("24:00:00") {
        failures.push(format!(
            "label '{}' should carry tomorrow's time and the countdown",
            result.button_label
        ));
    }
    (Some(result), failures)
}

fn d_three(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    let result = ctx
        .clock
        .evaluate(ctx.noon, &ctx.window(3 * MS_PER_DAY, 10 * MS_PER_DAY));
    let mut failures = Vec::new();
    expect_phase(&result, Phase::Before, &mut failures);
    let expected = ctx.clock.labels().d_day.replace("{days}", "3");
    expect_label(&result, &expected, &mut failures);
    (Some(result), failures)
}

fn today(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    let result = ctx
        .clock
        .evaluate(ctx.noon, &ctx.window(6 * MS_PER_HOUR, 2 * MS_PER_DAY));
    let mut failures = Vec::new();
    expect_phase(&result, Phase::Today, &mut failures);
    let expected = ctx.clock.labels().today.replace("{countdown}", "06:00:00");
    expect_label(&result, &expected, &mut failures);
    (Some(result), failures)
}

fn open(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    let result = ctx
        .clock
        .evaluate(ctx.noon, &ctx.window(-MS_PER_HOUR, 10 * MS_PER_DAY));
    let mut failures = Vec::new();
    expect_phase(&result, Phase::Open, &mut failures);
    expect_remaining(&result, 0, &mut failures);
    expect_label(&result, &ctx.clock.labels().reserve, &mut failures);
    (Some(result), failures)
}

fn ended(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    let result = ctx
        .clock
        .evaluate(ctx.noon, &ctx.window(-10 * MS_PER_DAY, -MS_PER_DAY));
    let mut failures = Vec::new();
    expect_phase(&result, Phase::Ended, &mut failures);
    expect_label(&result, &ctx.clock.labels().closed, &mut failures);
    (Some(result), failures)
}

fn unknown(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    let result = ctx.clock.evaluate_raw(ctx.noon, "", "");
    let mut failures = Vec::new();
    expect_phase(&result, Phase::Before, &mut failures);
    expect_remaining(&result, 0, &mut failures);
    expect_label(&result, &ctx.clock.labels().scheduled, &mut failures);
    if result.helper_text.is_some() {
        failures.push("unknown window should carry no helper text".to_string());
    }
    (Some(result), failures)
}

fn midnight(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    // Opens at 00:10 tomorrow; observed at 23:30 today and at 00:05 tomorrow.
    let window = ctx.window(12 * MS_PER_HOUR + 10 * MS_PER_MINUTE, 2 * MS_PER_DAY);
    let mut failures = Vec::new();
    let late = ctx
        .clock
        .evaluate(ctx.at(11 * MS_PER_HOUR + 30 * MS_PER_MINUTE), &window);
    expect_phase(&late, Phase::DMinus1, &mut failures);
    let early = ctx
        .clock
        .evaluate(ctx.at(12 * MS_PER_HOUR + 5 * MS_PER_MINUTE), &window);
    expect_phase(&early, Phase::Today, &mut failures);
    (Some(early), failures)
}

fn lifecycle(ctx: &ScenarioCtx) -> (Option<CountdownResult>, Vec<String>) {
    let window = ctx.window(2 * MS_PER_DAY, 2 * MS_PER_DAY + 6 * MS_PER_HOUR);
    let timeline = simulate(
        ctx.clock.clone(),
        window,
        ctx.noon,
        3 * MS_PER_DAY,
        5 * MS_PER_MINUTE,
    );
    let mut failures = Vec::new();
    let mut phases: Vec<Phase> = timeline.entries.iter().map(|e| e.phase).collect();
    phases.dedup();
    let expected = [
        Phase::Before,
        Phase::DMinus1,
        Phase::Today,
        Phase::Open,
        Phase::Ended,
    ];
    if phases != expected {
        failures.push(format!("phase sequence {phases:?} != {expected:?}"));
    }
    if timeline.moved_backwards {
        failures.push("phase moved backwards".to_string());
    }
    if timeline.max_concurrent_timers > 1 {
        failures.push(format!(
            "{} timers ran at once",
            timeline.max_concurrent_timers
        ));
    }
    if timeline.timers_left_running != 0 {
        failures.push("timer survived unmount".to_string());
    }
    let last = timeline.entries.last().map(|entry| CountdownResult {
        phase: entry.phase,
        disabled: !entry.phase.allows_reservation(),
        remaining_ms: 0,
        button_label: entry.button_label.clone(),
        helper_text: None,
    });
    (last, failures)
}

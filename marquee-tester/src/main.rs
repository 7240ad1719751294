mod reports;
mod scenarios;
mod simulation;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use marquee_core::constants::MS_PER_SECOND;
use marquee_core::{
    Clock, CountdownConfig, PhaseClock, SystemClock, Timestamp, offset_from_minutes,
    parse_timestamp,
};
use reports::EvaluationReport;
use scenarios::{ScenarioCtx, list_scenarios, resolve_scenarios, run_scenario};

#[derive(Debug, Parser)]
#[command(name = "marquee-tester", version = "0.1.0")]
#[command(about = "Evaluate, simulate and acceptance-test the reservation phase clock")]
struct Args {
    /// Reservation start (RFC 3339, local date-time, local date or epoch millis)
    #[arg(long)]
    start: Option<String>,

    /// Reservation end, same formats as --start
    #[arg(long)]
    end: Option<String>,

    /// Evaluation instant; defaults to the wall clock
    #[arg(long)]
    now: Option<String>,

    /// Simulate the mounted countdown for this many seconds
    #[arg(long)]
    simulate: Option<u64>,

    /// Simulation step in seconds
    #[arg(long, default_value_t = 1)]
    step: u64,

    /// Scenarios to run (comma-separated, or "all")
    #[arg(long)]
    scenarios: Option<String>,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Copy locale; defaults to the configured default locale
    #[arg(long)]
    locale: Option<String>,

    /// Override the configured UTC offset in minutes
    #[arg(long, allow_hyphen_values = true)]
    offset_minutes: Option<i32>,

    /// JSON countdown config to load instead of the bundled one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    if args.report == "console" {
        announce_banner();
    }

    let config = load_config(args.config.as_ref())?;
    let locale = args
        .locale
        .clone()
        .unwrap_or_else(|| config.default_locale.clone());
    let mut clock = PhaseClock::from_config(&config, &locale);
    if let Some(minutes) = args.offset_minutes {
        let offset = offset_from_minutes(minutes)
            .with_context(|| format!("UTC offset {minutes} minutes is out of range"))?;
        clock = clock.with_offset(offset);
    }
    let now = resolve_now(&clock, args.now.as_deref())?;

    let mut output_target = OutputTarget::new(args.output.clone())?;
    let passed = if args.start.is_some() || args.end.is_some() {
        let report = evaluate_window(&args, &clock, &locale, now);
        if args.report == "json" {
            reports::generate_json_report(&mut output_target, &report)?;
        } else {
            reports::generate_evaluation_report(&mut output_target, &report)?;
        }
        report
            .timeline
            .as_ref()
            .is_none_or(|timeline| !timeline.moved_backwards && timeline.timers_left_running == 0)
    } else {
        let start_time = Instant::now();
        let requested = split_csv(args.scenarios.as_deref().unwrap_or("all"));
        let keys = resolve_scenarios(&requested).map_err(anyhow::Error::msg)?;
        let ctx = ScenarioCtx::new(clock, now);
        let results: Vec<_> = keys
            .iter()
            .filter_map(|key| run_scenario(key, &ctx))
            .collect();
        if args.report == "json" {
            reports::generate_json_report(&mut output_target, &results)?;
        } else {
            reports::generate_console_report(&mut output_target, &results, start_time.elapsed())?;
        }
        results.iter().all(|r| r.passed)
    };
    output_target.flush_inner()?;

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:15} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎟  Marquee Reservation Clock Tester".bright_cyan().bold());
    println!("{}", "===================================".cyan());
}

fn load_config(path: Option<&PathBuf>) -> Result<CountdownConfig> {
    let Some(path) = path else {
        return Ok(CountdownConfig::default_config());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    CountdownConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

fn resolve_now(clock: &PhaseClock, raw: Option<&str>) -> Result<Timestamp> {
    let Some(raw) = raw else {
        return Ok(SystemClock.now());
    };
    match parse_timestamp(raw, clock.offset()).valid() {
        Some(now) => Ok(now),
        None => bail!("could not parse --now value '{raw}'"),
    }
}

fn evaluate_window(args: &Args, clock: &PhaseClock, locale: &str, now: Timestamp) -> EvaluationReport {
    let window = clock.parse_window(
        args.start.as_deref().unwrap_or_default(),
        args.end.as_deref().unwrap_or_default(),
    );
    if window.bounds().is_none() {
        log::warn!("reservation window is incomplete; reporting the scheduled state");
    }
    let result = clock.evaluate(now, &window);
    let timeline = args.simulate.map(|secs| {
        let duration_ms = i64::try_from(secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(MS_PER_SECOND);
        let step_ms = i64::try_from(args.step)
            .unwrap_or(i64::MAX)
            .max(1)
            .saturating_mul(MS_PER_SECOND);
        simulation::simulate(clock.clone(), window, now, duration_ms, step_ms)
    });
    EvaluationReport {
        now: now
            .to_local(clock.offset())
            .map(|local| local.to_rfc3339())
            .unwrap_or_default(),
        now_ms: now.as_millis(),
        utc_offset_minutes: marquee_core::timestamp::offset_minutes(clock.offset()),
        locale: locale.to_string(),
        start_ms: window.start_at.valid().map(Timestamp::as_millis),
        end_ms: window.end_at.valid().map(Timestamp::as_millis),
        result,
        timeline,
    }
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            start: None,
            end: None,
            now: None,
            simulate: None,
            step: 1,
            scenarios: None,
            list_scenarios: false,
            locale: None,
            offset_minutes: None,
            config: None,
            report: "json".to_string(),
            output: None,
            verbose: false,
        }
    }

    fn clock() -> PhaseClock {
        PhaseClock::from_config(&CountdownConfig::builtin(), "en")
    }

    #[test]
    fn split_csv_trims_and_filters() {
        assert_eq!(split_csv(" open, ,ended "), vec!["open", "ended"]);
    }

    #[test]
    fn resolve_now_parses_or_rejects() {
        let now = resolve_now(&clock(), Some("1749531600000")).unwrap();
        assert_eq!(now.as_millis(), 1_749_531_600_000);
        assert!(resolve_now(&clock(), Some("soon")).is_err());
    }

    #[test]
    fn evaluate_window_reports_bounds_and_timeline() {
        let mut args = base_args();
        args.start = Some("2025-06-10T18:00:00+09:00".to_string());
        args.end = Some("2025-06-11T18:00:00+09:00".to_string());
        args.simulate = Some(5 * 60 * 60);
        args.step = 60;
        let now = Timestamp::from_millis(1_749_531_600_000);
        let report = evaluate_window(&args, &clock(), "en", now);
        assert_eq!(report.result.phase, marquee_core::Phase::Today);
        assert_eq!(report.utc_offset_minutes, 540);
        assert!(report.start_ms.is_some());
        let timeline = report.timeline.unwrap();
        assert_eq!(timeline.timer_starts, 1);
        assert_eq!(timeline.timers_left_running, 0);
    }

    #[test]
    fn oversized_step_is_not_shrunk() {
        let mut args = base_args();
        args.start = Some("2025-06-10T18:00:00+09:00".to_string());
        args.end = Some("2025-06-11T18:00:00+09:00".to_string());
        args.simulate = Some(60 * 60);
        args.step = u64::MAX;
        let now = Timestamp::from_millis(1_749_531_600_000);
        let timeline = evaluate_window(&args, &clock(), "en", now).timeline.unwrap();
        assert_eq!(timeline.steps, 1);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let path = PathBuf::from("/nonexistent/marquee-countdown.json");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }
}

use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "marquee-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let content = std::fs::read_to_string(path).expect("read output");
    serde_json::from_str(&content).expect("valid json")
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_marquee-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("midnight"));
    assert!(content.contains("lifecycle"));
}

#[test]
fn cli_runs_every_scenario_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_marquee-tester");
    let output_path = temp_path("scenarios");
    let status = Command::new(exe)
        .args([
            "--scenarios",
            "all",
            "--now",
            "2025-06-10T14:00:00+09:00",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let value = read_json(&output_path);
    let results = value.as_array().expect("array of results");
    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_rejects_unknown_scenario() {
    let exe = env!("CARGO_BIN_EXE_marquee-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "no-such-scenario", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no-such-scenario"));
}

#[test]
fn cli_evaluates_an_empty_window_as_scheduled() {
    let exe = env!("CARGO_BIN_EXE_marquee-tester");
    let output_path = temp_path("empty");
    let status = Command::new(exe)
        .args([
            "--start",
            "",
            "--end",
            "",
            "--now",
            "2025-06-10T14:00:00+09:00",
            "--locale",
            "en",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let value = read_json(&output_path);
    assert_eq!(value["result"]["phase"], "BEFORE");
    assert_eq!(value["result"]["disabled"], true);
    assert_eq!(value["result"]["buttonLabel"], "Scheduled");
    assert!(value["start_ms"].is_null());
}

#[test]
fn cli_simulates_a_sale_through_every_phase() {
    let exe = env!("CARGO_BIN_EXE_marquee-tester");
    let output_path = temp_path("simulate");
    let status = Command::new(exe)
        .args([
            "--start",
            "2025-06-11T14:00:00+09:00",
            "--end",
            "2025-06-12T00:00:00+09:00",
            "--now",
            "2025-06-10T14:00:00+09:00",
            "--simulate",
            "172800",
            "--step",
            "60",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let value = read_json(&output_path);
    assert_eq!(value["result"]["phase"], "D_MINUS_1");
    let timeline = &value["timeline"];
    assert_eq!(timeline["timer_starts"], 1);
    assert_eq!(timeline["timers_left_running"], 0);
    let phases: Vec<&str> = timeline["entries"]
        .as_array()
        .expect("entries")
        .iter()
        .filter_map(|e| e["phase"].as_str())
        .collect();
    assert!(phases.contains(&"OPEN"));
    assert_eq!(phases.last(), Some(&"ENDED"));
}

#[test]
fn cli_rejects_a_malformed_config() {
    let exe = env!("CARGO_BIN_EXE_marquee-tester");
    let config_path = temp_path("config");
    std::fs::write(&config_path, r#"{"tick_ms": 0}"#).expect("write config");
    let output = Command::new(exe)
        .args(["--report", "json", "--config"])
        .arg(&config_path)
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"));
}

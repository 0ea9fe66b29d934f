//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::io::Write;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "fuelday-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_targets_estimate() {
    let (stdout, _, code) = run_cli(&[
        "targets", "estimate", "--weight", "60", "--height", "160", "--age", "19", "--sex",
        "female",
    ]);
    assert_eq!(code, 0);

    let targets: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(targets["kcal"], 1800.0);
    assert_eq!(targets["water_ml"], 2100);
}

#[test]
fn test_targets_estimate_rejects_unknown_sex() {
    let (_, stderr, code) = run_cli(&[
        "targets", "estimate", "--weight", "60", "--height", "160", "--age", "19", "--sex",
        "robot",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("sex"));
}

#[test]
fn test_sessions_template() {
    let (stdout, _, code) = run_cli(&[
        "sessions",
        "template",
        "--date",
        "2025-03-10",
        "--day-type",
        "tournament",
    ]);
    assert_eq!(code, 0);

    let sessions: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(sessions.as_array().unwrap().len(), 2);
}

#[test]
fn test_plan_generate_and_swap() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    let mut file = std::fs::File::create(&request_path).unwrap();
    write!(
        file,
        r#"{{
            "profile": {{
                "weight_kg": 60.0, "height_cm": 160.0, "age": 19,
                "sex": "female", "activity_level": "normal", "goal": "maintain"
            }},
            "day_type": "classes",
            "wake": "2025-03-10T07:00:00Z",
            "bed": "2025-03-10T23:00:00Z",
            "sessions": [{{
                "label": "Practice",
                "start": "2025-03-10T18:00:00Z",
                "end": "2025-03-10T20:00:00Z",
                "session_type": "skill",
                "intensity": "hard"
            }}]
        }}"#
    )
    .unwrap();

    let request = request_path.to_str().unwrap();
    let (stdout, _, code) = run_cli(&[
        "plan",
        "generate",
        request,
        "--foods",
        "../../data/foods.json",
        "--templates",
        "../../data/templates.json",
        "--seed",
        "7",
    ]);
    assert_eq!(code, 0);

    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let meals = plan["meals"].as_array().unwrap();
    assert!(meals.iter().any(|m| m["purpose"] == "breakfast"));
    assert!(meals.iter().any(|m| m["purpose"] == "pre-event"));

    // Swap the dinner slot, excluding whatever template it used.
    let dinner = meals.iter().find(|m| m["purpose"] == "dinner").unwrap();
    let time = dinner["time"].as_str().unwrap();
    let excluded = dinner["template"].as_str().unwrap();

    let (stdout, _, code) = run_cli(&[
        "plan",
        "swap",
        request,
        "--purpose",
        "dinner",
        "--time",
        time,
        "--exclude",
        excluded,
        "--foods",
        "../../data/foods.json",
        "--templates",
        "../../data/templates.json",
        "--seed",
        "7",
    ]);
    assert_eq!(code, 0);

    let swapped: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let new_dinner = swapped["meals"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["purpose"] == "dinner")
        .unwrap();
    assert_ne!(new_dinner["template"].as_str().unwrap(), excluded);
}

#[test]
fn test_plan_generate_rejects_invalid_session() {
    let dir = tempfile::tempdir().unwrap();
    let request_path = dir.path().join("request.json");
    let mut file = std::fs::File::create(&request_path).unwrap();
    write!(
        file,
        r#"{{
            "profile": {{
                "weight_kg": 60.0, "height_cm": 160.0, "age": 19,
                "sex": "female", "activity_level": "normal", "goal": "maintain"
            }},
            "day_type": "rest",
            "wake": "2025-03-10T07:00:00Z",
            "bed": "2025-03-10T23:00:00Z",
            "sessions": [{{
                "label": "Backwards",
                "start": "2025-03-10T20:00:00Z",
                "end": "2025-03-10T18:00:00Z",
                "session_type": "skill",
                "intensity": "hard"
            }}]
        }}"#
    )
    .unwrap();

    let (_, stderr, code) = run_cli(&[
        "plan",
        "generate",
        request_path.to_str().unwrap(),
        "--foods",
        "../../data/foods.json",
        "--templates",
        "../../data/templates.json",
    ]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Backwards"));
}

#[test]
fn test_catalog_foods_listing() {
    let (stdout, _, code) = run_cli(&["catalog", "foods", "--path", "../../data/foods.json"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("foods"));
    assert!(stdout.contains("Oats"));
}

//! CLI tests for the `tp` binary
//!
//! Every case here stays off the network: either no HTTP is needed or the
//! relevant credential is missing and the call short-circuits.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `tp` running in a scratch directory with its own config and log location
fn tp(dir: &TempDir) -> Command {
    let config = dir.path().join("tripplanner.yml");
    std::fs::write(&config, "search:\n  adults: 2\n").expect("Failed to write config");

    let mut cmd = Command::cargo_bin("tp").expect("tp binary should be built");
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_DATA_HOME", dir.path().join("data"))
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("GEMINI_API_KEY")
        .env_remove("FLIGHT_API_KEY")
        .env_remove("HOTEL_API_KEY")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config);
    cmd
}

#[test]
fn test_help_lists_commands_and_credentials() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("GEMINI_API_KEY"))
        .stdout(predicate::str::contains("Logs are written to:"));
}

#[test]
fn test_tools_lists_all_three() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("find_activities"))
        .stdout(predicate::str::contains("search_flights"))
        .stdout(predicate::str::contains("search_hotels"))
        .stdout(predicate::str::contains("num_nights"));
}

#[test]
fn test_tool_activities_known_category() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .args(["tool", "activities", "Goa", "Beaches"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found activities: Baga Beach, Calangute Beach, Anjuna Beach.",
        ));
}

#[test]
fn test_tool_activities_unknown_category_is_not_a_failure() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .args(["tool", "activities", "Goa", "museums"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No activities found for that category."));
}

#[test]
fn test_tool_flights_rejects_relative_date() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .args(["tool", "flights", "Mumbai", "Goa", "next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not understand the date."));
}

#[test]
fn test_tool_hotels_without_key_reports_the_variable() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .args(["tool", "hotels", "Goa", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("An error occurred while calling the hotel API"))
        .stderr(predicate::str::contains("HOTEL_API_KEY"));
}

#[test]
fn test_plan_without_llm_key_fails() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .args(["plan", "A week in Goa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY not found"));
}

#[test]
fn test_plan_with_blank_request_asks_for_input() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir)
        .args(["plan", "  "])
        .assert()
        .success()
        .stderr(predicate::str::contains("Please enter your travel plans first."));
}

#[test]
fn test_log_file_is_written_under_data_dir() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    tp(&dir).arg("tools").assert().success();
    assert!(dir.path().join("data/tripplanner/logs/tripplanner.log").exists());
}

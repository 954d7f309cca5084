use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../data")
}

fn run_cli_in(data: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_build-planner"))
        .arg("--data")
        .arg(data)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run build-planner")
}

fn run_cli(args: &[&str]) -> Output {
    run_cli_in(&data_dir(), args)
}

fn json_report(output: &Output) -> Value {
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn cli_prints_json_sheet_and_query() {
    let output = run_cli(&["--skill", "0,1", "--combat", "9", "--json"]);
    let report = json_report(&output);

    assert_eq!(report["query"], "skills=3&combat=512");
    assert_eq!(report["sheet"]["health"], 120.0);
    assert_eq!(report["sheet"]["archetype"], "burglar");
    assert_eq!(report["sheet"]["combat_points"]["spent"], 1);
    assert!(report["rejections"].as_array().unwrap().is_empty());
}

#[test]
fn cli_reports_rejections_and_keeps_going() {
    let output = run_cli(&["--skill", "5,0"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rejected: select skill 5"), "stderr: {}", stderr);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Class: Burglar"));
    assert!(stdout.lines().any(|line| line == "Share: ?skills=1"));
}

#[test]
fn cli_warns_without_core_skill() {
    let output = run_cli(&["--combat", "9"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("You need to select at least one core skill!"));
    assert!(stdout.contains("Class: Freelancer"));
}

#[test]
fn cli_starts_from_query() {
    let output = run_cli(&["--query", "?skills=3&combat=512", "--combat", "8", "--json"]);
    let report = json_report(&output);
    assert_eq!(report["query"], "skills=3&combat=768");
}

#[test]
fn cli_fills_inventory() {
    let output = run_cli(&["--bag-item", "13", "--json"]);
    let report = json_report(&output);
    assert_eq!(report["rejections"][0], "bag item 13: no bag equipped");
    assert_eq!(report["query"], "");

    let output = run_cli(&["--bag", "satchel", "--held", "4", "--bag-item", "13", "--json"]);
    let report = json_report(&output);
    assert_eq!(report["query"], "helditems=16&bag=satchel&bagitems=8192");
    assert_eq!(report["sheet"]["bag"], "satchel");
    assert_eq!(report["sheet"]["bag_space_used"], 1);
    assert_eq!(report["sheet"]["weapons"], 1);
}

#[test]
fn cli_rejects_unknown_bag() {
    let output = run_cli(&["--bag", "suitcase"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown bag 'suitcase'"), "stderr: {}", stderr);
}

#[test]
fn cli_fails_on_missing_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli_in(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn cli_loads_effect_overrides() {
    let dir = tempfile::tempdir().unwrap();
    for file in ["skills.json", "combatskills.json", "items.json", "rules.toml"] {
        fs::copy(data_dir().join(file), dir.path().join(file)).unwrap();
    }
    fs::write(
        dir.path().join("effects.toml"),
        "[[combat_effects]]\ngroup = \"vit\"\nstat = \"max_health\"\nvalue = 50.0\n",
    )
    .unwrap();

    let output = run_cli_in(dir.path(), &["--combat", "9", "--json"]);
    let report = json_report(&output);
    assert_eq!(report["sheet"]["health"], 150.0);
}

use sequence_cli::run;
use serial_test::serial;
use std::path::Path;

fn run_args(args: &[&str]) -> (i32, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

fn sim_to(path: &Path, matches: &str, seed: &str) {
    let p = path.to_string_lossy();
    let (code, out, err) = run_args(&[
        "sequence",
        "sim",
        "--matches",
        matches,
        "--seed",
        seed,
        "--output",
        &p,
    ]);
    assert_eq!(code, 0, "sim failed: {}", err);
    assert!(out.contains(&format!("Matches: {}", matches)));
}

#[test]
fn version_and_help_exit_zero() {
    let (code, out, _) = run_args(&["sequence", "--version"]);
    assert_eq!(code, 0);
    assert!(out.contains("sequence"));
    let (code, out, _) = run_args(&["sequence", "verify", "--help"]);
    assert_eq!(code, 0);
    assert!(out.contains("--input"));
}

#[test]
fn unknown_subcommand_prints_usage() {
    let (code, out, err) = run_args(&["sequence", "bet"]);
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("Usage: sequence <command>"));
}

#[test]
#[serial]
fn deal_is_deterministic_and_complete() {
    let (code, first, _) = run_args(&["sequence", "deal", "--seed", "99"]);
    assert_eq!(code, 0);
    let (_, second, _) = run_args(&["sequence", "deal", "--seed", "99"]);
    assert_eq!(first, second);
    assert!(first.starts_with("Seed: 99\n"));
    assert_eq!(first.lines().count(), 15);
    assert_eq!(first.lines().filter(|l| l.starts_with("Hand ")).count(), 2);
}

#[test]
#[serial]
fn deal_with_duplicate_ids_fails() {
    let (code, _, err) = run_args(&[
        "sequence",
        "deal",
        "--local-id",
        "4",
        "--remote-id",
        "4",
    ]);
    assert_eq!(code, 2);
    assert!(err.contains("Error:"));
}

#[test]
#[serial]
fn sim_then_verify_then_replay() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matches.jsonl");
    sim_to(&path, "3", "500");

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);

    let p = path.to_string_lossy();
    let (code, out, err) = run_args(&["sequence", "verify", "--input", &p]);
    assert_eq!(code, 0, "verify failed: {}", err);
    assert!(out.contains("Verify: OK (3 matches)"));

    let (code, out, err) = run_args(&["sequence", "replay", "--input", &p]);
    assert_eq!(code, 0, "replay failed: {}", err);
    assert_eq!(out.matches("Result: ").count(), 3);
    assert!(out.contains("(seed 500)"));
}

#[test]
#[serial]
fn compressed_transcripts_round_trip_through_verify() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matches.jsonl.zst");
    sim_to(&path, "2", "8");

    let raw = std::fs::read(&path).unwrap();
    assert!(serde_json::from_slice::<serde_json::Value>(&raw).is_err());

    let p = path.to_string_lossy();
    let (code, out, _) = run_args(&["sequence", "verify", "--input", &p]);
    assert_eq!(code, 0);
    assert!(out.contains("Verify: OK (2 matches)"));
}

#[test]
#[serial]
fn verify_detects_a_tampered_seed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matches.jsonl");
    sim_to(&path, "1", "77");

    let content = std::fs::read_to_string(&path).unwrap();
    let mut record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    record["seed"] = serde_json::json!(78);
    std::fs::write(&path, format!("{}\n", record)).unwrap();

    let p = path.to_string_lossy();
    let (code, out, err) = run_args(&["sequence", "verify", "--input", &p]);
    assert_eq!(code, 2);
    assert!(out.contains("Verify: FAILED"));
    assert!(err.contains("does not match the player ids"));
}

#[test]
#[serial]
fn verify_detects_an_illegal_move() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matches.jsonl");
    sim_to(&path, "1", "123");

    let content = std::fs::read_to_string(&path).unwrap();
    let mut record: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    record["moves"][0]["move"]["hand_index"] = serde_json::json!(40);
    std::fs::write(&path, format!("{}\n", record)).unwrap();

    let p = path.to_string_lossy();
    let (code, _, err) = run_args(&["sequence", "verify", "--input", &p]);
    assert_eq!(code, 2);
    assert!(err.contains("move 1:"));

    let (code, _, err) = run_args(&["sequence", "replay", "--input", &p]);
    assert_eq!(code, 2);
    assert!(err.contains("move 1:"));
}

#[test]
fn verify_reports_unparseable_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.jsonl");
    std::fs::write(&path, "{not json}\n").unwrap();
    let p = path.to_string_lossy();
    let (code, _, err) = run_args(&["sequence", "verify", "--input", &p]);
    assert_eq!(code, 2);
    assert!(err.contains("Invalid record"));
}

#[test]
fn replay_of_missing_file_fails() {
    let (code, _, err) = run_args(&["sequence", "replay", "--input", "/nonexistent/m.jsonl"]);
    assert_eq!(code, 2);
    assert!(err.contains("Failed to read"));
}

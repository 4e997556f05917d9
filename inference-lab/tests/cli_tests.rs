use assert_cmd::Command;
use inference_lab::charts::{COMPARISON_CHART, INTERVAL_CHART, POPULATION_CHART, SAMPLE_CHART};
use predicates::prelude::*;

fn lab() -> Command {
    let mut cmd = Command::cargo_bin("inference-lab").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("INFERENCE_LAB_LOG_LEVEL")
        .env_remove("INFERENCE_LAB_OUTPUT_DIR");
    cmd
}

#[test]
fn test_run_writes_report_and_charts() {
    let dir = tempfile::tempdir().unwrap();

    lab()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Paramètres réels de la population:"))
        .stdout(predicate::str::contains("Intervalle de confiance à 95%:"))
        .stdout(predicate::str::contains("P-value: "))
        .stdout(predicate::str::contains("Conclusion: "));

    for name in [POPULATION_CHART, SAMPLE_CHART, INTERVAL_CHART, COMPARISON_CHART] {
        assert!(dir.path().join(name).exists(), "missing {name}");
    }
}

#[test]
fn test_runs_are_identical() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let out1 = lab().current_dir(first.path()).output().unwrap();
    let out2 = lab().current_dir(second.path()).output().unwrap();

    assert!(out1.status.success());
    assert_eq!(out1.stdout, out2.stdout);

    let chart1 = std::fs::read(first.path().join(POPULATION_CHART)).unwrap();
    let chart2 = std::fs::read(second.path().join(POPULATION_CHART)).unwrap();
    assert_eq!(chart1, chart2);
}

#[test]
fn test_unwritable_output_dir_fails() {
    let dir = tempfile::tempdir().unwrap();

    lab()
        .current_dir(dir.path())
        .env("INFERENCE_LAB_OUTPUT_DIR", dir.path().join("missing"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

use assert_cmd::Command;

#[test]
fn cli_help_smoke() {
    let mut cmd = Command::cargo_bin("kira-roiqc").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn run_help_lists_threads() {
    let mut cmd = Command::cargo_bin("kira-roiqc").unwrap();
    let out = cmd.arg("run").arg("--help").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("--threads"));
    assert!(text.contains("--timeseries"));
    assert!(text.contains("--confounds"));
}

use std::process::Command;

#[test]
fn test_cli_help_command() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wikitool"));
    assert!(stdout.contains("attach"));
    assert!(stdout.contains("detach"));
    assert!(stdout.contains("download"));
}

#[test]
fn test_attach_requires_files() {
    let output = Command::new("cargo")
        .args(["run", "--", "attach", "https://redmine.example.com/projects/p/wiki/Page"])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FILES") || stderr.contains("required"));
}

use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_multy"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute multy");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("game windows"));
    assert!(stdout.contains("monitor"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_multy"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute multy");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("multy"));
}

#[test]
fn unknown_subcommand_fails() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_multy"));
    cmd.arg("tile");

    // Act
    let output = cmd.output().expect("failed to execute multy");

    // Assert
    assert!(!output.status.success());
}

#[test]
fn hotkey_register_rejects_unknown_modifier() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_multy"));
    cmd.args(["hotkey", "register", "F1", "Dofus", "--modifier", "hyper"]);

    // Act
    let output = cmd.output().expect("failed to execute multy");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("hyper"));
}

#[test]
fn daemon_subcommand_is_hidden() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_multy"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute multy");

    // Assert
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout
            .lines()
            .any(|line| line.trim_start().starts_with("daemon"))
    );
}

use super::*;

#[test]
fn default_config_has_expected_values() {
    // Arrange / Act
    let config = Config::default();

    // Assert
    assert_eq!(config.monitor.keyword, "Dofus");
    assert_eq!(config.click.keyword, "Dofus");
    assert_eq!(config.click.settle_ms, 50);
    assert!(config.logging.enabled);
    assert!(!config.gate.enabled);
    assert!(config.hotkeys.is_empty());
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[click]\nsettle_ms = 120\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(config.click.settle_ms, 120);
    assert_eq!(config.click.press_ms, 15);
    assert_eq!(config.monitor, MonitorConfig::default());
}

#[test]
fn hotkey_tables_are_read() {
    // Arrange
    let toml_str = r#"
[[hotkey]]
key = "F1"
modifiers = ["ctrl", "alt"]
window = "Dofus - Ana"

[[hotkey]]
key = "F2"
window = "Dofus - Bob"
"#;

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(config.hotkeys.len(), 2);
    assert_eq!(
        config.hotkeys[0].modifiers,
        [Modifier::Ctrl, Modifier::Alt]
    );
    assert!(config.hotkeys[1].modifiers.is_empty());
}

#[test]
fn validate_clamps_extreme_values() {
    // Arrange
    let mut config = Config {
        click: ClickConfig {
            settle_ms: 60_000,
            press_ms: 9_999,
            ..Default::default()
        },
        logging: LogConfig {
            max_file_mb: 0,
            ..Default::default()
        },
        ..Default::default()
    };

    // Act
    config.validate();

    // Assert
    assert_eq!(config.click.settle_ms, 1000);
    assert_eq!(config.click.press_ms, 500);
    assert_eq!(config.logging.max_file_mb, 1);
}

#[test]
fn validate_restores_empty_keywords() {
    // Arrange
    let mut config = Config {
        monitor: MonitorConfig {
            keyword: "  ".into(),
            autostart: true,
        },
        ..Default::default()
    };

    // Act
    config.validate();

    // Assert
    assert_eq!(config.monitor.keyword, DEFAULT_KEYWORD);
    assert!(config.monitor.autostart);
}

#[test]
fn gate_table_is_read() {
    // Arrange
    let toml_str = "[gate]\nenabled = true\nkeyword = \"Retro\"\n";

    // Act
    let mut config: Config = toml::from_str(toml_str).unwrap();
    config.validate();

    // Assert
    assert!(config.gate.enabled);
    assert_eq!(config.gate.keyword, "Retro");
}

#[test]
fn validate_drops_unusable_hotkeys() {
    // Arrange
    let mut config = Config {
        hotkeys: vec![
            HotkeyBinding::new("F1", vec![], "Dofus"),
            HotkeyBinding::new("Hyper", vec![], "Dofus"),
            HotkeyBinding::new("F2", vec![], ""),
        ],
        ..Default::default()
    };

    // Act
    config.validate();

    // Assert
    assert_eq!(config.hotkeys, [HotkeyBinding::new("F1", vec![], "Dofus")]);
}

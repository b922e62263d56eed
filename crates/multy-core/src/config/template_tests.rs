use super::*;
use crate::config::Config;

#[test]
fn config_template_parses_as_valid_config() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let result: Result<Config, _> = toml::from_str(&toml_str);

    // Assert
    assert!(
        result.is_ok(),
        "config template is not valid TOML: {result:?}"
    );
}

#[test]
fn config_template_matches_default_values() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let mut config: Config = toml::from_str(&toml_str).unwrap();
    config.validate();

    // Assert
    let mut defaults = Config::default();
    defaults.validate();
    assert_eq!(config, defaults);
}

#[test]
fn commented_hotkey_example_is_valid_when_uncommented() {
    // Arrange
    let example: String = generate_config()
        .lines()
        .skip_while(|line| !line.starts_with("# [[hotkey]]"))
        .map(|line| line.trim_start_matches("# "))
        .collect::<Vec<_>>()
        .join("\n");

    // Act
    let mut config: Config = toml::from_str(&example).unwrap();
    config.validate();

    // Assert
    assert_eq!(config.hotkeys.len(), 1);
    assert_eq!(config.hotkeys[0].window, "Dofus - MyCharacter");
}

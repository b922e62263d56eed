use std::io;
use std::path::PathBuf;

use super::Config;

/// Why `config.toml` could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the home directory")]
    NoHome,

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    fn is_missing_file(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Returns the config directory: `~/.config/multy/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("multy"))
}

/// Returns the config file path: `~/.config/multy/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Reads and parses `config.toml`, then clamps it with
/// [`Config::validate`].
pub fn try_load() -> Result<Config, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoHome)?;
    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let mut config = parse(&content).map_err(|source| ConfigError::Parse { path, source })?;
    config.validate();
    Ok(config)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; other errors are reported
/// on stderr and also yield defaults.
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

pub(super) fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

fn load_or_default<T>(
    try_load: impl FnOnce() -> Result<T, ConfigError>,
    default: impl Fn() -> T,
) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if e.is_missing_file() => default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_silently() {
        // Arrange
        let missing = || {
            Err::<u32, _>(ConfigError::Io {
                path: PathBuf::from("config.toml"),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
        };

        // Act
        let value = load_or_default(missing, || 7);

        // Assert
        assert_eq!(value, 7);
    }

    #[test]
    fn parse_error_falls_back_to_default() {
        // Arrange
        let broken = || {
            let source = parse("[click\nkeyword = 1").unwrap_err();
            Err::<Config, _>(ConfigError::Parse {
                path: PathBuf::from("config.toml"),
                source,
            })
        };

        // Act
        let config = load_or_default(broken, Config::default);

        // Assert
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_path_ends_with_multy_config() {
        // Act
        let Some(path) = config_path() else {
            return;
        };

        // Assert
        assert!(path.ends_with(".config/multy/config.toml"));
    }
}

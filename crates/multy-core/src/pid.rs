use std::fs;
use std::io;
use std::path::PathBuf;

/// Failure to read or write the daemon PID file.
#[derive(Debug, thiserror::Error)]
pub enum PidError {
    #[error("could not determine the local data directory")]
    NoDataDir,

    #[error("PID file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid PID file contents: {contents:?}")]
    Invalid { contents: String },
}

/// Returns the data directory (`%LOCALAPPDATA%\multy` on Windows),
/// creating it if needed.
fn data_dir() -> Result<PathBuf, PidError> {
    let dir = dirs::data_local_dir()
        .ok_or(PidError::NoDataDir)?
        .join("multy");
    fs::create_dir_all(&dir).map_err(|source| PidError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Returns the path to the PID file.
pub fn pid_path() -> Result<PathBuf, PidError> {
    Ok(data_dir()?.join("multy.pid"))
}

/// Records the current process as the running daemon.
///
/// Lets the CLI detect a daemon whose pipe does not answer and kill it.
pub fn write_pid_file() -> Result<(), PidError> {
    let path = pid_path()?;
    fs::write(&path, std::process::id().to_string()).map_err(|source| PidError::Io { path, source })
}

/// Reads the PID from the PID file, if it exists.
pub fn read_pid_file() -> Result<Option<u32>, PidError> {
    let path = pid_path()?;
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(PidError::Io { path, source }),
    };
    parse_pid(&contents).map(Some)
}

/// Removes the PID file. A missing file is not an error.
pub fn remove_pid_file() -> Result<(), PidError> {
    let path = pid_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PidError::Io { path, source }),
    }
}

fn parse_pid(contents: &str) -> Result<u32, PidError> {
    contents.trim().parse().map_err(|_| PidError::Invalid {
        contents: contents.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_with_trailing_newline_parses() {
        // Assert
        assert_eq!(parse_pid("4242\n").unwrap(), 4242);
    }

    #[test]
    fn garbage_pid_is_rejected() {
        // Act
        let result = parse_pid("not-a-pid");

        // Assert
        assert!(matches!(result, Err(PidError::Invalid { .. })));
    }
}

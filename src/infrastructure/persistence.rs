use crate::domain::{Session, Settings};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default settings file, looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "boolterm.json";
/// Default session file offered by the save/load prompts.
pub const DEFAULT_SESSION_FILE: &str = "session.boolterm";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("Invalid file format - {0}")]
    Format(#[from] serde_json::Error),
}

pub struct FileRepository;

impl FileRepository {
    pub fn save_settings(settings: &Settings, filename: &str) -> Result<String, PersistenceError> {
        Self::write_json(settings, filename)
    }

    /// Loads settings, falling back to defaults when the file does not exist.
    pub fn load_settings(filename: &str) -> Result<Settings, PersistenceError> {
        if !Path::new(filename).exists() {
            tracing::debug!(filename, "no settings file, using defaults");
            return Ok(Settings::default());
        }
        Self::read_json(filename)
    }

    pub fn save_session(session: &Session, filename: &str) -> Result<String, PersistenceError> {
        Self::write_json(session, filename)
    }

    pub fn load_session(filename: &str) -> Result<(Session, String), PersistenceError> {
        let session = Self::read_json(filename)?;
        Ok((session, filename.to_string()))
    }

    fn write_json<T: Serialize>(value: &T, filename: &str) -> Result<String, PersistenceError> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(filename, json)?;
        tracing::debug!(filename, "saved");
        Ok(filename.to_string())
    }

    fn read_json<T: DeserializeOwned>(filename: &str) -> Result<T, PersistenceError> {
        let content = fs::read_to_string(filename)?;
        let value = serde_json::from_str(&content)?;
        tracing::debug!(filename, "loaded");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HistoryEntry, SymbolConfig};

    fn path_in(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let filename = path_in(&dir, "boolterm.json");
        let settings = Settings {
            symbols: SymbolConfig::new('1', '0').unwrap(),
            history_limit: 10,
        };

        assert_eq!(FileRepository::save_settings(&settings, &filename).unwrap(), filename);
        assert_eq!(FileRepository::load_settings(&filename).unwrap(), settings);
    }

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let filename = path_in(&dir, "absent.json");
        assert_eq!(FileRepository::load_settings(&filename).unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_symbols_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let filename = path_in(&dir, "bad.json");
        fs::write(&filename, r#"{"symbols":{"true":"&","false":"F"}}"#).unwrap();

        let err = FileRepository::load_settings(&filename).unwrap_err();
        assert!(matches!(err, PersistenceError::Format(_)));
        assert!(err.to_string().starts_with("Invalid file format"));
    }

    #[test]
    fn test_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let filename = path_in(&dir, "work.boolterm");
        let session = Session {
            settings: Settings::default(),
            history: vec![HistoryEntry {
                expression: "T|F".to_string(),
                postfix: "T F |".to_string(),
                result: true,
                symbols: SymbolConfig::default(),
            }],
        };

        FileRepository::save_session(&session, &filename).unwrap();
        let (loaded, name) = FileRepository::load_session(&filename).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(name, filename);
    }

    #[test]
    fn test_load_session_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileRepository::load_session(&path_in(&dir, "nope")).unwrap_err();
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}

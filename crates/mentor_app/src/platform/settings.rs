//! Optional RON settings file.
//!
//! ```ron
//! (
//!     base_url: Some("http://127.0.0.1:5000"),
//!     request_timeout_secs: None,
//!     log_destination: Some(File),
//! )
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use mentor_engine::BackendSettings;
use mentor_logging::mentor_info;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub const DEFAULT_SETTINGS_FILE: &str = "mentor.ron";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SettingsFile {
    base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_destination: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppSettings {
    pub backend: BackendSettings,
    pub log_destination: LogDestination,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("could not read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse settings in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Loads settings from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let file: SettingsFile = ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    mentor_info!("Loaded settings from {:?}", path);
    Ok(apply(file))
}

fn apply(file: SettingsFile) -> AppSettings {
    let mut settings = AppSettings::default();
    if let Some(base_url) = file.base_url {
        settings.backend.base_url = base_url.trim_end_matches('/').to_string();
    }
    settings.backend.request_timeout = file.request_timeout_secs.map(Duration::from_secs);
    if let Some(destination) = file.log_destination {
        settings.log_destination = destination;
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_engine::DEFAULT_BASE_URL;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load(&dir.path().join("absent.ron")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.backend.request_timeout, None);
        assert_eq!(settings.log_destination, LogDestination::File);
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mentor.ron");
        fs::write(
            &path,
            r#"(base_url: Some("http://mentor.local:8080/"), request_timeout_secs: Some(90))"#,
        )
        .unwrap();

        let settings = load(&path).unwrap();
        assert_eq!(settings.backend.base_url, "http://mentor.local:8080");
        assert_eq!(
            settings.backend.request_timeout,
            Some(Duration::from_secs(90))
        );
        assert_eq!(settings.log_destination, LogDestination::File);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mentor.ron");
        fs::write(&path, "(base_url: 12").unwrap();

        let err = load(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }
}

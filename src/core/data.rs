//! RON data file loading shared by every plugin.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// Load a RON file, falling back to `T::default()` on any error.
///
/// A missing or broken data file never stops the game; the problem is
/// logged and the compiled-in defaults are used instead.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &str) -> T {
    match load_ron(path) {
        Ok(value) => {
            info!("Loaded {}", path);
            value
        }
        Err(DataLoadError::FileNotFound(_)) => {
            warn!("Could not find {}. Using defaults.", path);
            T::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Default, Debug, PartialEq)]
    struct Sample {
        value: i32,
    }

    #[test]
    fn test_missing_file_is_reported() {
        let result = load_ron::<Sample>("assets/data/does_not_exist.ron");
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let sample: Sample = load_or_default("assets/data/does_not_exist.ron");
        assert_eq!(sample, Sample::default());
    }
}

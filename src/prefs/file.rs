use crate::{prefs::PreferenceStore, Result, TrackError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Preferences persisted as a JSON object in a single file
///
/// Every write rewrites the file through a temporary sibling and a rename,
/// so the file on disk is always either the old or the new document.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FilePreferences {
    /// Opens the store called `name` inside `dir` (`<dir>/<name>.json`)
    pub fn open_named(dir: impl AsRef<Path>, name: &str) -> Self {
        Self::open(dir.as_ref().join(format!("{}.json", name)))
    }

    /// Opens the store at `path`
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; the next write replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => values,
            Err(e) => {
                log::warn!("Ignoring unreadable preferences at {}: {}", path.display(), e);
                Map::new()
            }
        };

        Self { path, values }
    }

    fn read(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }

        let text = std::fs::read_to_string(path)?;
        match serde_json::from_str(&text)? {
            Value::Object(values) => Ok(values),
            other => Err(TrackError::Preferences(format!(
                "expected a JSON object, found {}",
                other
            ))),
        }
    }

    fn commit(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_string_pretty(&self.values)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferences {
    fn get_f32(&self, key: &str) -> Option<f32> {
        self.values.get(key)?.as_f64().map(|v| v as f32)
    }

    fn put_f32(&mut self, key: &str, value: f32) -> Result<()> {
        let number = serde_json::Number::from_f64(f64::from(value)).ok_or_else(|| {
            TrackError::Preferences(format!("{} cannot store non-finite value {}", key, value))
        })?;

        self.values.insert(key.to_string(), Value::Number(number));
        self.commit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{load_zoom_or_default, save_zoom};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let prefs = FilePreferences::open_named(temp.path(), "MapPrefs");

        assert_eq!(prefs.get_f32("zoom_level"), None);
        assert_eq!(load_zoom_or_default(&prefs), 15.0);
        assert!(!prefs.path().exists());
    }

    #[test]
    fn test_value_survives_reopen() {
        let temp = TempDir::new().unwrap();

        let mut prefs = FilePreferences::open_named(temp.path(), "MapPrefs");
        save_zoom(&mut prefs, 17.25);
        drop(prefs);

        let reopened = FilePreferences::open_named(temp.path(), "MapPrefs");
        assert_eq!(load_zoom_or_default(&reopened), 17.25);
        assert_eq!(
            reopened.path().file_name().unwrap().to_str(),
            Some("MapPrefs.json")
        );
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("MapPrefs.json");
        std::fs::write(&path, "not json").unwrap();

        let mut prefs = FilePreferences::open(&path);
        assert_eq!(load_zoom_or_default(&prefs), 15.0);

        // First write replaces the broken document
        prefs.put_f32("zoom_level", 12.0).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["zoom_level"].as_f64(), Some(12.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let temp = TempDir::new().unwrap();
        let mut prefs = FilePreferences::open_named(temp.path(), "MapPrefs");

        assert!(prefs.put_f32("zoom_level", f32::NAN).is_err());
        assert_eq!(prefs.get_f32("zoom_level"), None);
    }

    #[test]
    fn test_creates_missing_directories() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join("data");

        let mut prefs = FilePreferences::open_named(&dir, "MapPrefs");
        prefs.put_f32("zoom_level", 9.0).unwrap();

        assert!(dir.join("MapPrefs.json").exists());
    }
}

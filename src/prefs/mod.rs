//! Durable key-value preferences
//!
//! Writes are committed before `put_*` returns, so a read right after a
//! write always sees the new value.

pub mod file;
pub mod memory;

use crate::{
    core::constants::{DEFAULT_ZOOM, ZOOM_LEVEL_KEY},
    Result,
};

pub trait PreferenceStore {
    fn get_f32(&self, key: &str) -> Option<f32>;

    fn put_f32(&mut self, key: &str, value: f32) -> Result<()>;
}

/// Reads the persisted zoom, falling back to `default` when unset
pub fn load_zoom(store: &dyn PreferenceStore, default: f32) -> f32 {
    store.get_f32(ZOOM_LEVEL_KEY).unwrap_or(default)
}

/// Persists the zoom; failures are logged and swallowed
pub fn save_zoom(store: &mut dyn PreferenceStore, zoom: f32) {
    if let Err(e) = store.put_f32(ZOOM_LEVEL_KEY, zoom) {
        log::warn!("Failed to persist zoom level {}: {}", zoom, e);
    }
}

/// [`load_zoom`] with the stock default of 15
pub fn load_zoom_or_default(store: &dyn PreferenceStore) -> f32 {
    load_zoom(store, DEFAULT_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::memory::MemoryPreferences;

    #[test]
    fn test_missing_zoom_defaults_to_fifteen() {
        let store = MemoryPreferences::new();
        assert_eq!(load_zoom_or_default(&store), 15.0);
    }

    #[test]
    fn test_saved_zoom_reads_back_exactly() {
        let mut store = MemoryPreferences::new();
        for zoom in [2.0_f32, 13.5, 15.0, 16.0, 21.0] {
            save_zoom(&mut store, zoom);
            assert_eq!(load_zoom_or_default(&store), zoom);
        }
    }
}

use crate::{prefs::PreferenceStore, Result};
use fxhash::FxHashMap;

/// Preferences that live as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: FxHashMap<String, f32>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_f32(&self, key: &str) -> Option<f32> {
        self.values.get(key).copied()
    }

    fn put_f32(&mut self, key: &str, value: f32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

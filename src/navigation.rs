//! Launcher → map navigation

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Launcher,
    Map,
}

/// Tracks which screen is showing
///
/// The only edge is launcher → map. Nothing is passed along and nothing
/// comes back.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    current: Screen,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Opens the map screen; returns true when the screen actually changed
    pub fn open_map(&mut self) -> bool {
        let changed = self.current != Screen::Map;
        if changed {
            log::debug!("Navigating {:?} -> {:?}", self.current, Screen::Map);
        }
        self.current = Screen::Map;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_launcher() {
        assert_eq!(Navigator::new().current(), Screen::Launcher);
    }

    #[test]
    fn test_open_map() {
        let mut navigator = Navigator::new();
        assert!(navigator.open_map());
        assert_eq!(navigator.current(), Screen::Map);
        assert!(!navigator.open_map());
        assert_eq!(navigator.current(), Screen::Map);
    }
}

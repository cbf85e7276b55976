//! Light/dark theme resolution and toggling.
//!
//! Resolution order: an explicit choice persisted in client storage wins,
//! then the operating system preference, then light. Toggling flips the
//! effective theme and persists the result as an explicit choice; storage
//! failures (private browsing, disabled storage) are silently ignored — a
//! theme that does not stick is better than a broken toggle.

use thiserror::Error;

/// Storage key for the persisted choice.
pub const STORAGE_KEY: &str = "zr-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn flip(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// The `data-theme` attribute / storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything but the two known values counts as
    /// "no explicit choice".
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
#[error("preference storage unavailable")]
pub struct StoreUnavailable;

/// Client storage seam for the persisted theme choice.
pub trait PreferenceStore {
    /// The persisted explicit choice, if any (and if storage works).
    fn load(&self) -> Option<Theme>;
    fn save(&mut self, theme: Theme) -> Result<(), StoreUnavailable>;
}

/// Resolve the effective theme: explicit choice, else OS preference
/// (`None` when the media query is unsupported), else light.
pub fn effective_theme(store: &impl PreferenceStore, system_prefers_dark: Option<bool>) -> Theme {
    if let Some(choice) = store.load() {
        return choice;
    }
    match system_prefers_dark {
        Some(true) => Theme::Dark,
        _ => Theme::Light,
    }
}

/// Flip the current theme and persist the new choice. Persistence failures
/// are ignored.
pub fn toggle(store: &mut impl PreferenceStore, current: Theme) -> Theme {
    let next = current.flip();
    let _ = store.save(next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory store; `broken` simulates unavailable client storage.
    #[derive(Default)]
    struct MemoryStore {
        value: Option<Theme>,
        broken: bool,
    }

    impl PreferenceStore for MemoryStore {
        fn load(&self) -> Option<Theme> {
            if self.broken { None } else { self.value }
        }
        fn save(&mut self, theme: Theme) -> Result<(), StoreUnavailable> {
            if self.broken {
                return Err(StoreUnavailable);
            }
            self.value = Some(theme);
            Ok(())
        }
    }

    #[test]
    fn explicit_choice_wins_over_system() {
        let store = MemoryStore {
            value: Some(Theme::Light),
            broken: false,
        };
        assert_eq!(effective_theme(&store, Some(true)), Theme::Light);
    }

    #[test]
    fn system_preference_when_no_choice() {
        let store = MemoryStore::default();
        assert_eq!(effective_theme(&store, Some(true)), Theme::Dark);
        assert_eq!(effective_theme(&store, Some(false)), Theme::Light);
    }

    #[test]
    fn defaults_to_light() {
        let store = MemoryStore::default();
        assert_eq!(effective_theme(&store, None), Theme::Light);
    }

    #[test]
    fn toggle_flips_and_persists() {
        let mut store = MemoryStore::default();
        let next = toggle(&mut store, Theme::Light);
        assert_eq!(next, Theme::Dark);
        assert_eq!(store.value, Some(Theme::Dark));
        assert_eq!(effective_theme(&store, Some(false)), Theme::Dark);
    }

    #[test]
    fn toggle_survives_broken_storage() {
        let mut store = MemoryStore {
            value: None,
            broken: true,
        };
        // Still flips for the current page view, even if nothing persists.
        assert_eq!(toggle(&mut store, Theme::Dark), Theme::Light);
        assert_eq!(effective_theme(&store, None), Theme::Light);
    }

    #[test]
    fn stored_values_round_trip_through_strings() {
        assert_eq!(Theme::parse(Theme::Dark.as_str()), Some(Theme::Dark));
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::parse(""), None);
    }
}

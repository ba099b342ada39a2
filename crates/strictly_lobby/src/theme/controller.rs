//! Theme controller - resolves the effective theme from the stored override
//! and the OS preference.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, info, instrument, warn};

use super::store::{PreferenceError, PreferenceStore};

/// Preference key holding the user's theme override.
pub const THEME_KEY: &str = "theme";

/// Visual theme.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light text on dark background.
    Dark,
    /// Dark text on light background.
    Light,
}

impl Theme {
    /// The other theme.
    #[instrument]
    pub fn opposite(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Reads a stored override.
    ///
    /// Empty means no override. Anything other than `dark` is light, so a
    /// corrupted value never fails.
    #[instrument]
    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "" => None,
            "dark" => Some(Self::Dark),
            _ => Some(Self::Light),
        }
    }

    /// Presentation class for this theme.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Dark => "theme-dark",
            Self::Light => "theme-light",
        }
    }
}

/// The two mutually exclusive theme classes on the root of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeClasses {
    /// `theme-dark` is active.
    pub dark: bool,
    /// `theme-light` is active.
    pub light: bool,
}

impl ThemeClasses {
    /// Classes for `theme`: exactly one is active.
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            dark: theme == Theme::Dark,
            light: theme != Theme::Dark,
        }
    }

    /// Returns true when `class` is active.
    pub fn contains(&self, class: &str) -> bool {
        match class {
            "theme-dark" => self.dark,
            "theme-light" => self.light,
            _ => false,
        }
    }
}

/// Keeps the applied theme in step with the user override and OS preference.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    os_preference: Theme,
    classes: ThemeClasses,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Applies the stored override if there is one, else the OS preference.
    #[instrument(skip(store))]
    pub fn new(store: S, os_preference: Theme) -> Self {
        let mut controller = Self {
            store,
            os_preference,
            classes: ThemeClasses::for_theme(os_preference),
        };
        let effective = controller.effective_theme();
        info!(theme = %effective, "Initial theme");
        controller.apply(effective);
        controller
    }

    /// Stored override, if any. Unreadable storage counts as none.
    #[instrument(skip(self))]
    pub fn stored_override(&self) -> Option<Theme> {
        match self.store.get(THEME_KEY) {
            Ok(value) => value.as_deref().and_then(Theme::from_stored),
            Err(e) => {
                warn!(error = %e, "Could not read theme preference");
                None
            }
        }
    }

    /// Override if set, else the OS preference.
    pub fn effective_theme(&self) -> Theme {
        self.stored_override().unwrap_or(self.os_preference)
    }

    /// Theme currently applied, read from the active class.
    pub fn applied(&self) -> Theme {
        if self.classes.dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Active presentation classes.
    pub fn classes(&self) -> ThemeClasses {
        self.classes
    }

    /// Last known OS preference.
    pub fn os_preference(&self) -> Theme {
        self.os_preference
    }

    /// The preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Activates `theme`'s class and deactivates the other one.
    #[instrument(skip(self))]
    pub fn apply(&mut self, theme: Theme) {
        debug!(class = theme.class_name(), "Applying theme");
        self.classes = ThemeClasses::for_theme(theme);
    }

    /// User choice: applies `theme` now, then stores it as an override
    /// unless it matches the OS preference, in which case the override is
    /// cleared so OS changes are followed again.
    #[instrument(skip(self))]
    pub fn select(&mut self, theme: Theme) -> Result<(), PreferenceError> {
        self.apply(theme);
        if theme == self.os_preference {
            info!(theme = %theme, "Selected theme matches OS preference, clearing override");
            self.store.remove(THEME_KEY)
        } else {
            info!(theme = %theme, "Remembering theme override");
            self.store.set(THEME_KEY, &theme.to_string())
        }
    }

    /// Switches to the opposite of the applied theme.
    #[instrument(skip(self))]
    pub fn toggle(&mut self) -> Result<Theme, PreferenceError> {
        let theme = self.applied().opposite();
        self.select(theme)?;
        Ok(theme)
    }

    /// Records a probed OS preference. When it changed and no override is
    /// stored, the new preference is applied.
    #[instrument(skip(self))]
    pub fn observe_os_preference(&mut self, os_preference: Theme) {
        if os_preference == self.os_preference {
            return;
        }
        info!(from = %self.os_preference, to = %os_preference, "OS theme preference changed");
        self.os_preference = os_preference;
        if self.stored_override().is_none() {
            self.apply(os_preference);
        } else {
            debug!("Theme override stored, ignoring OS change");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_fail_open_to_light() {
        assert_eq!(Theme::from_stored("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_stored("light"), Some(Theme::Light));
        assert_eq!(Theme::from_stored("DARK"), Some(Theme::Light));
        assert_eq!(Theme::from_stored("{garbage"), Some(Theme::Light));
        assert_eq!(Theme::from_stored(""), None);
    }

    #[test]
    fn exactly_one_class_is_active() {
        for theme in [Theme::Dark, Theme::Light] {
            let classes = ThemeClasses::for_theme(theme);
            assert_ne!(classes.dark, classes.light);
            assert!(classes.contains(theme.class_name()));
            assert!(!classes.contains(theme.opposite().class_name()));
        }
    }
}

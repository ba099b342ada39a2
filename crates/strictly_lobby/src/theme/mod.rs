//! Light/dark theme selection with a persisted user override.

mod controller;
mod probe;
mod store;

pub use controller::{THEME_KEY, Theme, ThemeClasses, ThemeController};
pub use probe::{EnvThemeProbe, FixedThemeProbe, OsThemeProbe};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};

//! Sources of the operating system's colour-scheme preference.

use tracing::{debug, instrument};

use super::Theme;

/// Reports the OS (or terminal) preferred theme.
///
/// Probed repeatedly; a different answer than last time is a preference
/// change.
pub trait OsThemeProbe: Send {
    /// Current preferred theme.
    fn probe(&self) -> Theme;
}

impl<T: OsThemeProbe + ?Sized> OsThemeProbe for Box<T> {
    fn probe(&self) -> Theme {
        (**self).probe()
    }
}

/// Reads the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background indices 0–6 and 8 are dark colours. Anything unreadable
/// falls back to dark.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvThemeProbe;

impl EnvThemeProbe {
    /// Interprets a `COLORFGBG` value.
    #[instrument]
    pub fn parse(value: &str) -> Theme {
        let background = value
            .rsplit(';')
            .next()
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(0..=6 | 8) | None => Theme::Dark,
            Some(_) => Theme::Light,
        }
    }
}

impl OsThemeProbe for EnvThemeProbe {
    fn probe(&self) -> Theme {
        match std::env::var("COLORFGBG") {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                debug!("COLORFGBG not set, assuming dark background");
                Theme::Dark
            }
        }
    }
}

/// Always reports the same theme.
#[derive(Debug, Clone, Copy)]
pub struct FixedThemeProbe(pub Theme);

impl OsThemeProbe for FixedThemeProbe {
    fn probe(&self) -> Theme {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorfgbg_background_index() {
        assert_eq!(EnvThemeProbe::parse("15;0"), Theme::Dark);
        assert_eq!(EnvThemeProbe::parse("0;15"), Theme::Light);
        assert_eq!(EnvThemeProbe::parse("12;8"), Theme::Dark);
        assert_eq!(EnvThemeProbe::parse("0;default;7"), Theme::Light);
        assert_eq!(EnvThemeProbe::parse("garbage"), Theme::Dark);
    }
}

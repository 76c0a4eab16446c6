//! Theme preference: resolution, application and persistence.
//!
//! The theme is the one piece of persisted state. It is read once at startup
//! (falling back to the system dark-mode hint when nothing is stored),
//! applied through an injected [`ThemeView`], and only ever written when the
//! user explicitly selects a theme.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::settings::{SettingsError, SettingsStore};

/// Settings key the preference is stored under.
pub const THEME_KEY: &str = "theme";

/// Output theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Returns the stable lowercase name used in storage and CLI input.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown theme '{input}' (expected light or dark)")]
pub struct UnknownTheme {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(UnknownTheme {
                input: s.to_string(),
            }),
        }
    }
}

/// Surface a theme is applied to.
///
/// `apply_theme` sets the active theme on the rendering surface;
/// `mark_active_choice` highlights the matching selector control, clearing
/// all others. Surfaces without a selector (like the terminal view) no-op
/// the latter.
pub trait ThemeView {
    fn apply_theme(&self, theme: Theme);
    fn mark_active_choice(&self, theme: Theme);
}

impl<V: ThemeView + ?Sized> ThemeView for Arc<V> {
    fn apply_theme(&self, theme: Theme) {
        (**self).apply_theme(theme);
    }

    fn mark_active_choice(&self, theme: Theme) {
        (**self).mark_active_choice(theme);
    }
}

/// Resolves, applies and persists the theme preference.
pub struct ThemeController<S, V> {
    store: S,
    view: V,
}

impl<S: SettingsStore, V: ThemeView> ThemeController<S, V> {
    /// Creates a controller over a settings store and a view.
    pub fn new(store: S, view: V) -> Self {
        Self { store, view }
    }

    /// Resolves the startup theme and applies it.
    ///
    /// A persisted preference wins; otherwise `system_prefers_dark` decides.
    /// Nothing is persisted until the user explicitly selects a theme.
    pub fn initialize(&mut self, system_prefers_dark: bool) -> Theme {
        let stored = self.store.get(THEME_KEY);
        let theme = stored
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or(if system_prefers_dark {
                Theme::Dark
            } else {
                Theme::Light
            });
        debug!(theme = %theme, from_store = stored.is_some(), "resolved startup theme");
        self.apply(theme);
        theme
    }

    /// Applies `theme` to the view and marks it as the active choice.
    pub fn apply(&self, theme: Theme) {
        self.view.apply_theme(theme);
        self.view.mark_active_choice(theme);
    }

    /// Applies `theme` and persists it as the user's preference.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the preference cannot be written; the
    /// theme is still applied for the current session.
    pub fn handle_select(&mut self, theme: Theme) -> Result<(), SettingsError> {
        self.apply(theme);
        self.store.set(THEME_KEY, theme.as_str())
    }
}

/// Reads the terminal's background hint as the system dark-mode preference.
///
/// `COLORFGBG` is the conventional `<fg>;<bg>` pair exported by several
/// terminal emulators; a dark background color code means a dark theme.
/// Absent or unparseable values default to light.
#[must_use]
pub fn system_prefers_dark() -> bool {
    env::var("COLORFGBG")
        .ok()
        .as_deref()
        .is_some_and(colorfgbg_is_dark)
}

fn colorfgbg_is_dark(value: &str) -> bool {
    let Some(background) = value.rsplit(';').next() else {
        return false;
    };
    match background.trim().parse::<u8>() {
        // 0-6 are the dark ANSI colors, 8 is bright black.
        Ok(code) => code <= 6 || code == 8,
        Err(_) => false,
    }
}

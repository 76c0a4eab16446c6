//! Terminal implementation of the download and theme views.
//!
//! The busy indicator is an indicatif spinner on stderr; results and
//! messages go to stdout/stderr. The theme selects the accent color used for
//! the spinner and option labels. There is no submit control and no theme
//! selector in a terminal, so those view calls are tolerated no-ops.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::trace;

use crate::app::orchestrator::DownloadView;
use crate::media::RenderedMedia;
use crate::theme::{Theme, ThemeView};

/// ANSI accent used for labels, per theme.
fn accent(theme: Theme) -> &'static str {
    match theme {
        // Bright cyan reads well on dark backgrounds, blue on light ones.
        Theme::Dark => "\x1b[96m",
        Theme::Light => "\x1b[34m",
    }
}

const RESET: &str = "\x1b[0m";

/// Terminal view over stdout/stderr.
pub struct TerminalView {
    theme: Mutex<Theme>,
    spinner: Mutex<Option<ProgressBar>>,
    /// Disables ANSI styling and the spinner (piped output, --quiet).
    plain: bool,
    /// Skips human-readable result output (the caller emits JSON instead).
    suppress_result: bool,
}

impl TerminalView {
    /// Creates a terminal view; `plain` disables styling and the spinner.
    #[must_use]
    pub fn new(plain: bool) -> Self {
        Self {
            theme: Mutex::new(Theme::default()),
            spinner: Mutex::new(None),
            plain,
            suppress_result: false,
        }
    }

    /// Disables human-readable result output, leaving messages and the busy
    /// handling intact. Used when the caller prints results as JSON.
    #[must_use]
    pub fn with_result_output_suppressed(mut self) -> Self {
        self.suppress_result = true;
        self
    }

    fn current_theme(&self) -> Theme {
        *self.theme.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn styled(&self, text: &str) -> String {
        if self.plain {
            text.to_string()
        } else {
            format!("{}{text}{RESET}", accent(self.current_theme()))
        }
    }

    /// Spinner style for the current theme.
    ///
    /// # Panics
    ///
    /// The template is static and known-valid.
    #[allow(clippy::expect_used)]
    fn spinner_style(&self) -> ProgressStyle {
        let template = match self.current_theme() {
            Theme::Dark => "{spinner:.cyan} {msg}",
            Theme::Light => "{spinner:.blue} {msg}",
        };
        ProgressStyle::with_template(template).expect("static spinner template is valid")
    }
}

impl DownloadView for TerminalView {
    fn set_submit_enabled(&self, enabled: bool) {
        // No submit control to disable in a terminal.
        trace!(enabled, "submit control toggle ignored by terminal view");
    }

    fn set_busy(&self, busy: bool) {
        let mut spinner = self
            .spinner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if busy {
            if self.plain || spinner.is_some() {
                return;
            }
            let bar = ProgressBar::new_spinner().with_style(self.spinner_style());
            bar.set_message("Fetching download options...");
            bar.enable_steady_tick(Duration::from_millis(80));
            *spinner = Some(bar);
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn show_message(&self, message: &str) {
        eprintln!("{message}");
    }

    fn clear_message(&self) {
        // Terminal output scrolls; there is no panel to hide.
    }

    fn show_result(&self, media: &RenderedMedia) {
        if self.suppress_result {
            return;
        }
        if let Some(info) = &media.info {
            println!("{}", self.styled(&info.title));
            println!("  thumbnail: {}", info.thumbnail_url);
        }
        for option in &media.options {
            println!(
                "[{}] {}  {}",
                option.icon.as_str(),
                self.styled(&option.label),
                option.href
            );
        }
        if media.options.is_empty() {
            eprintln!("No downloadable media found for this link.");
        }
    }

    fn hide_result(&self) {
        // Prior results have already scrolled away.
    }
}

impl ThemeView for TerminalView {
    fn apply_theme(&self, theme: Theme) {
        *self
            .theme
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = theme;
    }

    fn mark_active_choice(&self, theme: Theme) {
        // No theme selector control in a terminal.
        trace!(theme = %theme, "theme selector marking ignored by terminal view");
    }
}

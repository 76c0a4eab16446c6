//! The download orchestrator: a two-state machine wiring validation, the
//! API client and payload normalization to an injected view.
//!
//! The state machine is deliberately explicit. The submit control is the only
//! way to start a request, and it is gated on [`UiState::Idle`]; while a
//! request is in flight the state is [`UiState::Busy`] and further submits
//! are ignored. That gate is the sole concurrency control: at most one
//! request is ever in flight, with no queuing, cancellation or retry.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, instrument, warn};

use crate::client::{ClientError, DownloadRequest, MediaFetcher, ResponseEnvelope};
use crate::media::{RenderedMedia, extract_media};
use crate::platform::Platform;
use crate::validate::validate_platform_url;

/// The two UI states gating submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    /// Ready for a new submission.
    Idle,
    /// A request is in flight; submissions are ignored.
    Busy,
}

/// Surface the orchestrator drives.
///
/// Mirrors the controls of a download page: a submit control, a busy
/// indicator, a result panel and a message panel. Methods take `&self`;
/// implementations use interior mutability. A surface missing one of the
/// controls tolerates the call as a no-op.
pub trait DownloadView: Send + Sync {
    /// Enables or disables the submit control.
    fn set_submit_enabled(&self, enabled: bool);

    /// Shows or hides the busy indicator.
    fn set_busy(&self, busy: bool);

    /// Shows `message` in the message panel.
    fn show_message(&self, message: &str);

    /// Hides the message panel.
    fn clear_message(&self);

    /// Populates and shows the result panel.
    fn show_result(&self, media: &RenderedMedia);

    /// Hides the result panel.
    fn hide_result(&self);
}

/// What one submission amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The fetch succeeded and options were rendered.
    Completed(RenderedMedia),
    /// Validation failed; no request was issued.
    Rejected,
    /// The fetch or rendering failed; the message panel explains why.
    Failed,
    /// A request was already in flight; the submission was dropped.
    Ignored,
}

/// Drives one platform's submit flow end to end.
pub struct Orchestrator {
    platform: Platform,
    fetcher: Arc<dyn MediaFetcher>,
    view: Arc<dyn DownloadView>,
    state: Mutex<UiState>,
}

impl Orchestrator {
    /// Creates an orchestrator for `platform` over a fetcher and a view.
    pub fn new(
        platform: Platform,
        fetcher: Arc<dyn MediaFetcher>,
        view: Arc<dyn DownloadView>,
    ) -> Self {
        Self {
            platform,
            fetcher,
            view,
            state: Mutex::new(UiState::Idle),
        }
    }

    /// Returns the current UI state.
    pub fn state(&self) -> UiState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handles one submit action (button click or Enter in the URL field).
    ///
    /// Ignored while Busy. On validation failure the reason is shown and no
    /// request is issued. Otherwise the view enters its busy presentation,
    /// the fetch runs to completion, the result (or failure message) is
    /// shown, and the state unconditionally returns to Idle.
    #[instrument(skip(self, url), fields(platform = %self.platform))]
    pub async fn submit(&self, url: &str) -> SubmitOutcome {
        let trimmed = url.trim();

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == UiState::Busy {
                debug!("submission ignored while a request is in flight");
                return SubmitOutcome::Ignored;
            }
            if let Err(error) = validate_platform_url(trimmed, self.platform) {
                drop(state);
                debug!(reason = %error, "submission rejected by validation");
                self.view.show_message(&error.to_string());
                return SubmitOutcome::Rejected;
            }
            *state = UiState::Busy;
        }

        self.view.set_submit_enabled(false);
        self.view.set_busy(true);
        self.view.hide_result();
        self.view.clear_message();

        let request = DownloadRequest::new(trimmed, self.platform);
        let fetched = self.fetcher.fetch_media(&request).await;
        let outcome = self.present(fetched);

        self.view.set_busy(false);
        self.view.set_submit_enabled(true);
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = UiState::Idle;

        outcome
    }

    /// Renders a settled fetch into the view.
    fn present(&self, fetched: Result<ResponseEnvelope, ClientError>) -> SubmitOutcome {
        match fetched {
            Ok(envelope) => match extract_media(&envelope, self.platform) {
                Ok(media) => {
                    self.view.show_result(&media);
                    SubmitOutcome::Completed(media)
                }
                Err(error) => {
                    warn!(error = %error, "payload did not match any expected shape");
                    self.view.show_message(&error.to_string());
                    SubmitOutcome::Failed
                }
            },
            Err(error) => {
                warn!(error = %error, "fetch failed");
                self.view.show_message(&error.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}

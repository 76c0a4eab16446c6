//! Application layer: the submit-flow orchestrator and terminal front end.

mod orchestrator;
mod terminal;

pub use orchestrator::{DownloadView, Orchestrator, SubmitOutcome, UiState};
pub use terminal::TerminalView;

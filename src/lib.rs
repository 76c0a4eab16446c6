//! Snaplink Core Library
//!
//! This library fetches direct download links for media pages on the
//! supported platforms (TikTok, Instagram, YouTube): a submitted link is
//! validated against the configured platform, sent to the remote download
//! API, and the heterogeneous per-platform response payload is normalized
//! into a fixed list of download options for a view to render.
//!
//! # Architecture
//!
//! - [`platform`] - Supported platforms, API path mapping, link patterns
//! - [`validate`] - Pre-flight link validation
//! - [`client`] - Download API client and wire envelope
//! - [`media`] - Payload normalization into download options
//! - [`app`] - Submit-flow orchestrator and terminal view
//! - [`theme`] - Theme preference resolution and persistence
//! - [`settings`] - Key/value settings storage

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod client;
pub mod media;
pub mod platform;
pub mod settings;
pub mod theme;
pub mod validate;

// Re-export commonly used types
pub use app::{DownloadView, Orchestrator, SubmitOutcome, TerminalView, UiState};
pub use client::{
    ClientError, DEFAULT_API_BASE, DownloadRequest, MediaClient, MediaFetcher, ResponseEnvelope,
};
pub use media::{IconKind, MediaInfo, MediaOption, RenderError, RenderedMedia, extract_media};
pub use platform::Platform;
pub use settings::{FileSettingsStore, SettingsError, SettingsStore};
pub use theme::{Theme, ThemeController, ThemeView, system_prefers_dark};
pub use validate::{ValidationError, validate_platform_url};

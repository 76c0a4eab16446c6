//! Normalizing API payloads into renderable download options.
//!
//! Each platform returns its own payload shape; this module flattens all of
//! them into an ordered list of [`MediaOption`] plus optional [`MediaInfo`].
//! Fields that are missing, null, not a string, or empty are silently
//! skipped — an option is only ever built from a non-empty string source,
//! never fabricated.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::client::ResponseEnvelope;
use crate::platform::Platform;

/// Icon category of a download option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Video,
    Audio,
    Image,
}

impl IconKind {
    /// Returns the stable lowercase label used in terminal and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
        }
    }
}

/// One renderable download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaOption {
    /// Direct link to the media file.
    pub href: String,
    /// Human-readable button label.
    pub label: String,
    /// Icon category for the option.
    pub icon: IconKind,
}

impl MediaOption {
    /// Creates an option from a link, label and icon category.
    #[must_use]
    pub fn new(href: impl Into<String>, label: impl Into<String>, icon: IconKind) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
            icon,
        }
    }
}

/// Title and thumbnail extracted from the payload, when the API provides one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaInfo {
    /// Media title, defaulting to "Media" when the payload has none.
    pub title: String,
    /// Thumbnail image URL.
    pub thumbnail_url: String,
}

/// Result of one normalization pass over a success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMedia {
    /// Download options in the platform's fixed field order.
    pub options: Vec<MediaOption>,
    /// Media info block; `None` means the caller hides that panel.
    pub info: Option<MediaInfo>,
}

/// The payload did not match any expected shape for the platform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Neither the list nor the single-object shape matched.
    #[error("Unable to display download options; link may be invalid.")]
    UnrenderablePayload,
}

/// TikTok payload fields in emission order.
const TIKTOK_FIELDS: [(&str, &str, IconKind); 3] = [
    ("video_hd", "Download Video (HD)", IconKind::Video),
    ("video_sd", "Download Video (SD)", IconKind::Video),
    ("mp3", "Download Audio (MP3)", IconKind::Audio),
];

/// YouTube payload fields in emission order.
const YOUTUBE_FIELDS: [(&str, &str, IconKind); 2] = [
    ("video", "Download Video", IconKind::Video),
    ("audio", "Download Audio", IconKind::Audio),
];

/// Normalizes a success envelope into download options and media info.
///
/// The payload of interest is the envelope's `result` field when present,
/// otherwise the envelope itself ([`ResponseEnvelope::payload`]).
///
/// # Errors
///
/// Returns [`RenderError::UnrenderablePayload`] only for Instagram payloads
/// that are neither a list nor an object carrying a `url` string. Missing
/// fields on the other platforms just produce fewer (possibly zero) options.
pub fn extract_media(
    envelope: &ResponseEnvelope,
    platform: Platform,
) -> Result<RenderedMedia, RenderError> {
    let payload = envelope.payload();
    let options = match platform {
        Platform::Tiktok => field_options(payload, &TIKTOK_FIELDS),
        Platform::Youtube => field_options(payload, &YOUTUBE_FIELDS),
        Platform::Instagram => instagram_options(payload)?,
    };
    Ok(RenderedMedia {
        options,
        info: media_info(payload),
    })
}

/// Reads `field` from `payload` as a non-empty string.
fn non_empty_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Emits one option per present field, preserving table order.
fn field_options(payload: &Value, fields: &[(&str, &str, IconKind)]) -> Vec<MediaOption> {
    fields
        .iter()
        .filter_map(|(field, label, icon)| {
            non_empty_str(payload, field).map(|href| MediaOption::new(href, *label, *icon))
        })
        .collect()
}

/// Instagram payloads are either a list of media entries or a single entry.
///
/// List entries keep their 1-based position in the label even when earlier
/// entries are skipped, so labels stay stable across partial payloads.
fn instagram_options(payload: &Value) -> Result<Vec<MediaOption>, RenderError> {
    if let Some(entries) = payload.as_array() {
        return Ok(entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                non_empty_str(entry, "url").map(|href| {
                    MediaOption::new(href, format!("Download Media {}", index + 1), media_icon(href))
                })
            })
            .collect());
    }

    if let Some(href) = non_empty_str(payload, "url") {
        return Ok(vec![MediaOption::new(href, "Download Media", media_icon(href))]);
    }

    Err(RenderError::UnrenderablePayload)
}

/// Video when the link carries an `.mp4` marker, image otherwise.
fn media_icon(href: &str) -> IconKind {
    if href.contains(".mp4") {
        IconKind::Video
    } else {
        IconKind::Image
    }
}

/// Builds the media info block when the payload carries a thumbnail.
fn media_info(payload: &Value) -> Option<MediaInfo> {
    let thumbnail = non_empty_str(payload, "thumbnail")?;
    let title = non_empty_str(payload, "title").unwrap_or("Media");
    Some(MediaInfo {
        title: title.to_string(),
        thumbnail_url: thumbnail.to_string(),
    })
}

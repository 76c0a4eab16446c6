//! Supported source platforms and their API/link patterns.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Regex patterns for recognizing platform links.
///
/// These intentionally check domain containment rather than full URL grammar:
/// share links come in many shapes (short links, tracking parameters, regional
/// hosts) and the download API accepts them all.
#[allow(clippy::expect_used)]
static TIKTOK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tiktok\.com").expect("platform regex is valid")); // Static pattern, safe to panic
#[allow(clippy::expect_used)]
static INSTAGRAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)instagram\.com").expect("platform regex is valid"));
#[allow(clippy::expect_used)]
static YOUTUBE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)youtube\.com|youtu\.be").expect("platform regex is valid"));

/// A source platform the download API knows how to handle.
///
/// One invocation serves exactly one platform; it drives both link validation
/// and interpretation of the API payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Tiktok,
    Instagram,
    Youtube,
}

impl Platform {
    /// All supported platforms, in display order.
    pub const ALL: [Self; 3] = [Self::Tiktok, Self::Instagram, Self::Youtube];

    /// Returns the stable lowercase name used in CLI input and messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiktok => "tiktok",
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
        }
    }

    /// Returns the API path segment for this platform.
    ///
    /// Most platforms use their own name; YouTube is served under `ytdl`.
    #[must_use]
    pub fn api_path(self) -> &'static str {
        match self {
            Self::Youtube => "ytdl",
            other => other.as_str(),
        }
    }

    /// Returns true if `url` looks like a link for this platform.
    ///
    /// Case-insensitive domain containment, not URL parsing.
    #[must_use]
    pub fn matches_url(self, url: &str) -> bool {
        match self {
            Self::Tiktok => TIKTOK_PATTERN.is_match(url),
            Self::Instagram => INSTAGRAM_PATTERN.is_match(url),
            Self::Youtube => YOUTUBE_PATTERN.is_match(url),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown platform name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown platform '{input}' (expected tiktok, instagram or youtube)")]
pub struct UnknownPlatform {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiktok" => Ok(Self::Tiktok),
            "instagram" => Ok(Self::Instagram),
            "youtube" => Ok(Self::Youtube),
            _ => Err(UnknownPlatform {
                input: s.to_string(),
            }),
        }
    }
}

//! CLI argument definitions using clap derive macros.

use clap::{Parser, Subcommand};

use snaplink_core::{DEFAULT_API_BASE, Platform, Theme};

/// Fetch direct download links for TikTok, Instagram and YouTube media.
///
/// Snaplink validates a media page link for the chosen platform, asks the
/// download API for the available media, and prints one download option per
/// line (label and direct link).
#[derive(Parser, Debug)]
#[command(name = "snaplink")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output and styling
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Platform the link belongs to (tiktok, instagram or youtube)
    #[arg(short, long)]
    pub platform: Option<Platform>,

    /// Media page link to fetch download options for
    pub url: Option<String>,

    /// Base URL of the download API (self-hosted deployments, tests)
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Print the download options as JSON instead of styled text
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or select the output theme (light or dark)
    Theme {
        /// Theme to select; omit to print the current theme
        value: Option<Theme>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_fetch_args_parse() {
        let cli = Cli::try_parse_from([
            "snaplink",
            "--platform",
            "tiktok",
            "https://www.tiktok.com/@u/video/1",
        ])
        .unwrap();
        assert_eq!(cli.platform, Some(Platform::Tiktok));
        assert_eq!(
            cli.url.as_deref(),
            Some("https://www.tiktok.com/@u/video/1")
        );
        assert_eq!(cli.api_base, DEFAULT_API_BASE);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_platform_parse_rejects_unknown() {
        let result = Cli::try_parse_from(["snaplink", "--platform", "vimeo", "x"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_theme_subcommand_parses() {
        let cli = Cli::try_parse_from(["snaplink", "theme", "dark"]).unwrap();
        match cli.command {
            Some(Command::Theme { value }) => assert_eq!(value, Some(Theme::Dark)),
            other => panic!("expected theme subcommand, got: {other:?}"),
        }

        let cli = Cli::try_parse_from(["snaplink", "theme"]).unwrap();
        match cli.command {
            Some(Command::Theme { value }) => assert_eq!(value, None),
            other => panic!("expected theme subcommand, got: {other:?}"),
        }
    }

    #[test]
    fn test_cli_theme_rejects_unknown_value() {
        let result = Cli::try_parse_from(["snaplink", "theme", "sepia"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verbose_and_quiet_flags() {
        let cli = Cli::try_parse_from(["snaplink", "-vv", "-q"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_api_base_override() {
        let cli = Cli::try_parse_from([
            "snaplink",
            "--api-base",
            "http://localhost:8080",
            "--platform",
            "youtube",
            "https://youtu.be/abc",
        ])
        .unwrap();
        assert_eq!(cli.api_base, "http://localhost:8080");
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Cli::try_parse_from(["snaplink", "--help"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::DisplayHelp
        );
    }
}

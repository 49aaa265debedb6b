use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::app_config::LogLevel;
use crate::domain::entities::{ImageQuality, ImageSize};

#[derive(Debug, Parser)]
#[command(
    name = "inspo-clock",
    version,
    about = "Daily generated wallpaper with a clock overlay",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate, upload and publish today's wallpaper.
    Publish(PublishArgs),

    /// Drive the offline cache lifecycle.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Image size preset.
    #[arg(long, value_enum)]
    pub size: Option<ImageSize>,

    /// Image quality tier.
    #[arg(long, value_enum, env = "IMG_QUALITY", ignore_case = true)]
    pub quality: Option<ImageQuality>,

    /// Album short code. Empty disables album filing.
    #[arg(long, value_name = "SHORT")]
    pub album: Option<String>,

    /// Image API key.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// File host account hash.
    #[arg(long, env = "CATBOX_USERHASH", hide_env_values = true)]
    pub user_hash: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Fetch and store the core assets under the current version.
    Install,

    /// Purge every other cache version.
    Activate,

    /// Route one request through the cache policy.
    Fetch {
        /// Request URL, absolute or relative to the configured origin.
        url: String,

        /// Treat the request as a page navigation.
        #[arg(long)]
        navigate: bool,

        /// Accept header value.
        #[arg(long)]
        accept: Option<String>,

        /// Write the response body to this file instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_publish() {
        let args = CliArgs::try_parse_from([
            "inspo-clock",
            "publish",
            "--size",
            "landscape",
            "--quality",
            "HIGH",
        ])
        .unwrap();

        let Command::Publish(publish) = args.command else {
            panic!("expected publish");
        };
        assert_eq!(publish.size, Some(ImageSize::Landscape));
        assert_eq!(publish.quality, Some(ImageQuality::High));
    }

    #[test]
    fn test_parse_cache_fetch_with_global_flags() {
        let args = CliArgs::try_parse_from([
            "inspo-clock",
            "cache",
            "fetch",
            "./index.html",
            "--navigate",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(args.log_level, Some(LogLevel::Debug));
        match args.command {
            Command::Cache {
                action: CacheAction::Fetch { url, navigate, .. },
            } => {
                assert_eq!(url, "./index.html");
                assert!(navigate);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["inspo-clock"]).is_err());
    }
}

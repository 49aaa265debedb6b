//! Application configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::{CliArgs, Command};
use crate::domain::entities::{
    AlbumId, CacheVersion, CoreAssetSet, DEFAULT_ALBUM, DEFAULT_CACHE_VERSION, DEFAULT_CORE_ASSETS,
    ImageQuality, ImageSize,
};
use crate::infrastructure::catbox::CATBOX_API_URL;
use crate::infrastructure::openai::{DEFAULT_IMAGE_MODEL, OPENAI_API_BASE};

pub(crate) const APP_NAME: &str = "inspo-clock";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "inspo";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, file values overridden by CLI.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Image generation settings.
    #[serde(default)]
    pub image: ImageConfig,

    /// File host settings.
    #[serde(default)]
    pub upload: UploadConfig,

    /// Output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Offline cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Image generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Size preset.
    #[serde(default)]
    pub size: ImageSize,

    /// Quality tier.
    #[serde(default)]
    pub quality: ImageQuality,

    /// Prompt override. The built-in prompt is used when unset.
    #[serde(default)]
    pub prompt: Option<String>,

    /// API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            size: ImageSize::default(),
            quality: ImageQuality::default(),
            prompt: None,
            api_base: default_api_base(),
        }
    }
}

/// File host settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Upload endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Album short code. Empty disables album filing.
    #[serde(default = "default_album")]
    pub album: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            album: default_album(),
        }
    }
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Page template. The built-in template is used when unset.
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// Rendered page.
    #[serde(default = "default_page_output")]
    pub page_output: PathBuf,

    /// JSON link log.
    #[serde(default = "default_link_log")]
    pub link_log: PathBuf,

    /// Local copy of the generated image. Empty disables it.
    #[serde(default = "default_wallpaper")]
    pub wallpaper: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template: None,
            page_output: default_page_output(),
            link_log: default_link_log(),
            wallpaper: default_wallpaper(),
        }
    }
}

/// Offline cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Current cache generation name.
    #[serde(default = "default_cache_version")]
    pub version: String,

    /// URLs stored on install.
    #[serde(default = "default_core_assets")]
    pub core_assets: Vec<String>,

    /// Origin relative URLs resolve against.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Cache directory. Defaults to the platform cache dir.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,

    /// Per-request network timeout. Unset means no timeout.
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            version: default_cache_version(),
            core_assets: default_core_assets(),
            origin: default_origin(),
            storage_dir: None,
            fetch_timeout_secs: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_api_base() -> String {
    OPENAI_API_BASE.to_string()
}

fn default_endpoint() -> String {
    CATBOX_API_URL.to_string()
}

fn default_album() -> String {
    DEFAULT_ALBUM.to_string()
}

fn default_page_output() -> PathBuf {
    PathBuf::from("index.html")
}

fn default_link_log() -> PathBuf {
    PathBuf::from("data/links.json")
}

fn default_wallpaper() -> PathBuf {
    PathBuf::from("wallpaper.png")
}

fn default_cache_version() -> String {
    DEFAULT_CACHE_VERSION.to_string()
}

fn default_core_assets() -> Vec<String> {
    DEFAULT_CORE_ASSETS.iter().map(ToString::to_string).collect()
}

fn default_origin() -> String {
    "http://localhost:8080/".to_string()
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Command::Publish(publish) = &args.command {
            if let Some(size) = publish.size {
                self.image.size = size;
            }
            if let Some(quality) = publish.quality {
                self.image.quality = quality;
            }
            if let Some(album) = &publish.album {
                self.upload.album.clone_from(album);
            }
        }
    }

    /// Returns the configured album, if any.
    #[must_use]
    pub fn album(&self) -> Option<AlbumId> {
        AlbumId::new(self.upload.album.as_str())
    }

    /// Returns the local copy path, if enabled.
    #[must_use]
    pub fn local_copy_path(&self) -> Option<PathBuf> {
        (!self.paths.wallpaper.as_os_str().is_empty()).then(|| self.paths.wallpaper.clone())
    }

    /// Returns the cache version, falling back to the default when blank.
    #[must_use]
    pub fn cache_version(&self) -> CacheVersion {
        CacheVersion::new(self.cache.version.as_str()).unwrap_or_default()
    }

    /// Returns the core asset set.
    #[must_use]
    pub fn core_assets(&self) -> CoreAssetSet {
        CoreAssetSet::new(self.cache.core_assets.iter())
    }

    /// Returns the effective offline cache directory.
    #[must_use]
    pub fn effective_cache_dir(&self) -> PathBuf {
        self.cache.storage_dir.clone().unwrap_or_else(|| {
            ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
                || PathBuf::from(".inspo-cache"),
                |dirs| dirs.cache_dir().join("offline"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [image]
            quality = "high"

            [paths]
            wallpaper = ""

            [cache]
            version = "inspo-clock-v2"
            core_assets = ["./", "./index.html"]
            fetch_timeout_secs = 10
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.image.quality, ImageQuality::High);
        assert_eq!(config.image.size, ImageSize::Portrait);
        assert_eq!(config.image.model, "gpt-image-1");
        assert!(config.local_copy_path().is_none());
        assert_eq!(config.cache_version().as_str(), "inspo-clock-v2");
        assert_eq!(config.core_assets().len(), 2);
        assert_eq!(config.cache.fetch_timeout_secs, Some(10));
        assert_eq!(config.upload.album, "ou6aoj");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.paths.link_log, PathBuf::from("data/links.json"));
        assert_eq!(config.local_copy_path(), Some(PathBuf::from("wallpaper.png")));
        assert_eq!(config.cache_version().as_str(), DEFAULT_CACHE_VERSION);
        assert_eq!(config.core_assets().len(), DEFAULT_CORE_ASSETS.len());
        assert!(config.cache.fetch_timeout_secs.is_none());
        assert_eq!(config.album().map(|a| a.to_string()), Some("ou6aoj".to_string()));
    }

    #[test]
    fn test_cache_dir_override() {
        let mut config = AppConfig::default();
        config.cache.storage_dir = Some(PathBuf::from("/srv/clock/cache"));

        assert_eq!(config.effective_cache_dir(), PathBuf::from("/srv/clock/cache"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let mut config = AppConfig::default();
        config.cache.version = "  ".to_string();
        config.upload.album = String::new();

        assert_eq!(config.cache_version(), CacheVersion::default());
        assert!(config.album().is_none());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = AppConfig::default();
        let args = CliArgs::try_parse_from([
            "inspo-clock",
            "--log-level",
            "warn",
            "publish",
            "--size",
            "landscape",
            "--album",
            "",
        ])
        .unwrap();

        config.merge_with_args(&args);

        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.image.size, ImageSize::Landscape);
        assert!(config.album().is_none());
    }
}

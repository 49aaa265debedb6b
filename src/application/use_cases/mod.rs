//! Use case implementations.

mod publish_wallpaper_use_case;

pub use publish_wallpaper_use_case::PublishWallpaperUseCase;

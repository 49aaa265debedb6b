//! Inspo Clock - a daily generated wallpaper behind a clock page.
//!
//! This crate generates an image, uploads it to a public file host, logs the
//! link, renders the clock page, and implements the page's offline cache
//! policy with clean architecture.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, services and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "inspo-clock";

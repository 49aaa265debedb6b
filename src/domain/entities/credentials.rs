//! Upload credentials and album identifiers.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Short code of the album uploads are filed into by default.
pub const DEFAULT_ALBUM: &str = "ou6aoj";

/// Secret value that never appears in logs or debug output.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    value: String,
}

impl Secret {
    /// Creates a secret from a non-blank value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self { value })
    }

    /// Returns the secret as a string slice.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Returns masked value for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len());
        }

        let visible_prefix: String = chars[..3].iter().collect();
        let visible_suffix: String = chars[chars.len() - 3..].iter().collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Catbox account hash that enables authenticated uploads.
pub type UserHash = Secret;

/// API key for the image generation service.
pub type ApiKey = Secret;

/// Short code of a remote album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumId(String);

impl AlbumId {
    /// Creates an album id from a non-blank short code.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return None;
        }
        Some(Self(value))
    }

    /// Returns the short code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_secret_is_absent() {
        assert!(Secret::new("").is_none());
        assert!(Secret::new("   ").is_none());
    }

    #[test]
    fn test_secret_is_trimmed() {
        let secret = Secret::new("  0123456789abcdef \n").unwrap();
        assert_eq!(secret.expose(), "0123456789abcdef");
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let secret = Secret::new("0123456789abcdef").unwrap();
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("0123456789abcdef"));
        assert!(debug_output.contains("012...def"));
    }

    #[test]
    fn test_short_secret_fully_masked() {
        let secret = Secret::new("abc").unwrap();
        assert_eq!(secret.to_string(), "***");
    }
}

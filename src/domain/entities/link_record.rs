//! Published wallpaper link record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::wallpaper::{ImageQuality, ImageSize};

/// One entry of the append-only link log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// ISO-8601 timestamp of the upload.
    pub ts: String,
    /// Public URL of the uploaded image.
    pub url: String,
    /// Size preset, e.g. `1024x1536`.
    pub size: String,
    /// Quality tier, e.g. `medium`.
    pub quality: String,
}

impl LinkRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn now(url: impl Into<String>, size: ImageSize, quality: ImageQuality) -> Self {
        Self::at(Utc::now(), url, size, quality)
    }

    /// Creates a record stamped with the given time.
    #[must_use]
    pub fn at(
        timestamp: DateTime<Utc>,
        url: impl Into<String>,
        size: ImageSize,
        quality: ImageQuality,
    ) -> Self {
        Self {
            ts: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            url: url.into(),
            size: size.as_str().to_string(),
            quality: quality.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_serializes_with_expected_fields() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 2, 6, 0, 0).unwrap();
        let record = LinkRecord::at(
            ts,
            "https://files.catbox.moe/abc123.png",
            ImageSize::Portrait,
            ImageQuality::Medium,
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ts"], "2025-01-02T06:00:00.000Z");
        assert_eq!(json["url"], "https://files.catbox.moe/abc123.png");
        assert_eq!(json["size"], "1024x1536");
        assert_eq!(json["quality"], "medium");
    }
}

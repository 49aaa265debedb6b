//! Wallpaper generation options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prompt sent to the image model when no override is configured.
pub const DEFAULT_PROMPT: &str = "\
First, generate a short, completely original sentence (under 12 words) that feels fresh, imaginative, and thought-provoking. \
The wording must use only valid, correctly spelled English dictionary words. \
Do not invent new words, merge words, or alter word forms unnaturally. \
Avoid motivational cliches or overused phrases such as believe in yourself, follow your dreams, anything is possible, or similar. \
Also avoid generic poster words like dream, journey, path, light, destiny, inspire, possible, hope, future, goal, or success unless combined in a surprising or unusual way. \
The sentence should be clear, natural English but combine ideas in a slightly unexpected or poetic way that sparks curiosity or a new perspective.

Render this exact sentence on a vertical 9:16 wallpaper, without changing or distorting it. \
Write it in plain, clear uppercase letters (A-Z only, plus spaces and standard punctuation). \
Use a clean sans-serif font with normal spacing (no compression or stretching). \
Do not use decorative fonts, cursive, handwriting, ligatures, or stylized distortions. \
Do not merge or alter letters. Do not omit or repeat letters. \
The text must be fully legible, sharp, evenly spaced, and correctly spelled.

Keep the background directly behind the text simple so every letter is easy to read. \
Place the text in the lower half of the image, centered, with generous margins. \
Ensure the entire sentence is fully inside the frame, with no cropping or truncation. \
Leave a clear empty margin below the text so no letter touches the image edge. \
The lowest text baseline must sit at least 5% above the bottom edge.

Design a background in any creative visual style: photorealistic nature, painterly realism, minimalist design, abstract surrealism, whimsical illustration, or bold typography-led art. \
The imagery should symbolically or imaginatively resonate with the meaning of the sentence, without defaulting to overused motifs (like roads, horizons, or sunsets).

Keep the top-center third uncluttered for a digital clock overlay. \
The final design should feel modern, evocative, surprising, and visually striking.";

/// Target pixel dimensions supported by the image model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// 1024x1536, close to a 9:16 phone screen.
    #[default]
    Portrait,
    /// 1536x1024.
    Landscape,
}

impl ImageSize {
    /// Returns the `WIDTHxHEIGHT` string understood by the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "1024x1536",
            Self::Landscape => "1536x1024",
        }
    }

    /// Returns width and height in pixels.
    #[must_use]
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Portrait => (1024, 1536),
            Self::Landscape => (1536, 1024),
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering quality tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    /// Fastest, cheapest tier.
    Low,
    /// Balanced tier.
    #[default]
    Medium,
    /// Highest fidelity.
    High,
    /// Let the model choose.
    Auto,
}

impl ImageQuality {
    /// Returns the lowercase API name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for ImageQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown image quality: {other}")),
        }
    }
}

/// Parameters of one image generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// Model identifier.
    pub model: String,
    /// Text prompt.
    pub prompt: String,
    /// Target dimensions.
    pub size: ImageSize,
    /// Quality tier.
    pub quality: ImageQuality,
}

impl ImageRequest {
    /// Creates a request with the default prompt.
    #[must_use]
    pub fn new(model: impl Into<String>, size: ImageSize, quality: ImageQuality) -> Self {
        Self {
            model: model.into(),
            prompt: DEFAULT_PROMPT.to_string(),
            size,
            quality,
        }
    }

    /// Replaces the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_parsing() {
        assert_eq!("HIGH".parse::<ImageQuality>(), Ok(ImageQuality::High));
        assert_eq!(" auto ".parse::<ImageQuality>(), Ok(ImageQuality::Auto));
        assert!("ultra".parse::<ImageQuality>().is_err());
    }

    #[test]
    fn test_size_strings() {
        assert_eq!(ImageSize::Portrait.to_string(), "1024x1536");
        assert_eq!(ImageSize::Landscape.dimensions(), (1536, 1024));
    }

    #[test]
    fn test_prompt_reserves_clock_area() {
        let request =
            ImageRequest::new("gpt-image-1", ImageSize::default(), ImageQuality::default());
        assert!(request.prompt.contains("digital clock overlay"));
        assert_eq!(request.quality, ImageQuality::Medium);
    }
}

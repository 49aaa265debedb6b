//! Clock page rendering.

/// Token replaced by the wallpaper URL.
pub const IMAGE_URL_PLACEHOLDER: &str = "%%IMAGE_URL%%";

/// Page template used when no template file is configured.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../../assets/template.html");

/// Replaces every placeholder occurrence with the URL.
///
/// The URL is inserted verbatim; callers must not pass markup-breaking input.
#[must_use]
pub fn render_page(template: &str, image_url: &str) -> String {
    template.replace(IMAGE_URL_PLACEHOLDER, image_url)
}

/// Counts placeholder occurrences in a template.
#[must_use]
pub fn placeholder_count(template: &str) -> usize {
    template.matches(IMAGE_URL_PLACEHOLDER).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_occurrence() {
        let template = r#"<link rel="preload" href="%%IMAGE_URL%%"><img src="%%IMAGE_URL%%">"#;
        let html = render_page(template, "https://files.catbox.moe/x.png");

        assert_eq!(
            html,
            r#"<link rel="preload" href="https://files.catbox.moe/x.png"><img src="https://files.catbox.moe/x.png">"#
        );
    }

    #[test]
    fn test_template_without_placeholder_unchanged() {
        assert_eq!(render_page("<p>static</p>", "https://a/b.png"), "<p>static</p>");
    }

    #[test]
    fn test_no_escaping() {
        assert_eq!(render_page("%%IMAGE_URL%%", "a&b"), "a&b");
    }

    #[test]
    fn test_default_template_has_placeholder() {
        assert!(placeholder_count(DEFAULT_TEMPLATE) >= 1);
    }

    #[test]
    fn test_default_template_loads_no_unshipped_scripts() {
        assert!(!DEFAULT_TEMPLATE.contains("sw.js"));
        assert!(!DEFAULT_TEMPLATE.contains("serviceWorker"));
    }
}

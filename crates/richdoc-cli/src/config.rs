use richdoc_color::Palette;
use richdoc_core::{MarkOrder, MarkdownOptions, TextOptions};
use richdoc_view::ViewOptions;

/// richdoc command-line configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Nesting order for overlapping marks
    pub mark_order: MarkOrder,
    /// Words kept by `text --mode preview`
    pub preview_words: usize,
    /// Backgrounds and threshold for `color`
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            mark_order: MarkOrder::Authored,
            preview_words: TextOptions::default().preview_words,
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("RICHDOC_LOG_LEVEL").unwrap_or(defaults.log_level),
            mark_order: std::env::var("RICHDOC_MARK_ORDER")
                .ok()
                .and_then(|v| parse_mark_order(&v))
                .unwrap_or(defaults.mark_order),
            preview_words: std::env::var("RICHDOC_PREVIEW_WORDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.preview_words),
            palette: Palette {
                dark_background: std::env::var("RICHDOC_DARK_BACKGROUND")
                    .unwrap_or(defaults.palette.dark_background),
                light_background: std::env::var("RICHDOC_LIGHT_BACKGROUND")
                    .unwrap_or(defaults.palette.light_background),
                threshold: std::env::var("RICHDOC_CONTRAST_THRESHOLD")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.palette.threshold),
                ..defaults.palette
            },
        }
    }

    pub fn markdown_options(&self) -> MarkdownOptions {
        MarkdownOptions {
            mark_order: self.mark_order,
            ..Default::default()
        }
    }

    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            preview_words: self.preview_words,
            ..Default::default()
        }
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            mark_order: self.mark_order,
            ..Default::default()
        }
    }
}

/// `authored` or `canonical`, case-insensitive
pub fn parse_mark_order(value: &str) -> Option<MarkOrder> {
    match value.trim().to_ascii_lowercase().as_str() {
        "authored" => Some(MarkOrder::Authored),
        "canonical" => Some(MarkOrder::Canonical),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.preview_words, 21);
        assert_eq!(config.palette.threshold, 4.5);
    }

    #[test]
    fn test_parse_mark_order() {
        assert_eq!(parse_mark_order("Canonical"), Some(MarkOrder::Canonical));
        assert_eq!(parse_mark_order(" authored "), Some(MarkOrder::Authored));
        assert_eq!(parse_mark_order("random"), None);
    }

    #[test]
    fn test_options_carry_mark_order() {
        let config = Config {
            mark_order: MarkOrder::Canonical,
            preview_words: 5,
            ..Default::default()
        };
        assert_eq!(config.markdown_options().mark_order, MarkOrder::Canonical);
        assert_eq!(config.view_options().mark_order, MarkOrder::Canonical);
        assert_eq!(config.text_options().preview_words, 5);
        assert_eq!(config.text_options().ellipsis, "...");
    }
}

//! Configuration options for Markdown serialization and text extraction

use crate::marks::MarkOrder;

/// Options for Markdown serialization
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    /// Horizontal rule string
    pub hr: String,

    /// Bullet list marker
    pub bullet_list_marker: char,

    /// Fence string for code blocks
    pub fence: String,

    /// Strong delimiter
    pub strong_delimiter: String,

    /// Emphasis delimiter
    pub em_delimiter: char,

    /// Nesting order for overlapping marks
    pub mark_order: MarkOrder,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            hr: "---".to_string(),
            bullet_list_marker: '-',
            fence: "```".to_string(),
            strong_delimiter: "**".to_string(),
            em_delimiter: '*',
            mark_order: MarkOrder::Authored,
        }
    }
}

/// Options for plain-text extraction
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Words kept by the preview mode
    pub preview_words: usize,

    /// Suffix appended when the preview is cut short
    pub ellipsis: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            preview_words: 21,
            ellipsis: "...".to_string(),
        }
    }
}

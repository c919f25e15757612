//! Plain-text extraction for previews, summaries and word counts.

use crate::ast::Node;
use crate::options::TextOptions;
use crate::parse::parse_document;
use crate::walk::{fallback, walk, walk_children, Visitor};

/// Which text a caller wants out of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Text of paragraphs only, unbounded. Other block kinds are skipped.
    #[default]
    Paragraphs,
    /// Every text leaf, cut to the preview word budget
    Preview,
}

/// Extract plain text from a tree
pub fn extract_text(node: &Node, mode: TextMode, options: &TextOptions) -> String {
    match mode {
        TextMode::Paragraphs => walk(&ParagraphText, node),
        TextMode::Preview => preview(&walk(&AllText, node), options),
    }
}

/// Extract plain text from a stored JSON document. Unparseable input yields
/// `""`.
pub fn extract_text_json(json: &str, mode: TextMode, options: &TextOptions) -> String {
    match parse_document(json) {
        Ok(node) => extract_text(&node, mode, options),
        Err(_) => String::new(),
    }
}

/// Number of whitespace-separated words across all text leaves
pub fn word_count(node: &Node) -> usize {
    walk(&AllText, node).split_whitespace().count()
}

fn preview(text: &str, options: &TextOptions) -> String {
    let words: Vec<&str> = text.trim().split_whitespace().collect();
    let mut out = words
        .iter()
        .take(options.preview_words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if words.len() > options.preview_words {
        out.push_str(&options.ellipsis);
    }
    out
}

fn join_spaced(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paragraph-join mode: descends only through the document root, paragraphs
/// and unknown wrappers
struct ParagraphText;

impl Visitor for ParagraphText {
    type Output = String;

    fn visit(&self, node: &Node) -> String {
        match node {
            // Bare text under the root is not inside a paragraph
            Node::Doc(children) => join_spaced(
                children
                    .iter()
                    .filter(|child| !matches!(child, Node::Text { .. }))
                    .map(|child| walk(self, child))
                    .collect(),
            ),
            Node::Paragraph(_) | Node::Link { .. } => join_spaced(walk_children(self, node)),
            Node::Text { text, .. } => text.clone(),
            Node::Unknown { .. } => fallback(self, node),
            Node::Heading { .. }
            | Node::BulletList(_)
            | Node::OrderedList { .. }
            | Node::ListItem(_)
            | Node::TaskList(_)
            | Node::TaskItem { .. }
            | Node::Blockquote(_)
            | Node::CodeBlock { .. }
            | Node::HorizontalRule
            | Node::HardBreak
            | Node::Table(_)
            | Node::TableRow(_)
            | Node::TableHeader(_)
            | Node::TableCell(_)
            | Node::Image { .. }
            | Node::Youtube { .. } => String::new(),
        }
    }

    fn compose(&self, _node: &Node, parts: Vec<String>) -> String {
        join_spaced(parts)
    }

    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    fn empty(&self) -> String {
        String::new()
    }
}

/// Every text leaf in document order, space separated
struct AllText;

impl Visitor for AllText {
    type Output = String;

    fn visit(&self, node: &Node) -> String {
        match node {
            Node::Text { text, .. } => text.clone(),
            Node::Unknown { .. } => fallback(self, node),
            _ => join_spaced(walk_children(self, node)),
        }
    }

    fn compose(&self, _node: &Node, parts: Vec<String>) -> String {
        join_spaced(parts)
    }

    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    fn empty(&self) -> String {
        String::new()
    }
}

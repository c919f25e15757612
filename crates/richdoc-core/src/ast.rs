//! Rich document tree
//!
//! This module defines the typed nodes and marks of a rich document. Every
//! node kind the authoring surface produces has its own variant; anything
//! else is kept as [`Node::Unknown`] so newer documents still flow through
//! every consumer.

use indexmap::IndexMap;
use serde_json::Value;

/// Scalar attributes attached to unknown nodes and marks, in authored order
pub type Attrs = IndexMap<String, Value>;

/// A node of the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Root document container
    Doc(Vec<Node>),

    /// Paragraph containing inline content
    Paragraph(Vec<Node>),

    /// Heading with level (1-6) and inline content
    Heading { level: u8, content: Vec<Node> },

    BulletList(Vec<Node>),

    /// Ordered list; `start` is the first number shown by the view
    OrderedList { start: u32, content: Vec<Node> },

    ListItem(Vec<Node>),

    TaskList(Vec<Node>),

    /// Checklist entry
    TaskItem { checked: bool, content: Vec<Node> },

    Blockquote(Vec<Node>),

    /// Code block whose content is a single text run
    CodeBlock {
        language: Option<String>,
        content: Vec<Node>,
    },

    HorizontalRule,

    /// Line break inside a paragraph
    HardBreak,

    Table(Vec<Node>),

    TableRow(Vec<Node>),

    TableHeader(Vec<Node>),

    TableCell(Vec<Node>),

    Image {
        src: Option<String>,
        alt: Option<String>,
        title: Option<String>,
    },

    /// Embedded YouTube video
    Youtube { src: Option<String> },

    /// Link wrapping inline content
    Link {
        href: Option<String>,
        content: Vec<Node>,
    },

    /// Text leaf with its marks, innermost first as authored
    Text { text: String, marks: Vec<Mark> },

    /// A node type this crate does not know about
    Unknown {
        kind: String,
        attrs: Attrs,
        content: Vec<Node>,
        text: Option<String>,
    },
}

/// An inline style attached to a text leaf
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Subscript,
    Superscript,

    /// Background color; `None` uses the theme's default highlight
    Highlight { color: Option<String> },

    /// Foreground color
    TextStyle { color: Option<String> },

    Link {
        href: String,
        target: Option<String>,
        rel: Option<String>,
    },

    Unknown { kind: String, attrs: Attrs },
}

const NO_CHILDREN: &[Node] = &[];

impl Node {
    /// Create a plain text leaf
    pub fn text(text: &str) -> Self {
        Node::Text {
            text: text.to_string(),
            marks: Vec::new(),
        }
    }

    /// Create a text leaf with marks
    pub fn marked_text(text: &str, marks: Vec<Mark>) -> Self {
        Node::Text {
            text: text.to_string(),
            marks,
        }
    }

    /// Create a paragraph holding a single text run
    pub fn paragraph(text: &str) -> Self {
        Node::Paragraph(vec![Node::text(text)])
    }

    /// The discriminator used in the JSON representation
    pub fn type_name(&self) -> &str {
        match self {
            Node::Doc(_) => "doc",
            Node::Paragraph(_) => "paragraph",
            Node::Heading { .. } => "heading",
            Node::BulletList(_) => "bulletList",
            Node::OrderedList { .. } => "orderedList",
            Node::ListItem(_) => "listItem",
            Node::TaskList(_) => "taskList",
            Node::TaskItem { .. } => "taskItem",
            Node::Blockquote(_) => "blockquote",
            Node::CodeBlock { .. } => "codeBlock",
            Node::HorizontalRule => "horizontalRule",
            Node::HardBreak => "hardBreak",
            Node::Table(_) => "table",
            Node::TableRow(_) => "tableRow",
            Node::TableHeader(_) => "tableHeader",
            Node::TableCell(_) => "tableCell",
            Node::Image { .. } => "image",
            Node::Youtube { .. } => "youtube",
            Node::Link { .. } => "link",
            Node::Text { .. } => "text",
            Node::Unknown { kind, .. } => kind,
        }
    }

    /// Child nodes in document order; empty for leaves
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc(content)
            | Node::Paragraph(content)
            | Node::BulletList(content)
            | Node::ListItem(content)
            | Node::TaskList(content)
            | Node::Blockquote(content)
            | Node::Table(content)
            | Node::TableRow(content)
            | Node::TableHeader(content)
            | Node::TableCell(content)
            | Node::Heading { content, .. }
            | Node::OrderedList { content, .. }
            | Node::TaskItem { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Link { content, .. }
            | Node::Unknown { content, .. } => content,
            Node::HorizontalRule
            | Node::HardBreak
            | Node::Image { .. }
            | Node::Youtube { .. }
            | Node::Text { .. } => NO_CHILDREN,
        }
    }

    /// Mutable child list, `None` for leaf kinds
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Doc(content)
            | Node::Paragraph(content)
            | Node::BulletList(content)
            | Node::ListItem(content)
            | Node::TaskList(content)
            | Node::Blockquote(content)
            | Node::Table(content)
            | Node::TableRow(content)
            | Node::TableHeader(content)
            | Node::TableCell(content)
            | Node::Heading { content, .. }
            | Node::OrderedList { content, .. }
            | Node::TaskItem { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Link { content, .. }
            | Node::Unknown { content, .. } => Some(content),
            Node::HorizontalRule
            | Node::HardBreak
            | Node::Image { .. }
            | Node::Youtube { .. }
            | Node::Text { .. } => None,
        }
    }

    /// Text carried by the node itself (text leaves and unknown leaves)
    pub fn own_text(&self) -> Option<&str> {
        match self {
            Node::Text { text, .. } => Some(text),
            Node::Unknown { text, .. } => text.as_deref(),
            _ => None,
        }
    }

    /// Whether the node flows inside a paragraph rather than standing as a block
    pub fn is_inline(&self) -> bool {
        match self {
            Node::Text { .. } | Node::HardBreak | Node::Link { .. } | Node::Image { .. } => true,
            Node::Unknown { content, text, .. } => {
                text.is_some() || (!content.is_empty() && content.iter().all(Node::is_inline))
            }
            _ => false,
        }
    }

    /// Concatenated text of all descendant leaves, without separators
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        if let Some(text) = self.own_text() {
            out.push_str(text);
        }
        for child in self.children() {
            child.push_text(out);
        }
    }
}

impl Mark {
    /// The discriminator used in the JSON representation
    pub fn type_name(&self) -> &str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strike => "strike",
            Mark::Code => "code",
            Mark::Subscript => "subscript",
            Mark::Superscript => "superscript",
            Mark::Highlight { .. } => "highlight",
            Mark::TextStyle { .. } => "textStyle",
            Mark::Link { .. } => "link",
            Mark::Unknown { kind, .. } => kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(Node::Doc(vec![]).type_name(), "doc");
        assert_eq!(
            Node::TaskItem {
                checked: true,
                content: vec![]
            }
            .type_name(),
            "taskItem"
        );
        let unknown = Node::Unknown {
            kind: "mention".to_string(),
            attrs: Attrs::new(),
            content: vec![],
            text: None,
        };
        assert_eq!(unknown.type_name(), "mention");
        assert_eq!(Mark::TextStyle { color: None }.type_name(), "textStyle");
    }

    #[test]
    fn test_leaves_have_no_children() {
        assert!(Node::text("hi").children().is_empty());
        assert!(Node::HorizontalRule.children().is_empty());
        assert!(Node::text("hi").clone().children_mut().is_none());
    }

    #[test]
    fn test_text_content() {
        let doc = Node::Doc(vec![
            Node::Heading {
                level: 1,
                content: vec![Node::text("Title")],
            },
            Node::Paragraph(vec![
                Node::text("Hello "),
                Node::marked_text("World", vec![Mark::Bold]),
            ]),
        ]);
        assert_eq!(doc.text_content(), "TitleHello World");
    }

    #[test]
    fn test_is_inline() {
        assert!(Node::text("x").is_inline());
        assert!(Node::HardBreak.is_inline());
        assert!(!Node::paragraph("x").is_inline());
        assert!(!Node::HorizontalRule.is_inline());
    }
}

//! richdoc-core - rich document tree, Markdown and plain text
//!
//! This crate holds the document model produced by the rich-text editor and
//! the pure transformations over it. It is used by `richdoc-view` (element
//! trees and HTML) and by the `richdoc` command-line tool.
//!
//! # Architecture
//!
//! ```text
//!                                ┌──▶ Markdown String
//! Stored JSON ──parse──▶ ┌──────┐│
//!                        │ Node │┼──▶ Plain text (paragraphs / preview)
//! Editor edits ─────────▶└──────┘│
//!                                └──▶ richdoc-view elements
//! ```
//!
//! Every consumer walks the tree through [`walk`], which sends node types it
//! does not recognize through a shared fallback instead of failing.
//!
//! # Example
//!
//! ```rust
//! use richdoc_core::{parse_document, to_markdown, MarkdownOptions};
//!
//! let json = r#"{"type":"doc","content":[
//!     {"type":"heading","attrs":{"level":2},"content":[{"type":"text","text":"Intro"}]}
//! ]}"#;
//!
//! let doc = parse_document(json).unwrap();
//! assert_eq!(to_markdown(&doc, &MarkdownOptions::default()), "## Intro");
//! ```

mod ast;
pub mod edit;
mod marks;
mod options;
mod parse;
mod serialize;
mod text;
pub mod walk;

pub use ast::{Attrs, Mark, Node};
pub use marks::{apply_marks, ordered_marks, MarkOrder};
pub use options::{MarkdownOptions, TextOptions};
pub use parse::{parse_document, RawMark, RawNode, MAX_DEPTH};
pub use serialize::{to_markdown, to_markdown_json};
pub use text::{extract_text, extract_text_json, word_count, TextMode};
pub use walk::{walk, Visitor};

/// Error type for document operations
#[derive(Debug, thiserror::Error)]
pub enum RichDocError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unexpected node: expected {expected}, found {found}")]
    UnexpectedNode { expected: String, found: String },

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, RichDocError>;

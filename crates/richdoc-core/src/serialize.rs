//! Markdown serialization
//!
//! Converts a document tree into Markdown text. Plain text is written as-is:
//! Markdown-significant characters are not escaped.

use tracing::debug;

use crate::ast::{Mark, Node};
use crate::marks::apply_marks;
use crate::options::MarkdownOptions;
use crate::parse::parse_document;
use crate::walk::{fallback, walk, walk_children, Visitor};

/// Serialize a tree to a Markdown string
pub fn to_markdown(node: &Node, options: &MarkdownOptions) -> String {
    let serializer = MarkdownSerializer { options };
    walk(&serializer, node).trim_matches('\n').to_string()
}

/// Serialize a stored JSON document. Unparseable input yields `""`.
pub fn to_markdown_json(json: &str, options: &MarkdownOptions) -> String {
    match parse_document(json) {
        Ok(node) => to_markdown(&node, options),
        Err(_) => String::new(),
    }
}

struct MarkdownSerializer<'a> {
    options: &'a MarkdownOptions,
}

impl Visitor for MarkdownSerializer<'_> {
    type Output = String;

    fn visit(&self, node: &Node) -> String {
        match node {
            Node::Doc(_) => self.blocks(node),

            Node::Paragraph(_) => self.inlines(node),

            Node::Heading { level, .. } => {
                format!("{} {}", "#".repeat(*level as usize), self.inlines(node))
            }

            Node::BulletList(items) | Node::TaskList(items) => items
                .iter()
                .map(|item| self.list_entry(item, &self.bullet()))
                .collect::<Vec<_>>()
                .join("\n"),

            Node::OrderedList { content, .. } => content
                .iter()
                .enumerate()
                .map(|(i, item)| self.list_entry(item, &format!("{}. ", i + 1)))
                .collect::<Vec<_>>()
                .join("\n"),

            Node::ListItem(_) => prefix_lines(&self.bullet(), &self.item_body(node)),

            Node::TaskItem { checked, .. } => {
                let prefix = format!("{}[{}] ", self.bullet(), if *checked { 'x' } else { ' ' });
                prefix_lines(&prefix, &self.item_body(node))
            }

            Node::Blockquote(_) => self
                .blocks(node)
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        ">".to_string()
                    } else {
                        format!("> {line}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),

            Node::CodeBlock { language, .. } => format!(
                "{fence}{lang}\n{code}\n{fence}",
                fence = self.options.fence,
                lang = language.as_deref().unwrap_or(""),
                code = node.text_content(),
            ),

            Node::HorizontalRule => self.options.hr.clone(),

            Node::HardBreak => "  \n".to_string(),

            Node::Table(rows) => serialize_table(self, rows),

            Node::TableRow(cells) => {
                let cells: Vec<String> = cells.iter().map(|cell| walk(self, cell)).collect();
                format!("| {} |", cells.join(" | "))
            }

            // A row is one line, so cell content is flattened
            Node::TableHeader(_) | Node::TableCell(_) => walk_children(self, node)
                .iter()
                .flat_map(|part| part.lines())
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" "),

            Node::Image { src, alt, title } => match src {
                Some(src) => match title {
                    Some(title) => format!(
                        "![{}]({} \"{}\")",
                        alt.as_deref().unwrap_or(""),
                        src,
                        title
                    ),
                    None => format!("![{}]({})", alt.as_deref().unwrap_or(""), src),
                },
                None => String::new(),
            },

            Node::Youtube { src } => src
                .as_ref()
                .map(|src| format!("[youtube]({src})"))
                .unwrap_or_default(),

            Node::Link { href, .. } => {
                let text = self.inlines(node);
                match href {
                    Some(href) => format!("[{text}]({href})"),
                    None => text,
                }
            }

            Node::Text { text, marks } => apply_marks(
                text.clone(),
                marks,
                self.options.mark_order,
                |mark, inner| self.wrap_mark(mark, inner),
            ),

            Node::Unknown { .. } => fallback(self, node),
        }
    }

    fn compose(&self, node: &Node, parts: Vec<String>) -> String {
        let separator = if node.children().iter().all(Node::is_inline) {
            ""
        } else {
            "\n\n"
        };
        join_non_empty(parts, separator)
    }

    fn text(&self, text: &str) -> String {
        text.to_string()
    }

    fn empty(&self) -> String {
        String::new()
    }
}

impl MarkdownSerializer<'_> {
    fn bullet(&self) -> String {
        format!("{} ", self.options.bullet_list_marker)
    }

    /// Block children separated by blank lines
    fn blocks(&self, node: &Node) -> String {
        join_non_empty(walk_children(self, node), "\n\n")
    }

    /// Inline children concatenated
    fn inlines(&self, node: &Node) -> String {
        walk_children(self, node).concat()
    }

    /// Block children of a list item, one per line
    fn item_body(&self, node: &Node) -> String {
        join_non_empty(walk_children(self, node), "\n")
    }

    /// A child of a list. Items are prefixed here; task items and foreign
    /// nodes bring their own prefix.
    fn list_entry(&self, item: &Node, prefix: &str) -> String {
        match item {
            Node::ListItem(_) => prefix_lines(prefix, &self.item_body(item)),
            _ => walk(self, item),
        }
    }

    fn wrap_mark(&self, mark: &Mark, inner: String) -> String {
        match mark {
            Mark::Bold => format!("{d}{inner}{d}", d = self.options.strong_delimiter),
            Mark::Italic => format!("{d}{inner}{d}", d = self.options.em_delimiter),
            Mark::Strike => format!("~~{inner}~~"),
            Mark::Code => format!("`{inner}`"),
            Mark::Underline => format!("<u>{inner}</u>"),
            Mark::Superscript => format!("<sup>{inner}</sup>"),
            Mark::Subscript => format!("<sub>{inner}</sub>"),
            Mark::Highlight { .. } => format!("=={inner}=="),
            Mark::Link { href, .. } if !href.is_empty() => format!("[{inner}]({href})"),
            Mark::Link { .. } | Mark::TextStyle { .. } => inner,
            Mark::Unknown { kind, .. } => {
                debug!(mark_type = %kind, "unknown mark type, writing text unchanged");
                inner
            }
        }
    }
}

/// Rows become `| a | b |` lines. When any row starts with a header cell, a
/// separator sized to that row is placed after the first line.
fn serialize_table(serializer: &MarkdownSerializer<'_>, rows: &[Node]) -> String {
    let mut lines: Vec<String> = rows.iter().map(|row| walk(serializer, row)).collect();

    let header_cols = rows
        .iter()
        .filter(|row| matches!(row.children().first(), Some(Node::TableHeader(_))))
        .map(|row| row.children().len())
        .last()
        .unwrap_or(0);

    if header_cols > 0 && !lines.is_empty() {
        let separator = format!("| {} |", vec!["---"; header_cols].join(" | "));
        lines.insert(1, separator);
    }

    lines.join("\n")
}

/// Prefix the first line and indent continuation lines to match
fn prefix_lines(prefix: &str, body: &str) -> String {
    let indent = " ".repeat(prefix.chars().count());
    let mut out = String::with_capacity(prefix.len() + body.len());

    for (i, line) in body.split('\n').enumerate() {
        if i == 0 {
            out.push_str(prefix);
        } else {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }

    out
}

fn join_non_empty(parts: Vec<String>, separator: &str) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

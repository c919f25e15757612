//! JSON boundary
//!
//! Documents are stored as the editor's JSON: loosely typed objects
//! discriminated by a `type` string. They are validated into [`Node`] once,
//! here, and written back through the same shape.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::ast::{Attrs, Mark, Node};
use crate::Result;

/// Deepest node level kept when lowering JSON into a tree
pub const MAX_DEPTH: usize = 128;

/// A node exactly as it appears in the stored JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<RawNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<RawMark>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A mark exactly as it appears in the stored JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMark {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

/// Parse a stored JSON document into a tree
pub fn parse_document(json: &str) -> Result<Node> {
    let raw: RawNode = serde_json::from_str(json).map_err(|err| {
        warn!(%err, "failed to parse document JSON");
        err
    })?;
    Ok(Node::from_raw(raw))
}

impl Node {
    /// Build a tree from an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        let raw: RawNode = serde_json::from_value(value)?;
        Ok(Node::from_raw(raw))
    }

    /// Lower a raw node, clamping attributes and dropping subtrees nested
    /// deeper than [`MAX_DEPTH`].
    pub fn from_raw(raw: RawNode) -> Self {
        lower(raw, 0)
    }

    /// Write the tree back into its JSON shape
    pub fn to_raw(&self) -> RawNode {
        raise(self)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_raw())?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_raw())?)
    }
}

fn lower(raw: RawNode, depth: usize) -> Node {
    let RawNode {
        kind,
        attrs,
        content,
        marks,
        text,
    } = raw;
    let attrs = attrs.unwrap_or_default();

    let content = match content {
        Some(children) if depth >= MAX_DEPTH => {
            warn!(
                node_type = %kind,
                dropped = children.len(),
                "document nested too deeply, dropping children"
            );
            Vec::new()
        }
        Some(children) => children
            .into_iter()
            .map(|child| lower(child, depth + 1))
            .collect(),
        None => Vec::new(),
    };

    match kind.as_str() {
        "doc" => Node::Doc(content),
        "paragraph" => Node::Paragraph(content),
        "heading" => Node::Heading {
            level: attr_u64(&attrs, "level").unwrap_or(1).clamp(1, 6) as u8,
            content,
        },
        "bulletList" => Node::BulletList(content),
        "orderedList" => Node::OrderedList {
            start: attr_u64(&attrs, "start")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(1),
            content,
        },
        "listItem" => Node::ListItem(content),
        "taskList" => Node::TaskList(content),
        "taskItem" => Node::TaskItem {
            checked: attr_bool(&attrs, "checked"),
            content,
        },
        "blockquote" => Node::Blockquote(content),
        "codeBlock" => Node::CodeBlock {
            language: attr_string(&attrs, "language"),
            content,
        },
        "horizontalRule" => Node::HorizontalRule,
        "hardBreak" => Node::HardBreak,
        "table" => Node::Table(content),
        "tableRow" => Node::TableRow(content),
        "tableHeader" => Node::TableHeader(content),
        "tableCell" => Node::TableCell(content),
        "image" => Node::Image {
            src: attr_string(&attrs, "src"),
            alt: attr_string(&attrs, "alt"),
            title: attr_string(&attrs, "title"),
        },
        "youtube" => Node::Youtube {
            src: attr_string(&attrs, "src"),
        },
        "link" => Node::Link {
            href: attr_string(&attrs, "href"),
            content,
        },
        "text" => Node::Text {
            text: text.unwrap_or_default(),
            marks: marks
                .unwrap_or_default()
                .into_iter()
                .map(lower_mark)
                .collect(),
        },
        _ => Node::Unknown {
            kind,
            attrs,
            content,
            text,
        },
    }
}

fn lower_mark(raw: RawMark) -> Mark {
    let attrs = raw.attrs.unwrap_or_default();

    match raw.kind.as_str() {
        "bold" => Mark::Bold,
        "italic" => Mark::Italic,
        "underline" => Mark::Underline,
        "strike" => Mark::Strike,
        "code" => Mark::Code,
        "subscript" => Mark::Subscript,
        "superscript" => Mark::Superscript,
        "highlight" => Mark::Highlight {
            color: attr_string(&attrs, "color"),
        },
        "textStyle" => Mark::TextStyle {
            color: attr_string(&attrs, "color"),
        },
        "link" => Mark::Link {
            href: attr_string(&attrs, "href").unwrap_or_default(),
            target: attr_string(&attrs, "target"),
            rel: attr_string(&attrs, "rel"),
        },
        _ => Mark::Unknown {
            kind: raw.kind,
            attrs,
        },
    }
}

fn raise(node: &Node) -> RawNode {
    let mut raw = RawNode {
        kind: node.type_name().to_string(),
        ..RawNode::default()
    };

    let mut attrs = Attrs::new();
    match node {
        Node::Heading { level, .. } => {
            attrs.insert("level".to_string(), json!(level));
        }
        Node::OrderedList { start, .. } => {
            attrs.insert("start".to_string(), json!(start));
        }
        Node::TaskItem { checked, .. } => {
            attrs.insert("checked".to_string(), json!(checked));
        }
        Node::CodeBlock { language, .. } => insert_some(&mut attrs, "language", language),
        Node::Image { src, alt, title } => {
            insert_some(&mut attrs, "src", src);
            insert_some(&mut attrs, "alt", alt);
            insert_some(&mut attrs, "title", title);
        }
        Node::Youtube { src } => insert_some(&mut attrs, "src", src),
        Node::Link { href, .. } => insert_some(&mut attrs, "href", href),
        Node::Text { text, marks } => {
            raw.text = Some(text.clone());
            if !marks.is_empty() {
                raw.marks = Some(marks.iter().map(raise_mark).collect());
            }
        }
        Node::Unknown {
            attrs: unknown_attrs,
            text,
            ..
        } => {
            attrs = unknown_attrs.clone();
            raw.text = text.clone();
        }
        _ => {}
    }

    if !attrs.is_empty() {
        raw.attrs = Some(attrs);
    }
    if node.writes_content() {
        raw.content = Some(node.children().iter().map(raise).collect());
    }
    raw
}

fn raise_mark(mark: &Mark) -> RawMark {
    let mut attrs = Attrs::new();
    match mark {
        Mark::Highlight { color } | Mark::TextStyle { color } => {
            insert_some(&mut attrs, "color", color);
        }
        Mark::Link { href, target, rel } => {
            attrs.insert("href".to_string(), json!(href));
            insert_some(&mut attrs, "target", target);
            insert_some(&mut attrs, "rel", rel);
        }
        Mark::Unknown { attrs: extra, .. } => attrs = extra.clone(),
        _ => {}
    }

    RawMark {
        kind: mark.type_name().to_string(),
        attrs: if attrs.is_empty() { None } else { Some(attrs) },
    }
}

impl Node {
    /// Container kinds always carry a `content` array when written back,
    /// except unknown nodes that had none.
    fn writes_content(&self) -> bool {
        match self {
            Node::Unknown { content, .. } => !content.is_empty(),
            Node::HorizontalRule
            | Node::HardBreak
            | Node::Image { .. }
            | Node::Youtube { .. }
            | Node::Text { .. } => false,
            _ => true,
        }
    }
}

fn insert_some(attrs: &mut Attrs, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        attrs.insert(key.to_string(), json!(value));
    }
}

/// Non-empty string attribute; numbers are accepted and stringified
fn attr_string(attrs: &Attrs, key: &str) -> Option<String> {
    match attrs.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn attr_u64(attrs: &Attrs, key: &str) -> Option<u64> {
    match attrs.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn attr_bool(attrs: &Attrs, key: &str) -> bool {
    match attrs.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RichDocError;

    #[test]
    fn test_parse_heading() {
        let node = parse_document(
            r#"{"type":"heading","attrs":{"level":2},"content":[{"type":"text","text":"Intro"}]}"#,
        )
        .unwrap();
        assert_eq!(
            node,
            Node::Heading {
                level: 2,
                content: vec![Node::text("Intro")],
            }
        );
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let node = Node::from_value(json!({"type": "heading", "attrs": {"level": 9}})).unwrap();
        assert!(matches!(node, Node::Heading { level: 6, .. }));

        let node = Node::from_value(json!({"type": "heading", "attrs": {"level": "3"}})).unwrap();
        assert!(matches!(node, Node::Heading { level: 3, .. }));

        let node = Node::from_value(json!({"type": "heading"})).unwrap();
        assert!(matches!(node, Node::Heading { level: 1, .. }));
    }

    #[test]
    fn test_tolerates_null_and_missing_fields() {
        let node = Node::from_value(json!({
            "type": "doc",
            "content": [
                {"type": "paragraph", "content": null, "attrs": null},
                {"type": "text", "text": "x", "marks": null}
            ]
        }))
        .unwrap();
        assert_eq!(
            node,
            Node::Doc(vec![Node::Paragraph(vec![]), Node::text("x")])
        );
    }

    #[test]
    fn test_marks_keep_order_and_attrs() {
        let node = Node::from_value(json!({
            "type": "text",
            "text": "hi",
            "marks": [
                {"type": "bold"},
                {"type": "link", "attrs": {"href": "https://example.com", "target": "_blank"}},
                {"type": "textStyle", "attrs": {"color": "#ff0000"}},
                {"type": "sparkle"}
            ]
        }))
        .unwrap();

        let Node::Text { marks, .. } = node else {
            panic!("expected a text node");
        };
        assert_eq!(marks[0], Mark::Bold);
        assert_eq!(
            marks[1],
            Mark::Link {
                href: "https://example.com".to_string(),
                target: Some("_blank".to_string()),
                rel: None,
            }
        );
        assert_eq!(
            marks[2],
            Mark::TextStyle {
                color: Some("#ff0000".to_string())
            }
        );
        assert_eq!(marks[3].type_name(), "sparkle");
    }

    #[test]
    fn test_unknown_node_is_preserved() {
        let node = Node::from_value(json!({
            "type": "callout",
            "attrs": {"tone": "info"},
            "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Note"}]}]
        }))
        .unwrap();

        match &node {
            Node::Unknown {
                kind,
                attrs,
                content,
                ..
            } => {
                assert_eq!(kind, "callout");
                assert_eq!(attrs.get("tone"), Some(&json!("info")));
                assert_eq!(content.len(), 1);
            }
            other => panic!("expected unknown node, got {other:?}"),
        }
    }

    #[test]
    fn test_task_item_checked() {
        let checked =
            Node::from_value(json!({"type": "taskItem", "attrs": {"checked": true}})).unwrap();
        let unchecked = Node::from_value(json!({"type": "taskItem"})).unwrap();
        assert!(matches!(checked, Node::TaskItem { checked: true, .. }));
        assert!(matches!(unchecked, Node::TaskItem { checked: false, .. }));
    }

    #[test]
    fn test_empty_src_is_absent() {
        let node =
            Node::from_value(json!({"type": "image", "attrs": {"src": "  ", "alt": "A"}})).unwrap();
        assert_eq!(
            node,
            Node::Image {
                src: None,
                alt: Some("A".to_string()),
                title: None,
            }
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            parse_document("{not valid json"),
            Err(RichDocError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let value = json!({
            "type": "doc",
            "content": [
                {"type": "heading", "attrs": {"level": 2}, "content": [
                    {"type": "text", "text": "Intro"}
                ]},
                {"type": "paragraph", "content": [
                    {"type": "text", "text": "bold", "marks": [{"type": "bold"}]}
                ]},
                {"type": "widget", "attrs": {"id": 7}},
                {"type": "horizontalRule"}
            ]
        });
        let node = Node::from_value(value.clone()).unwrap();
        assert_eq!(node.to_value().unwrap(), value);
    }

    #[test]
    fn test_code_block_without_language_round_trips() {
        let value = json!({"type": "codeBlock", "content": [{"type": "text", "text": "x = 1"}]});
        let node = Node::from_value(value.clone()).unwrap();
        assert_eq!(node.to_value().unwrap(), value);

        let tagged = json!({
            "type": "codeBlock",
            "attrs": {"language": "rust"},
            "content": [{"type": "text", "text": "let x = 1;"}]
        });
        let node = Node::from_value(tagged.clone()).unwrap();
        assert_eq!(node.to_value().unwrap(), tagged);
    }

    #[test]
    fn test_depth_guard_drops_deep_subtrees() {
        let mut value = json!({"type": "text", "text": "deep"});
        for _ in 0..(MAX_DEPTH + 10) {
            value = json!({"type": "blockquote", "content": [value]});
        }
        // Building via from_value avoids the parser's own recursion limit.
        let raw: RawNode = serde_json::from_value(value).unwrap();
        let node = Node::from_raw(raw);

        let mut depth = 0;
        let mut current = &node;
        while let Some(child) = current.children().first() {
            current = child;
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
        assert!(node.text_content().is_empty());
    }
}

//! Depth-first tree traversal with per-type dispatch.
//!
//! Each consumer (Markdown, plain text, view) implements [`Visitor`] with an
//! exhaustive `match` over the node kinds. The `Node::Unknown` arm hands the
//! node to [`fallback`], which composes the children, or yields the node's own
//! text, or nothing. New node types therefore never fail a consumer.

use tracing::debug;

use crate::ast::Node;

/// A consumer of the document tree
pub trait Visitor {
    type Output;

    /// Produce output for a node. Recurse into children with [`walk`].
    fn visit(&self, node: &Node) -> Self::Output;

    /// Compose the outputs of a fallback node's children
    fn compose(&self, node: &Node, parts: Vec<Self::Output>) -> Self::Output;

    /// Output for bare text carried by a fallback node
    fn text(&self, text: &str) -> Self::Output;

    /// Output for a fallback node with neither children nor text
    fn empty(&self) -> Self::Output;
}

/// Visit a node
pub fn walk<V: Visitor + ?Sized>(visitor: &V, node: &Node) -> V::Output {
    visitor.visit(node)
}

/// Visit every child of a node in document order
pub fn walk_children<V: Visitor + ?Sized>(visitor: &V, node: &Node) -> Vec<V::Output> {
    node.children()
        .iter()
        .map(|child| walk(visitor, child))
        .collect()
}

/// The default policy: compose the children if there are any, otherwise use
/// the node's own text, otherwise produce nothing.
pub fn fallback<V: Visitor + ?Sized>(visitor: &V, node: &Node) -> V::Output {
    debug!(node_type = %node.type_name(), "using default traversal");

    if !node.children().is_empty() {
        let parts = walk_children(visitor, node);
        return visitor.compose(node, parts);
    }

    match node.own_text() {
        Some(text) => visitor.text(text),
        None => visitor.empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Attrs;

    /// Lists node types in visiting order
    struct TypeCollector;

    impl Visitor for TypeCollector {
        type Output = Vec<String>;

        fn visit(&self, node: &Node) -> Vec<String> {
            if let Node::Unknown { .. } = node {
                return fallback(self, node);
            }
            let mut out = vec![node.type_name().to_string()];
            for part in walk_children(self, node) {
                out.extend(part);
            }
            out
        }

        fn compose(&self, _node: &Node, parts: Vec<Vec<String>>) -> Vec<String> {
            let mut out = vec!["<fallback>".to_string()];
            out.extend(parts.into_iter().flatten());
            out
        }

        fn text(&self, text: &str) -> Vec<String> {
            vec![format!("<text:{text}>")]
        }

        fn empty(&self) -> Vec<String> {
            Vec::new()
        }
    }

    fn unknown(kind: &str, content: Vec<Node>, text: Option<&str>) -> Node {
        Node::Unknown {
            kind: kind.to_string(),
            attrs: Attrs::new(),
            content,
            text: text.map(str::to_string),
        }
    }

    #[test]
    fn test_pre_order_traversal() {
        let doc = Node::Doc(vec![
            Node::paragraph("a"),
            Node::BulletList(vec![Node::ListItem(vec![Node::paragraph("b")])]),
        ]);
        assert_eq!(
            walk(&TypeCollector, &doc),
            vec!["doc", "paragraph", "text", "bulletList", "listItem", "paragraph", "text"]
        );
    }

    #[test]
    fn test_unknown_with_children_is_composed() {
        let node = unknown("callout", vec![Node::paragraph("x")], None);
        assert_eq!(
            walk(&TypeCollector, &node),
            vec!["<fallback>", "paragraph", "text"]
        );
    }

    #[test]
    fn test_unknown_with_text_yields_text() {
        let node = unknown("mention", vec![], Some("@ana"));
        assert_eq!(walk(&TypeCollector, &node), vec!["<text:@ana>"]);
    }

    #[test]
    fn test_empty_unknown_yields_nothing() {
        let node = unknown("widget", vec![], None);
        assert!(walk(&TypeCollector, &node).is_empty());
    }
}

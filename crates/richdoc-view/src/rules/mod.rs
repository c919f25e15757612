//! Rule registry for host-provided node renderers.
//!
//! Custom rules are checked before the built-in mapping, so a host can render
//! its own node types (or restyle known ones) without touching the renderer.

mod rule;

pub use rule::{Filter, RenderFn, Rule};

use indexmap::IndexMap;
use richdoc_core::Node;

use crate::service::ViewOptions;

/// Collection of custom rules and remove filters
#[derive(Default)]
pub struct Rules {
    /// Custom rules added by the host, checked in insertion order
    custom_rules: IndexMap<String, Rule>,
    /// Remove rules (render nothing)
    remove_rules: Vec<Filter>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom rule. A rule with the same key is replaced in place.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Render nothing for nodes matching `filter`
    pub fn remove(&mut self, filter: impl Into<Filter>) {
        self.remove_rules.push(filter.into());
    }

    /// Find the custom rule for a node
    pub fn for_node<'a>(&'a self, node: &Node, options: &ViewOptions) -> Option<&'a Rule> {
        self.custom_rules
            .values()
            .find(|rule| rule.filter.matches(node, options))
    }

    /// Check if a node should be removed. A matching custom rule wins.
    pub fn should_remove(&self, node: &Node, options: &ViewOptions) -> bool {
        if self.for_node(node, options).is_some() {
            return false;
        }
        self.remove_rules
            .iter()
            .any(|filter| filter.matches(node, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;

    fn callout() -> Node {
        Node::Unknown {
            kind: "callout".to_string(),
            attrs: Default::default(),
            content: vec![Node::paragraph("note")],
            text: None,
        }
    }

    #[test]
    fn test_custom_rule_lookup() {
        let mut rules = Rules::new();
        rules.add(
            "callout",
            Rule::for_type("callout", |_, children, _| {
                Element::tag("aside").with_children(children)
            }),
        );

        let options = ViewOptions::default();
        assert!(rules.for_node(&callout(), &options).is_some());
        assert!(rules.for_node(&Node::paragraph("x"), &options).is_none());
    }

    #[test]
    fn test_same_key_replaces_rule() {
        let mut rules = Rules::new();
        rules.add("a", Rule::for_type("callout", |_, _, _| Element::tag("aside")));
        rules.add("a", Rule::for_type("callout", |_, _, _| Element::tag("section")));

        let options = ViewOptions::default();
        let rule = rules.for_node(&callout(), &options).unwrap();
        assert_eq!(rule.render(&callout(), vec![], &options).tag_name(), Some("section"));
    }

    #[test]
    fn test_predicate_filter() {
        let filter = Filter::predicate(|node, _| node.children().len() > 1);
        let options = ViewOptions::default();
        assert!(!filter.matches(&Node::paragraph("one"), &options));
        let two = Node::Paragraph(vec![Node::text("a"), Node::text("b")]);
        assert!(filter.matches(&two, &options));
    }

    #[test]
    fn test_custom_rule_overrides_remove() {
        let mut rules = Rules::new();
        rules.remove(&["callout", "youtube"][..]);
        let options = ViewOptions::default();
        assert!(rules.should_remove(&callout(), &options));

        rules.add("callout", Rule::for_type("callout", |_, _, _| Element::tag("aside")));
        assert!(!rules.should_remove(&callout(), &options));
    }
}

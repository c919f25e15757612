//! Rule and Filter types for custom node rendering.

use richdoc_core::Node;

use crate::element::Element;
use crate::service::ViewOptions;

/// Builds the element for a matched node from the node, its rendered
/// children and the active options
pub type RenderFn = Box<dyn Fn(&Node, Vec<Element>, &ViewOptions) -> Element + Send + Sync>;

/// Selects the nodes a rule or removal applies to
pub enum Filter {
    /// Any of these node types, as written in the JSON `type` field
    Types(Vec<String>),
    /// Arbitrary test on the node
    Predicate(Box<dyn Fn(&Node, &ViewOptions) -> bool + Send + Sync>),
}

impl Filter {
    pub fn node_type(name: &str) -> Self {
        Filter::Types(vec![name.to_string()])
    }

    pub fn node_types(names: &[&str]) -> Self {
        Filter::Types(names.iter().map(|name| name.to_string()).collect())
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&Node, &ViewOptions) -> bool + Send + Sync + 'static,
    {
        Filter::Predicate(Box::new(f))
    }

    pub fn matches(&self, node: &Node, options: &ViewOptions) -> bool {
        match self {
            Filter::Types(types) => types.iter().any(|t| t == node.type_name()),
            Filter::Predicate(f) => f(node, options),
        }
    }
}

impl From<&str> for Filter {
    fn from(name: &str) -> Self {
        Filter::node_type(name)
    }
}

impl From<&[&str]> for Filter {
    fn from(names: &[&str]) -> Self {
        Filter::node_types(names)
    }
}

/// A host-provided renderer and the nodes it handles
pub struct Rule {
    pub filter: Filter,
    pub render: RenderFn,
}

impl Rule {
    pub fn new<F>(filter: impl Into<Filter>, render: F) -> Self
    where
        F: Fn(&Node, Vec<Element>, &ViewOptions) -> Element + Send + Sync + 'static,
    {
        Self {
            filter: filter.into(),
            render: Box::new(render),
        }
    }

    /// Shorthand for a rule on a single node type
    pub fn for_type<F>(node_type: &str, render: F) -> Self
    where
        F: Fn(&Node, Vec<Element>, &ViewOptions) -> Element + Send + Sync + 'static,
    {
        Self::new(node_type, render)
    }

    pub fn render(&self, node: &Node, children: Vec<Element>, options: &ViewOptions) -> Element {
        (self.render)(node, children, options)
    }
}

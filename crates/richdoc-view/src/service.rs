//! ViewService - the main entry point for rendering stored documents.

use richdoc_core::{parse_document, MarkOrder, Node};

use crate::element::Element;
use crate::render::ViewRenderer;
use crate::rules::{Filter, Rule, Rules};

/// Options for the view renderer
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Nesting order for overlapping marks
    pub mark_order: MarkOrder,

    /// Message shown in place of a document that cannot be parsed
    pub unparseable_message: String,

    /// Prefix for YouTube iframe sources; the video id is appended
    pub youtube_embed_base: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            mark_order: MarkOrder::Authored,
            unparseable_message: "This content could not be displayed.".to_string(),
            youtube_embed_base: "https://www.youtube.com/embed/".to_string(),
        }
    }
}

/// The main service for rendering document trees into elements
#[derive(Default)]
pub struct ViewService {
    options: ViewOptions,
    rules: Rules,
}

impl ViewService {
    /// Create a new ViewService with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ViewService with custom options
    pub fn with_options(options: ViewOptions) -> Self {
        Self {
            options,
            rules: Rules::new(),
        }
    }

    /// Render a document tree. `None` when the root itself renders nothing,
    /// e.g. an image without `src`.
    pub fn render(&self, node: &Node) -> Option<Element> {
        ViewRenderer::new(&self.options, &self.rules).render(node)
    }

    /// Render a stored JSON document. Input that does not parse yields the
    /// unparseable-content element instead of an error.
    pub fn render_json(&self, json: &str) -> Element {
        match parse_document(json) {
            Ok(node) => self.render(&node).unwrap_or_else(|| {
                Element::tag_with_attrs("div", vec![("class", "rich-document")])
            }),
            Err(_) => self.unparseable(),
        }
    }

    /// Render a stored JSON document straight to HTML
    pub fn render_html(&self, json: &str) -> String {
        self.render_json(json).to_html()
    }

    /// The element shown in place of a document that cannot be parsed
    pub fn unparseable(&self) -> Element {
        Element::tag_with_attrs(
            "div",
            vec![("class", "rich-document unparseable"), ("role", "alert")],
        )
        .with_child(Element::tag("p").with_child(Element::text(&self.options.unparseable_message)))
    }

    /// Get the current options
    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut ViewOptions {
        &mut self.options
    }

    /// Register a custom renderer, checked before the built-in mapping
    pub fn add_rule(&mut self, key: &str, rule: Rule) -> &mut Self {
        self.rules.add(key, rule);
        self
    }

    /// Render nothing for nodes matching `filter` (a type name, a list of
    /// type names or a [`Filter`])
    pub fn remove(&mut self, filter: impl Into<Filter>) -> &mut Self {
        self.rules.remove(filter);
        self
    }
}

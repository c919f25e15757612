//! Document tree to element tree.

use once_cell::sync::Lazy;
use regex::Regex;
use richdoc_core::walk::{fallback, walk, walk_children, Visitor};
use richdoc_core::{apply_marks, Mark, Node};
use tracing::debug;

use crate::element::{Component, Element};
use crate::rules::Rules;
use crate::sanitize::{safe_color, safe_url};
use crate::service::ViewOptions;

/// Class names for heading levels 1 to 4. Deeper levels use the last entry.
const HEADING_SIZES: [&str; 4] = ["heading-xl", "heading-lg", "heading-md", "heading-sm"];

/// Video id in watch, short, embed and shorts URLs
static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/|shorts/)|youtu\.be/)([A-Za-z0-9_-]{6,})",
    )
    .unwrap()
});

pub(crate) struct ViewRenderer<'a> {
    options: &'a ViewOptions,
    rules: &'a Rules,
}

impl<'a> ViewRenderer<'a> {
    pub(crate) fn new(options: &'a ViewOptions, rules: &'a Rules) -> Self {
        Self { options, rules }
    }

    pub(crate) fn render(&self, node: &Node) -> Option<Element> {
        walk(self, node)
    }

    fn children(&self, node: &Node) -> Vec<Element> {
        walk_children(self, node).into_iter().flatten().collect()
    }

    fn container(&self, tag: &str, node: &Node) -> Element {
        Element::tag(tag).with_children(self.children(node))
    }

    fn heading(&self, level: u8, node: &Node) -> Element {
        let level = level.clamp(1, 6);
        let size = HEADING_SIZES[usize::from(level.min(4)) - 1];
        self.container(&format!("h{}", level), node)
            .with_attr("class", size)
    }

    /// Header and data cells share layout; only the tag differs
    fn render_cell(&self, node: &Node, is_header: bool) -> Element {
        let tag = if is_header { "th" } else { "td" };
        let mut cell = self.container(tag, node).with_attr("class", "table-cell");
        if is_header {
            cell.set_attr("scope", "col");
        }
        cell
    }

    fn task_item(&self, checked: bool, node: &Node) -> Element {
        let mut checkbox =
            Element::tag_with_attrs("input", vec![("type", "checkbox"), ("disabled", "")]);
        if checked {
            checkbox.set_attr("checked", "");
        }

        Element::tag_with_attrs("li", vec![("class", "task-item")])
            .with_attr("data-checked", if checked { "true" } else { "false" })
            .with_child(Element::tag("label").with_child(checkbox))
            .with_child(self.container("div", node))
    }

    fn marked_text(&self, text: &str, marks: &[Mark]) -> Element {
        apply_marks(
            Element::text(text),
            marks,
            self.options.mark_order,
            wrap_mark,
        )
    }

    /// Only recognized video URLs are embedded
    fn youtube(&self, src: &str) -> Option<Element> {
        let src = safe_url(src)?;
        let Some(caps) = YOUTUBE_ID.captures(src) else {
            debug!(%src, "no video id in youtube src");
            return None;
        };
        Some(Element::Component(Component::Youtube {
            src: src.to_string(),
            embed_url: format!("{}{}", self.options.youtube_embed_base, &caps[1]),
        }))
    }
}

impl Visitor for ViewRenderer<'_> {
    type Output = Option<Element>;

    fn visit(&self, node: &Node) -> Option<Element> {
        if self.rules.should_remove(node, self.options) {
            return None;
        }
        if let Some(rule) = self.rules.for_node(node, self.options) {
            let children = self.children(node);
            return Some(rule.render(node, children, self.options));
        }

        let element = match node {
            Node::Doc(_) => self
                .container("div", node)
                .with_attr("class", "rich-document"),
            Node::Paragraph(_) => self.container("p", node),
            Node::Heading { level, .. } => self.heading(*level, node),
            Node::BulletList(_) => self.container("ul", node),
            Node::OrderedList { start, .. } => {
                let mut list = self.container("ol", node);
                if *start != 1 {
                    list.set_attr("start", &start.to_string());
                }
                list
            }
            Node::ListItem(_) => self.container("li", node),
            Node::TaskList(_) => self.container("ul", node).with_attr("class", "task-list"),
            Node::TaskItem { checked, .. } => self.task_item(*checked, node),
            Node::Blockquote(_) => self.container("blockquote", node),
            Node::CodeBlock { language, .. } => Element::Component(Component::CodeBlock {
                language: language.clone(),
                code: node.text_content(),
            }),
            Node::HorizontalRule => Element::tag("hr"),
            Node::HardBreak => Element::tag("br"),
            Node::Table(_) => Element::tag("table")
                .with_child(Element::tag("tbody").with_children(self.children(node))),
            Node::TableRow(_) => self.container("tr", node),
            Node::TableHeader(_) => self.render_cell(node, true),
            Node::TableCell(_) => self.render_cell(node, false),
            Node::Image { src, alt, title } => match src.as_deref().and_then(safe_url) {
                Some(src) => Element::Component(Component::Image {
                    src: src.to_string(),
                    alt: alt.clone(),
                    title: title.clone(),
                }),
                None => {
                    debug!("image without usable src");
                    return None;
                }
            },
            Node::Youtube { src } => match src {
                Some(src) => return self.youtube(src),
                None => {
                    debug!("youtube embed without src");
                    return None;
                }
            },
            Node::Link { href, .. } => {
                let mut link = self.container("a", node);
                if let Some(href) = href.as_deref().and_then(safe_url) {
                    link.set_attr("href", href);
                }
                link
            }
            Node::Text { text, marks } => self.marked_text(text, marks),
            Node::Unknown { .. } => return fallback(self, node),
        };

        Some(element)
    }

    /// Unknown containers render as paragraphs
    fn compose(&self, _node: &Node, parts: Vec<Option<Element>>) -> Option<Element> {
        Some(Element::tag("p").with_children(parts.into_iter().flatten().collect()))
    }

    fn text(&self, text: &str) -> Option<Element> {
        Some(Element::text(text))
    }

    fn empty(&self) -> Option<Element> {
        None
    }
}

/// Wrap already rendered content in the element for one mark
fn wrap_mark(mark: &Mark, inner: Element) -> Element {
    let tag = match mark {
        Mark::Bold => "strong",
        Mark::Italic => "em",
        Mark::Underline => "u",
        Mark::Strike => "s",
        Mark::Code => "code",
        Mark::Subscript => "sub",
        Mark::Superscript => "sup",
        Mark::Highlight { color } => {
            let mut el = Element::tag("mark").with_child(inner);
            if let Some(color) = color.as_deref().and_then(safe_color) {
                el.set_attr("style", &format!("background-color: {}", color));
            }
            return el;
        }
        Mark::TextStyle { color } => {
            return match color.as_deref().and_then(safe_color) {
                Some(color) => Element::tag("span")
                    .with_attr("style", &format!("color: {}", color))
                    .with_child(inner),
                None => inner,
            };
        }
        Mark::Link { href, target, rel } => {
            // An unusable href leaves the text unlinked
            let Some(href) = safe_url(href) else {
                return inner;
            };
            let mut el = Element::tag_with_attrs("a", vec![("href", href)]);
            if let Some(target) = target {
                el.set_attr("target", target);
            }
            if let Some(rel) = rel {
                el.set_attr("rel", rel);
            }
            return el.with_child(inner);
        }
        Mark::Unknown { kind, .. } => {
            debug!(mark_type = %kind, "unknown mark left unstyled");
            return inner;
        }
    };

    Element::tag(tag).with_child(inner)
}

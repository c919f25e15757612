//! Presentable element tree.
//!
//! The view renderer produces these elements; a host page either walks them
//! with its own widget toolkit or writes them out with [`Element::to_html`].
//! Code blocks and media are left as [`Component`]s so the host can swap in
//! its own presentation units.

use indexmap::IndexMap;

/// A node of the rendered view
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Markup element with attributes and children
    Tag {
        name: String,
        attrs: IndexMap<String, String>,
        children: Vec<Element>,
    },

    /// Literal text, escaped on output
    Text(String),

    /// Presentation unit provided by the host
    Component(Component),
}

/// Presentation units delegated to the host page
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// Code display with a copy-to-clipboard action
    CodeBlock {
        language: Option<String>,
        code: String,
    },

    Image {
        src: String,
        alt: Option<String>,
        title: Option<String>,
    },

    /// Embedded player; `embed_url` is the iframe source derived from `src`
    Youtube { src: String, embed_url: String },
}

impl Element {
    /// Create an element with no attributes
    pub fn tag(name: &str) -> Self {
        Element::Tag {
            name: name.to_lowercase(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Create an element with attributes
    pub fn tag_with_attrs(name: &str, attrs: Vec<(&str, &str)>) -> Self {
        Element::Tag {
            name: name.to_lowercase(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children: Vec::new(),
        }
    }

    /// Create a text element
    pub fn text(content: &str) -> Self {
        Element::Text(content.to_string())
    }

    /// Tag name for markup elements
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Element::Tag { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            Element::Tag { attrs, .. } => attrs.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Set an attribute. Ignored on text and components.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Element::Tag { attrs, .. } = self {
            attrs.insert(name.to_string(), value.to_string());
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Child elements; empty for text and components
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Tag { children, .. } => children,
            _ => &[],
        }
    }

    /// Add a child. Ignored on text and components.
    pub fn add_child(&mut self, child: Element) {
        if let Element::Tag { children, .. } = self {
            children.push(child);
        }
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_children(mut self, new_children: Vec<Element>) -> Self {
        if let Element::Tag { children, .. } = &mut self {
            children.extend(new_children);
        }
        self
    }

    /// All text content of this element and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Element::Text(text) => text.clone(),
            Element::Tag { children, .. } => children
                .iter()
                .map(|child| child.text_content())
                .collect::<Vec<_>>()
                .join(""),
            Element::Component(Component::CodeBlock { code, .. }) => code.clone(),
            Element::Component(_) => String::new(),
        }
    }

    /// Write this element as HTML
    pub fn to_html(&self) -> String {
        match self {
            Element::Text(text) => escape_html(text),
            Element::Tag { name, attrs, .. } => {
                let attrs = attributes_string(attrs);
                let open = if attrs.is_empty() {
                    format!("<{}>", name)
                } else {
                    format!("<{} {}>", name, attrs)
                };

                if is_void_element(name) {
                    open
                } else {
                    format!("{}{}</{}>", open, self.inner_html(), name)
                }
            }
            Element::Component(component) => component.to_html(),
        }
    }

    /// Write the children of this element as HTML
    pub fn inner_html(&self) -> String {
        self.children()
            .iter()
            .map(|child| child.to_html())
            .collect::<Vec<_>>()
            .join("")
    }
}

impl Component {
    /// Default markup for hosts without their own presentation units
    pub fn to_html(&self) -> String {
        match self {
            Component::CodeBlock { language, code } => {
                let mut code_el = Element::tag("code");
                if let Some(lang) = language {
                    code_el.set_attr("class", &format!("language-{}", lang));
                }
                Element::tag_with_attrs("div", vec![("class", "code-block")])
                    .with_child(
                        Element::tag_with_attrs(
                            "button",
                            vec![
                                ("type", "button"),
                                ("class", "copy-button"),
                                ("data-copy", code.as_str()),
                            ],
                        )
                        .with_child(Element::text("Copy")),
                    )
                    .with_child(
                        Element::tag("pre").with_child(code_el.with_child(Element::text(code))),
                    )
                    .to_html()
            }
            Component::Image { src, alt, title } => {
                let mut img = Element::tag_with_attrs("img", vec![("src", src.as_str())]);
                img.set_attr("alt", alt.as_deref().unwrap_or(""));
                if let Some(title) = title {
                    img.set_attr("title", title);
                }
                img.set_attr("loading", "lazy");
                img.to_html()
            }
            Component::Youtube { embed_url, .. } => Element::tag_with_attrs(
                "div",
                vec![("class", "video-embed"), ("data-youtube-video", "")],
            )
            .with_child(Element::tag_with_attrs(
                "iframe",
                vec![
                    ("src", embed_url.as_str()),
                    ("frameborder", "0"),
                    ("allowfullscreen", ""),
                ],
            ))
            .to_html(),
        }
    }
}

fn attributes_string(attrs: &IndexMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(name, value)| {
            if value.is_empty() {
                name.clone()
            } else {
                format!("{}=\"{}\"", name, escape_html_attr(value))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_void_element(tag: &str) -> bool {
    const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "source", "wbr"];
    VOID_ELEMENTS.contains(&tag)
}

/// Escape HTML text content
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tag() {
        let el = Element::tag("DIV");
        assert_eq!(el.tag_name(), Some("div"));
        assert!(el.children().is_empty());
    }

    #[test]
    fn test_attributes() {
        let el = Element::tag_with_attrs(
            "a",
            vec![("href", "https://example.com"), ("rel", "noopener")],
        );
        assert_eq!(el.attr("href"), Some("https://example.com"));
        assert_eq!(el.attr("rel"), Some("noopener"));
        assert_eq!(el.attr("class"), None);
    }

    #[test]
    fn test_text_content() {
        let el = Element::tag("p")
            .with_child(Element::text("Hello "))
            .with_child(Element::tag("strong").with_child(Element::text("World")));
        assert_eq!(el.text_content(), "Hello World");
    }

    #[test]
    fn test_to_html_escapes() {
        let el = Element::tag_with_attrs("a", vec![("href", "/?a=1&b=\"2\"")])
            .with_child(Element::text("<Link>"));
        assert_eq!(
            el.to_html(),
            "<a href=\"/?a=1&amp;b=&quot;2&quot;\">&lt;Link&gt;</a>"
        );
    }

    #[test]
    fn test_void_element_html() {
        assert_eq!(Element::tag("br").to_html(), "<br>");
        let input = Element::tag_with_attrs("input", vec![("type", "checkbox"), ("disabled", "")]);
        assert_eq!(input.to_html(), "<input type=\"checkbox\" disabled>");
    }

    #[test]
    fn test_code_block_component_html() {
        let el = Element::Component(Component::CodeBlock {
            language: Some("rust".to_string()),
            code: "a < b".to_string(),
        });
        let html = el.to_html();
        assert!(html.contains("<code class=\"language-rust\">a &lt; b</code>"));
        assert!(html.contains("data-copy=\"a &lt; b\""));
        assert_eq!(el.text_content(), "a < b");
    }

    #[test]
    fn test_image_component_html() {
        let el = Element::Component(Component::Image {
            src: "a.png".to_string(),
            alt: Some("Alt".to_string()),
            title: None,
        });
        assert_eq!(
            el.to_html(),
            "<img src=\"a.png\" alt=\"Alt\" loading=\"lazy\">"
        );
    }
}

//! # richdoc-view
//!
//! Render rich document trees into presentable element trees.
//!
//! ## Design
//!
//! The renderer walks a [`richdoc_core::Node`] tree and builds an [`Element`]
//! tree that a host page can embed:
//!
//! - **Markup elements** for blocks, lists, tables and marks
//! - **Components** for code blocks, images and video embeds, so the host can
//!   provide its own presentation units
//! - **Custom rules** registered on the service are checked first, which is
//!   how hosts render node types this crate does not know
//!
//! Rendering stored JSON never fails: a document that does not parse renders
//! as an explicit "unparseable content" element.
//!
//! ## Example
//!
//! ```rust
//! use richdoc_view::ViewService;
//!
//! let service = ViewService::new();
//! let json = r#"{"type":"doc","content":[
//!     {"type":"paragraph","content":[{"type":"text","text":"Hi","marks":[{"type":"bold"}]}]}
//! ]}"#;
//!
//! let html = service.render_html(json);
//! assert_eq!(html, "<div class=\"rich-document\"><p><strong>Hi</strong></p></div>");
//! ```

pub mod element;
mod render;
pub mod rules;
mod sanitize;
mod service;

pub use element::{Component, Element};
pub use rules::{Filter, Rule, Rules};
pub use service::{ViewOptions, ViewService};

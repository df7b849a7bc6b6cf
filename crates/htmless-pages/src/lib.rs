//! # htmless-pages
//!
//! A virtual document tree and streaming serializer for server-side HTML,
//! without a browser DOM.
//!
//! The crate is built around three pieces:
//!
//! - [`PageNode`]: an element-like tree node owning attributes, classes,
//!   inline styles, children and text.
//! - The streaming serializer ([`PageNode::output_stream`]): a single-pass
//!   preorder walk that hands the caller one text fragment at a time, so a
//!   document can be written straight to a transport without ever being
//!   buffered as one string.
//! - [`PageBuilder`]: a session-scoped cursor over the tree with a fluent
//!   mutation surface and a default-callback hook applied to every newly
//!   created element (see [`exponent`] for the stock callback).
//!
//! ## Example
//!
//! ```
//! use htmless_pages::{PageBuilder, exponent};
//!
//! let mut ssr = PageBuilder::new();
//! ssr.register_default(exponent);
//!
//! let body = ssr.create("body").element();
//! ssr.create_with("div", Some("menu"), &[]).mount(&body);
//!
//! let mut html = String::new();
//! ssr.output_stream(&mut |chunk| html.push_str(chunk)).unwrap();
//! assert!(html.contains("exponent-div"));
//! ```
//!
//! ## Escaping
//!
//! Nothing is escaped. Ids, class names, attribute values, style entries and
//! text content are emitted verbatim. This is a deliberate limitation: the
//! crate targets trusted, server-generated content, and callers that embed
//! untrusted input must escape it themselves.

pub mod builder;
pub mod class_list;
pub mod css;
pub mod error;
pub mod exponent;
pub mod node;

pub use builder::{DefaultCallback, PageBuilder};
pub use class_list::ClassList;
pub use css::{StyleMap, StyleRule, StyleSheet, StyleSpec, format_declarations};
pub use error::{PagesError, Result};
pub use exponent::{EXPONENT_CLASS_MAP, exponent};
pub use node::PageNode;

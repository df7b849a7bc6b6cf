//! # htmless
//!
//! Streaming virtual-document builder for server-side HTML.
//!
//! htmless models an HTML-like tree without a browser DOM and serializes it
//! as a sequence of text fragments instead of one buffered string, so a
//! document can be written straight to a transport as it is walked. A
//! stateful fluent builder drives construction, with a default-callback hook
//! for cross-cutting mutations at element creation time.
//!
//! This crate is a thin facade over the workspace members:
//!
//! - [`pages`] - the tree, serializer and builder (`htmless-pages`)
//! - `htmless-server` - a file-serving demo that streams directory-listing
//!   pages (binary crate, not re-exported)
//!
//! ## Example
//!
//! ```
//! use htmless::{PageBuilder, exponent};
//!
//! let mut ssr = PageBuilder::new();
//! ssr.register_default(exponent);
//!
//! let body = ssr.create("body").element();
//! ssr.create_with("span", Some("greeting"), &[])
//!     .text_content("hello")
//!     .mount(&body);
//!
//! ssr.output_stream(&mut |chunk| print!("{chunk}")).unwrap();
//! ```

pub use htmless_pages as pages;

pub use htmless_pages::{
	ClassList, DefaultCallback, EXPONENT_CLASS_MAP, PageBuilder, PageNode, PagesError, Result,
	StyleMap, StyleRule, StyleSheet, StyleSpec, exponent, format_declarations,
};

pub use htmless_pages::{style_map, stylesheet};

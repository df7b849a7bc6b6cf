//! Exponent: fixed framework classes injected at element creation time.

use crate::builder::PageBuilder;

/// Tag name to classes applied by [`exponent`]. Tags not listed here get
/// nothing.
pub const EXPONENT_CLASS_MAP: &[(&str, &[&str])] = &[
	("div", &["exponent", "exponent-div"]),
	("button", &["exponent", "exponent-button"]),
	("canvas", &["exponent", "exponent-canvas"]),
	("input", &["exponent", "exponent-input"]),
	("body", &["exponent", "exponent-body"]),
	("span", &["exponent"]),
];

/// Default-callback adding the Exponent classes for the current element's
/// tag name. A silent no-op for tags outside [`EXPONENT_CLASS_MAP`].
///
/// Register it once per session:
///
/// ```
/// use htmless_pages::{PageBuilder, exponent};
///
/// let mut ssr = PageBuilder::new();
/// ssr.register_default(exponent);
/// ssr.create("button");
/// assert!(ssr.element().has_class("exponent-button"));
/// ```
pub fn exponent(ui: &mut PageBuilder) {
	let Some(node) = ui.current_node() else {
		return;
	};
	let tag = node.tag_name().to_owned();
	let Some((_, classes)) = EXPONENT_CLASS_MAP.iter().find(|(name, _)| *name == tag) else {
		return;
	};
	ui.classes(classes.iter().copied());
}

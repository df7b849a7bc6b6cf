//! The fluent builder session.
//!
//! A [`PageBuilder`] is a cursor over one virtual document tree: it owns the
//! root reference (fixed on the first `create` of a session), the "current"
//! element every mutator targets, and the set of default-callbacks applied to
//! each newly created element. Sessions are sequential and single-threaded;
//! concurrent renders each need their own builder (or a full `clear` between
//! them).

use std::ptr;

use crate::css::{StyleSpec, format_declarations};
use crate::error::{PagesError, Result};
use crate::node::PageNode;

/// A callback invoked on the builder after every element creation.
///
/// Callbacks run synchronously, in registration order, and see the freshly
/// created element as the builder's current element. They are the hook for
/// cross-cutting mutations such as the [`exponent`](crate::exponent)
/// class injector.
pub type DefaultCallback = fn(&mut PageBuilder);

/// Session-scoped fluent builder over a [`PageNode`] tree.
///
/// A session is either empty (no root, no current element) or building (root
/// fixed, current element retargetable via [`ref_node`](Self::ref_node)).
/// [`clear`](Self::clear) returns to the empty state from anywhere and drops
/// the registered default-callbacks with it.
///
/// ## Example
///
/// ```
/// use htmless_pages::{PageBuilder, style_map};
///
/// let mut ssr = PageBuilder::new();
/// let body = ssr.create("body").element();
/// ssr.create_with("div", Some("menu"), &["menu-bar"])
///     .style(style_map! { "flex" => "1" })
///     .mount(&body);
///
/// let html = ssr.render_to_string().unwrap();
/// assert_eq!(
///     html,
///     "<body ><div id=\"menu\"  class=\"menu-bar \" style=\"flex:1;\" ></div></body>"
/// );
/// ```
#[derive(Default)]
pub struct PageBuilder {
	root: Option<PageNode>,
	current: Option<PageNode>,
	default_callbacks: Vec<DefaultCallback>,
}

impl PageBuilder {
	/// Creates an empty session.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a default-callback. Registering the same function twice is
	/// a no-op; callbacks run in registration order.
	pub fn register_default(&mut self, callback: DefaultCallback) -> &mut Self {
		// address comparison via fn_addr_eq: plain `==` on fn pointers is
		// unreliable across codegen units
		if !self
			.default_callbacks
			.iter()
			.any(|cb| ptr::fn_addr_eq(*cb, callback))
		{
			self.default_callbacks.push(callback);
		}
		self
	}

	/// Unregisters a previously registered default-callback. Unknown
	/// callbacks are ignored.
	pub fn unregister_default(&mut self, callback: DefaultCallback) -> &mut Self {
		self.default_callbacks
			.retain(|cb| !ptr::fn_addr_eq(*cb, callback));
		self
	}

	/// Resets the session: root, current element and all registered
	/// default-callbacks are discarded.
	pub fn clear(&mut self) -> &mut Self {
		self.root = None;
		self.current = None;
		self.default_callbacks.clear();
		self
	}

	/// Creates a new element and makes it current. Shorthand for
	/// [`create_with`](Self::create_with) without id or classes.
	pub fn create(&mut self, tag: impl Into<String>) -> &mut Self {
		self.create_with(tag, None, &[])
	}

	/// Creates a new element with an optional id and initial classes, and
	/// makes it the current element.
	///
	/// The first element created in a session becomes the root; later
	/// creations leave the root untouched. Caller-supplied classes are
	/// applied before the registered default-callbacks run, so injected
	/// classes land after them in the class list.
	pub fn create_with(
		&mut self,
		tag: impl Into<String>,
		id: Option<&str>,
		class_names: &[&str],
	) -> &mut Self {
		let node = PageNode::new(tag);
		if let Some(id) = id {
			node.set_id(id);
		}

		self.current = Some(node.clone());
		if self.root.is_none() {
			self.root = Some(node);
		}

		if !class_names.is_empty() {
			self.classes(class_names.iter().copied());
		}

		let mut index = 0;
		while index < self.default_callbacks.len() {
			let callback = self.default_callbacks[index];
			callback(self);
			index += 1;
		}

		self
	}

	/// The current element, if any.
	pub fn current_node(&self) -> Option<&PageNode> {
		self.current.as_ref()
	}

	/// The session root, if any.
	pub fn root_node(&self) -> Option<&PageNode> {
		self.root.as_ref()
	}

	/// A handle to the current element.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn element(&self) -> PageNode {
		self.require_current().clone()
	}

	fn require_current(&self) -> &PageNode {
		self.current
			.as_ref()
			.expect("no current element: create() must be called before mutating the session")
	}

	/// Adds classes to the current element.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn classes<I, S>(&mut self, classes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.require_current().add_classes(classes);
		self
	}

	/// Removes classes from the current element.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn classes_remove<I, S>(&mut self, classes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.require_current().remove_classes(classes);
		self
	}

	/// Sets the current element's id.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn id(&mut self, id: impl Into<String>) -> &mut Self {
		self.require_current().set_id(id);
		self
	}

	/// Replaces the current element's text content.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn text_content(&mut self, text: impl Into<String>) -> &mut Self {
		self.require_current().set_text_content(text);
		self
	}

	/// Sets attributes on the current element from a key/value mapping, one
	/// `set_attribute` per entry, in iteration order.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn attrs<I, K, V>(&mut self, attrs: I) -> &mut Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let node = self.require_current();
		for (key, value) in attrs {
			node.set_attribute(key, value);
		}
		self
	}

	/// Returns whether the current element has the given attribute.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn has_attr(&self, name: &str) -> bool {
		self.require_current().has_attribute(name)
	}

	/// Removes an attribute from the current element.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn remove_attr(&mut self, name: &str) -> &mut Self {
		self.require_current().remove_attribute(name);
		self
	}

	/// Appends the current element as a child of `parent`. The element is
	/// detached from any previous parent first; no cycle check is made.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn mount(&mut self, parent: &PageNode) -> &mut Self {
		parent.append_child(self.require_current());
		self
	}

	/// Detaches the current element from its parent, if it has one.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn unmount(&mut self) -> &mut Self {
		self.require_current().remove();
		self
	}

	/// Repoints the current element at an arbitrary existing node. The root
	/// is unaffected.
	pub fn ref_node(&mut self, node: &PageNode) -> &mut Self {
		self.current = Some(node.clone());
		self
	}

	/// Applies styling to the current element.
	///
	/// Two modes, picked from the current element's tag name:
	///
	/// - On a `style` element, a [`StyleSheet`](crate::StyleSheet) is
	///   formatted (plain rules via [`format_declarations`], `@keyframes`
	///   blocks frame by frame) and *appended* to the element's text
	///   content, so repeated calls accumulate.
	/// - On any other element, a [`StyleMap`](crate::StyleMap) is merged
	///   into the inline style map, last write wins per property.
	///
	/// Passing the wrong shape for the current tag (a sheet to a non-`style`
	/// element, inline declarations to a `style` element) is a caller error;
	/// it is logged and ignored.
	///
	/// # Panics
	///
	/// Panics if no element has been created in this session.
	pub fn style(&mut self, spec: impl Into<StyleSpec>) -> &mut Self {
		let node = self.require_current().clone();
		match (node.tag_name() == "style", spec.into()) {
			(true, StyleSpec::Sheet(sheet)) => {
				node.append_text(&sheet.to_css());
			}
			(false, StyleSpec::Inline(declarations)) => {
				node.merge_style(&declarations);
			}
			(true, StyleSpec::Inline(declarations)) => {
				tracing::warn!(
					declarations = %format_declarations(&declarations),
					"inline declarations passed to a <style> element; ignored"
				);
			}
			(false, StyleSpec::Sheet(_)) => {
				tracing::warn!(
					tag = node.tag_name(),
					"stylesheet passed to a non-<style> element; ignored"
				);
			}
		}
		self
	}

	/// Serializes the session's tree through `sink`, delegating to the root
	/// node's [`output_stream`](PageNode::output_stream).
	///
	/// # Errors
	///
	/// Returns [`PagesError::NoRoot`] if the session never created an
	/// element; nothing is emitted in that case.
	pub fn output_stream(&self, sink: &mut dyn FnMut(&str)) -> Result<()> {
		let root = self.root.as_ref().ok_or(PagesError::NoRoot)?;
		root.output_stream(sink);
		Ok(())
	}

	/// Serializes the session's tree into one string.
	///
	/// # Errors
	///
	/// Returns [`PagesError::NoRoot`] if the session never created an
	/// element.
	pub fn render_to_string(&self) -> Result<String> {
		let mut out = String::new();
		self.output_stream(&mut |chunk| out.push_str(chunk))?;
		Ok(out)
	}
}

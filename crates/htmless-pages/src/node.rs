//! The virtual document tree node and its streaming serializer.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::class_list::ClassList;
use crate::css::StyleMap;

/// An element-like node in a virtual document tree.
///
/// `PageNode` is a cheap-clone handle: clones share the same underlying node,
/// and identity is pointer identity ([`PageNode::ptr_eq`]). The tag name is
/// fixed at creation; everything else (id, classes, attributes, inline style,
/// children, text) is mutable through `&self` methods.
///
/// A node holds strong references to its children and a weak back-reference
/// to its parent, so a subtree is released as soon as no root or cursor
/// reference keeps it alive.
pub struct PageNode {
	inner: Rc<NodeInner>,
}

struct NodeInner {
	tag: String,
	state: RefCell<NodeState>,
}

#[derive(Default)]
struct NodeState {
	id: Option<String>,
	class_list: ClassList,
	attributes: IndexMap<String, Option<String>>,
	style: StyleMap,
	children: Vec<PageNode>,
	text: String,
	parent: Weak<NodeInner>,
}

impl Clone for PageNode {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl fmt::Debug for PageNode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.inner.state.borrow();
		f.debug_struct("PageNode")
			.field("tag", &self.inner.tag)
			.field("id", &state.id)
			.field("classes", &state.class_list.len())
			.field("attributes", &state.attributes.len())
			.field("children", &state.children.len())
			.finish()
	}
}

impl PageNode {
	/// Creates a detached node with the given tag name.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(NodeInner {
				tag: tag.into(),
				state: RefCell::new(NodeState::default()),
			}),
		}
	}

	/// The tag name, fixed at creation.
	pub fn tag_name(&self) -> &str {
		&self.inner.tag
	}

	/// Returns whether both handles point at the same node.
	pub fn ptr_eq(&self, other: &PageNode) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// The element id, if set.
	pub fn id(&self) -> Option<String> {
		self.inner.state.borrow().id.clone()
	}

	/// Sets the element id.
	pub fn set_id(&self, id: impl Into<String>) {
		self.inner.state.borrow_mut().id = Some(id.into());
	}

	/// The text content. Empty when never set.
	pub fn text_content(&self) -> String {
		self.inner.state.borrow().text.clone()
	}

	/// Replaces the text content.
	pub fn set_text_content(&self, text: impl Into<String>) {
		self.inner.state.borrow_mut().text = text.into();
	}

	/// Appends `fragment` to the text content, keeping what was there.
	pub fn append_text(&self, fragment: &str) {
		self.inner.state.borrow_mut().text.push_str(fragment);
	}

	/// Sets an attribute, overwriting any previous value. No validation is
	/// performed on either side.
	pub fn set_attribute(&self, key: impl Into<String>, value: impl Into<String>) {
		self.set_attribute_opt(key, Some(value.into()));
	}

	/// Sets an attribute that may have no value. Entries with a `None` value
	/// stay in the map but are skipped by the serializer.
	pub fn set_attribute_opt(&self, key: impl Into<String>, value: Option<String>) {
		self.inner
			.state
			.borrow_mut()
			.attributes
			.insert(key.into(), value);
	}

	/// Returns whether an attribute entry exists for `key`.
	pub fn has_attribute(&self, key: &str) -> bool {
		self.inner.state.borrow().attributes.contains_key(key)
	}

	/// Removes the attribute entry for `key`, if any. Remaining attributes
	/// keep their order.
	pub fn remove_attribute(&self, key: &str) {
		self.inner.state.borrow_mut().attributes.shift_remove(key);
	}

	/// Adds classes to the node's class list.
	pub fn add_classes<I, S>(&self, classes: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.inner.state.borrow_mut().class_list.add(classes);
	}

	/// Removes classes from the node's class list.
	pub fn remove_classes<I, S>(&self, classes: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.inner.state.borrow_mut().class_list.remove(classes);
	}

	/// Returns whether the node carries the given class.
	pub fn has_class(&self, class: &str) -> bool {
		self.inner.state.borrow().class_list.contains(class)
	}

	/// Number of classes on the node.
	pub fn class_count(&self) -> usize {
		self.inner.state.borrow().class_list.len()
	}

	/// Merges declarations into the inline style map, last write wins.
	pub fn merge_style(&self, declarations: &StyleMap) {
		self.inner.state.borrow_mut().style.merge(declarations);
	}

	/// Appends `child` to this node's children.
	///
	/// The child is first detached from any current parent, so a node is in
	/// at most one child list at a time.
	pub fn append_child(&self, child: &PageNode) {
		child.remove();
		self.inner.state.borrow_mut().children.push(child.clone());
		child.inner.state.borrow_mut().parent = Rc::downgrade(&self.inner);
	}

	/// Removes the first identity-match of `child` from this node's
	/// children. A no-op if `child` is not present.
	pub fn remove_child(&self, child: &PageNode) {
		let index = {
			let state = self.inner.state.borrow();
			state.children.iter().position(|c| c.ptr_eq(child))
		};
		if let Some(index) = index {
			self.inner.state.borrow_mut().children.remove(index);
			child.inner.state.borrow_mut().parent = Weak::new();
		}
	}

	/// Detaches this node from its parent, if it has one.
	pub fn remove(&self) {
		if let Some(parent) = self.parent() {
			parent.remove_child(self);
		}
	}

	/// The parent node, if attached.
	pub fn parent(&self) -> Option<PageNode> {
		self.inner
			.state
			.borrow()
			.parent
			.upgrade()
			.map(|inner| PageNode { inner })
	}

	/// Number of direct children.
	pub fn child_count(&self) -> usize {
		self.inner.state.borrow().children.len()
	}

	/// Handles to the direct children, in order.
	pub fn children(&self) -> Vec<PageNode> {
		self.inner.state.borrow().children.clone()
	}

	/// Serializes this node and its subtree through `sink`.
	///
	/// The walk is synchronous, single-pass and preorder; `sink` is invoked
	/// once per fragment, in order, and the document is never accumulated
	/// here. The opening tag's token order is fixed: tag name, id, class
	/// block, attributes in insertion order, style block, `>`.
	///
	/// Format notes, kept for wire compatibility:
	/// - every token inside the opening tag carries a trailing space, and the
	///   class block opens with a leading space (`id="x"  class="a " ...`);
	/// - class names each get a trailing space, including the last;
	/// - attribute entries without a value are skipped;
	/// - text content is emitted verbatim, unescaped.
	pub fn output_stream(&self, sink: &mut dyn FnMut(&str)) {
		let state = self.inner.state.borrow();

		sink(&format!("<{} ", self.inner.tag));

		if let Some(id) = state.id.as_deref().filter(|id| !id.is_empty()) {
			sink(&format!("id=\"{id}\" "));
		}

		if !state.class_list.is_empty() {
			sink(" class=\"");
			for class in state.class_list.iter() {
				sink(&format!("{class} "));
			}
			sink("\" ");
		}

		for (key, value) in &state.attributes {
			let Some(value) = value else { continue };
			sink(&format!("{key}=\"{value}\" "));
		}

		if !state.style.is_empty() {
			sink("style=\"");
			for (property, value) in state.style.iter() {
				sink(&format!("{property}:{value};"));
			}
			sink("\" ");
		}

		sink(">");

		if !state.text.is_empty() {
			sink(&state.text);
		}

		for child in &state.children {
			child.output_stream(sink);
		}

		sink(&format!("</{}>", self.inner.tag));
	}

	/// Serializes the subtree into one string. Convenience over
	/// [`output_stream`](Self::output_stream) for callers that want a buffer.
	pub fn render_to_string(&self) -> String {
		let mut out = String::new();
		self.output_stream(&mut |chunk| out.push_str(chunk));
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_minimal_element() {
		let node = PageNode::new("span");
		assert_eq!(node.render_to_string(), "<span ></span>");
	}

	#[test]
	fn test_opening_tag_token_order() {
		let node = PageNode::new("div");
		node.set_id("main");
		node.add_classes(["a"]);
		node.set_attribute("data-x", "1");
		node.merge_style(&crate::style_map! { "flex" => "1" });
		assert_eq!(
			node.render_to_string(),
			"<div id=\"main\"  class=\"a \" data-x=\"1\" style=\"flex:1;\" ></div>"
		);
	}

	#[test]
	fn test_text_is_emitted_verbatim() {
		let node = PageNode::new("span");
		node.set_text_content("<b>&raw</b>");
		assert_eq!(node.render_to_string(), "<span ><b>&raw</b></span>");
	}

	#[test]
	fn test_empty_id_is_skipped() {
		let node = PageNode::new("div");
		node.set_id("");
		assert_eq!(node.render_to_string(), "<div ></div>");
	}

	#[test]
	fn test_attribute_without_value_is_filtered() {
		let node = PageNode::new("div");
		node.set_attribute("kept", "yes");
		node.set_attribute_opt("dropped", None);
		assert!(node.has_attribute("dropped"));
		assert_eq!(node.render_to_string(), "<div kept=\"yes\" ></div>");
	}

	#[test]
	fn test_attribute_overwrite_keeps_position() {
		let node = PageNode::new("div");
		node.set_attribute("a", "1");
		node.set_attribute("b", "2");
		node.set_attribute("a", "3");
		assert_eq!(node.render_to_string(), "<div a=\"3\" b=\"2\" ></div>");
	}

	#[test]
	fn test_children_serialize_in_order() {
		let parent = PageNode::new("ul");
		for text in ["one", "two", "three"] {
			let child = PageNode::new("li");
			child.set_text_content(text);
			parent.append_child(&child);
		}
		assert_eq!(
			parent.render_to_string(),
			"<ul ><li >one</li><li >two</li><li >three</li></ul>"
		);
	}

	#[test]
	fn test_append_child_reparents() {
		let first = PageNode::new("div");
		let second = PageNode::new("div");
		let child = PageNode::new("span");

		first.append_child(&child);
		assert_eq!(first.child_count(), 1);

		second.append_child(&child);
		assert_eq!(first.child_count(), 0);
		assert_eq!(second.child_count(), 1);
		assert!(child.parent().unwrap().ptr_eq(&second));
	}

	#[test]
	fn test_remove_child_is_idempotent() {
		let parent = PageNode::new("div");
		let child = PageNode::new("span");
		parent.append_child(&child);

		parent.remove_child(&child);
		assert_eq!(parent.child_count(), 0);
		assert!(child.parent().is_none());

		// second removal is a no-op, not an error
		parent.remove_child(&child);
		assert_eq!(parent.child_count(), 0);
	}

	#[test]
	fn test_remove_detaches_self() {
		let parent = PageNode::new("div");
		let child = PageNode::new("span");
		parent.append_child(&child);

		child.remove();
		assert_eq!(parent.child_count(), 0);

		// detached node: remove is a no-op
		child.remove();
		assert!(child.parent().is_none());
	}

	#[test]
	fn test_remove_child_only_matches_identity() {
		let parent = PageNode::new("div");
		let child = PageNode::new("span");
		let lookalike = PageNode::new("span");
		parent.append_child(&child);

		parent.remove_child(&lookalike);
		assert_eq!(parent.child_count(), 1);
	}

	#[test]
	fn test_clone_shares_node() {
		let node = PageNode::new("div");
		let handle = node.clone();
		handle.set_id("shared");
		assert_eq!(node.id().as_deref(), Some("shared"));
		assert!(node.ptr_eq(&handle));
	}

	#[test]
	fn test_output_stream_fragments() {
		let node = PageNode::new("div");
		node.set_id("x");
		let mut fragments = Vec::new();
		node.output_stream(&mut |chunk| fragments.push(chunk.to_owned()));
		assert_eq!(fragments, vec!["<div ", "id=\"x\" ", ">", "</div>"]);
	}
}

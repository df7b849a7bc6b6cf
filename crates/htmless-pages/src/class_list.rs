//! Ordered-unique container for CSS class names.

use indexmap::IndexSet;

/// An ordered set of class names with bulk add/remove.
///
/// Classes are unique per node and iterate in insertion order; re-adding an
/// existing class keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
	entries: IndexSet<String>,
}

impl ClassList {
	/// Creates an empty class list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds every class in `classes`, skipping ones already present.
	pub fn add<I, S>(&mut self, classes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		for class in classes {
			self.entries.insert(class.into());
		}
		self
	}

	/// Removes every class in `classes`; absent ones are ignored.
	///
	/// Uses a shifting removal so the remaining classes keep their order.
	pub fn remove<I, S>(&mut self, classes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for class in classes {
			self.entries.shift_remove(class.as_ref());
		}
		self
	}

	/// Returns whether `class` is present.
	pub fn contains(&self, class: &str) -> bool {
		self.entries.contains(class)
	}

	/// Number of classes in the list.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether the list is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over the classes in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(String::as_str)
	}
}

impl<S: Into<String>> FromIterator<S> for ClassList {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut list = Self::new();
		list.add(iter);
		list
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_add_preserves_insertion_order() {
		let mut list = ClassList::new();
		list.add(["b", "a", "c"]);
		let classes: Vec<&str> = list.iter().collect();
		assert_eq!(classes, vec!["b", "a", "c"]);
	}

	#[test]
	fn test_add_is_idempotent() {
		let mut list = ClassList::new();
		list.add(["a", "b"]);
		list.add(["a"]);
		assert_eq!(list.len(), 2);
		let classes: Vec<&str> = list.iter().collect();
		assert_eq!(classes, vec!["a", "b"]);
	}

	#[test]
	fn test_remove_keeps_order() {
		let mut list = ClassList::new();
		list.add(["a", "b", "c", "d"]);
		list.remove(["b", "d"]);
		let classes: Vec<&str> = list.iter().collect();
		assert_eq!(classes, vec!["a", "c"]);
	}

	#[test]
	fn test_remove_absent_is_noop() {
		let mut list = ClassList::new();
		list.add(["a"]);
		list.remove(["missing"]);
		assert_eq!(list.len(), 1);
	}

	#[test]
	fn test_from_iterator() {
		let list: ClassList = ["x", "y", "x"].into_iter().collect();
		assert_eq!(list.len(), 2);
		assert!(list.contains("x"));
		assert!(list.contains("y"));
	}
}

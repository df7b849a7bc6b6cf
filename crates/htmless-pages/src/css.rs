//! Inline style maps, stylesheet definitions and the declaration formatter.
//!
//! Property names and values are carried verbatim: there is no CSS parsing,
//! validation or case conversion anywhere in this module. The formatter only
//! turns an ordered mapping into declaration text.

use indexmap::IndexMap;

/// A key-unique, insertion-ordered CSS property/value mapping.
///
/// Setting a property that already exists overwrites its value but keeps its
/// position (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
	entries: IndexMap<String, String>,
}

impl StyleMap {
	/// Creates an empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `property` to `value`, overwriting any previous value.
	pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.entries.insert(property.into(), value.into());
		self
	}

	/// Merges `other` into this mapping, last write wins per key.
	pub fn merge(&mut self, other: &StyleMap) {
		for (property, value) in other.iter() {
			self.entries.insert(property.to_owned(), value.to_owned());
		}
	}

	/// Returns the value for `property`, if set.
	pub fn get(&self, property: &str) -> Option<&str> {
		self.entries.get(property).map(String::as_str)
	}

	/// Number of declarations.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether the mapping is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over declarations in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(property, value)| (property.as_str(), value.as_str()))
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut map = Self::new();
		for (property, value) in iter {
			map.set(property, value);
		}
		map
	}
}

/// Formats a declaration mapping as a brace-wrapped block.
///
/// Each entry is emitted as `property:value;` in insertion order, so
/// `{("color","red"), ("flex","1")}` becomes `{color:red;flex:1;}`. This is
/// the same atom the inline-style serializer uses.
pub fn format_declarations(declarations: &StyleMap) -> String {
	let mut out = String::from("{");
	for (property, value) in declarations.iter() {
		out.push_str(property);
		out.push(':');
		out.push_str(value);
		out.push(';');
	}
	out.push('}');
	out
}

/// One top-level stylesheet rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleRule {
	/// A plain selector rule: the key is a selector, the value its
	/// declarations.
	Declarations(StyleMap),
	/// A `@keyframes` block: frame selector (`from`, `to`, `50%`, ...) to
	/// declarations, in insertion order.
	Keyframes(IndexMap<String, StyleMap>),
}

/// An ordered stylesheet definition for `<style>` elements.
///
/// Top-level keys are either selectors ([`StyleRule::Declarations`]) or
/// `@keyframes <name>` headers ([`StyleRule::Keyframes`]). The rule kind is
/// carried by the variant, set by whichever of [`rule`](Self::rule) or
/// [`keyframes`](Self::keyframes) inserted the entry; key shape alone never
/// changes how an entry formats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
	rules: IndexMap<String, StyleRule>,
}

impl StyleSheet {
	/// Creates an empty stylesheet.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a plain selector rule.
	///
	/// The method, not the key, decides the rule kind: a key beginning with
	/// `@keyframes` is still formatted as a plain rule here. Frame blocks go
	/// through [`keyframes`](Self::keyframes).
	pub fn rule(&mut self, selector: impl Into<String>, declarations: StyleMap) -> &mut Self {
		let selector = selector.into();
		if selector.starts_with("@keyframes") {
			tracing::warn!(
				selector,
				"keyframes header passed to rule(); it will format as a plain rule, \
				 use keyframes() for frame blocks"
			);
		}
		self.rules.insert(selector, StyleRule::Declarations(declarations));
		self
	}

	/// Adds a `@keyframes` block. `header` should be the full top-level key,
	/// e.g. `"@keyframes spin"`.
	pub fn keyframes<I, S>(&mut self, header: impl Into<String>, frames: I) -> &mut Self
	where
		I: IntoIterator<Item = (S, StyleMap)>,
		S: Into<String>,
	{
		let frames = frames
			.into_iter()
			.map(|(selector, declarations)| (selector.into(), declarations))
			.collect();
		self.rules
			.insert(header.into(), StyleRule::Keyframes(frames));
		self
	}

	/// Returns whether the sheet has no rules.
	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	/// Iterates over the rules in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleRule)> {
		self.rules.iter().map(|(key, rule)| (key.as_str(), rule))
	}

	/// Formats the whole sheet as CSS text.
	///
	/// Plain rules come out as `selector {decls} `; keyframe blocks as
	/// `@keyframes name {from {decls} to {decls} }`. This is the fragment
	/// appended to a `<style>` element's text content by
	/// [`PageBuilder::style`](crate::PageBuilder::style).
	pub fn to_css(&self) -> String {
		let mut out = String::new();
		for (key, rule) in self.iter() {
			match rule {
				StyleRule::Declarations(declarations) => {
					out.push_str(key);
					out.push(' ');
					out.push_str(&format_declarations(declarations));
					out.push(' ');
				}
				StyleRule::Keyframes(frames) => {
					out.push_str(key);
					out.push_str(" {");
					for (frame, declarations) in frames {
						out.push_str(frame);
						out.push(' ');
						out.push_str(&format_declarations(declarations));
						out.push(' ');
					}
					out.push('}');
				}
			}
		}
		out
	}
}

/// The argument of [`PageBuilder::style`](crate::PageBuilder::style).
///
/// The builder picks the interpretation from the current element's tag name;
/// this enum carries the two possible input shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleSpec {
	/// Flat declarations merged into an element's inline style.
	Inline(StyleMap),
	/// A stylesheet appended to a `<style>` element's text.
	Sheet(StyleSheet),
}

impl From<StyleMap> for StyleSpec {
	fn from(map: StyleMap) -> Self {
		Self::Inline(map)
	}
}

impl From<StyleSheet> for StyleSpec {
	fn from(sheet: StyleSheet) -> Self {
		Self::Sheet(sheet)
	}
}

/// Builds a [`StyleMap`] from literal `property => value` pairs.
///
/// ```
/// use htmless_pages::style_map;
///
/// let decls = style_map! {
///     "background-color" => "gray",
///     "color" => "white",
/// };
/// assert_eq!(decls.get("color"), Some("white"));
/// ```
#[macro_export]
macro_rules! style_map {
	($($property:expr => $value:expr),* $(,)?) => {{
		let mut map = $crate::css::StyleMap::new();
		$(map.set($property, $value);)*
		map
	}};
}

/// Builds a [`StyleSheet`] from literal `selector => { declarations }` rules.
///
/// ```
/// use htmless_pages::stylesheet;
///
/// let sheet = stylesheet! {
///     "body" => { "color" => "white" },
///     ".file" => { "cursor" => "pointer" },
/// };
/// assert_eq!(sheet.to_css(), "body {color:white;} .file {cursor:pointer;} ");
/// ```
#[macro_export]
macro_rules! stylesheet {
	($($selector:expr => { $($property:expr => $value:expr),* $(,)? }),* $(,)?) => {{
		let mut sheet = $crate::css::StyleSheet::new();
		$(sheet.rule($selector, $crate::style_map!($($property => $value),*));)*
		sheet
	}};
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_style_map_last_write_wins() {
		let mut map = StyleMap::new();
		map.set("color", "red").set("color", "blue");
		assert_eq!(map.len(), 1);
		assert_eq!(map.get("color"), Some("blue"));
	}

	#[test]
	fn test_style_map_merge_preserves_order() {
		let mut map: StyleMap = [("a", "1"), ("b", "2")].into_iter().collect();
		let other: StyleMap = [("b", "3"), ("c", "4")].into_iter().collect();
		map.merge(&other);
		let entries: Vec<(&str, &str)> = map.iter().collect();
		assert_eq!(entries, vec![("a", "1"), ("b", "3"), ("c", "4")]);
	}

	#[test]
	fn test_format_declarations() {
		let map: StyleMap = [("flex", "1"), ("color", "inherit")].into_iter().collect();
		assert_eq!(format_declarations(&map), "{flex:1;color:inherit;}");
	}

	#[test]
	fn test_format_declarations_empty() {
		assert_eq!(format_declarations(&StyleMap::new()), "{}");
	}

	#[test]
	fn test_stylesheet_plain_rules() {
		let sheet = stylesheet! {
			"body" => { "background-color" => "gray", "color" => "white" },
			"#menu" => { "flex" => "1" },
		};
		assert_eq!(
			sheet.to_css(),
			"body {background-color:gray;color:white;} #menu {flex:1;} "
		);
	}

	#[test]
	fn test_stylesheet_keyframes() {
		let mut sheet = StyleSheet::new();
		sheet.keyframes(
			"@keyframes fade",
			[
				("from", style_map! { "opacity" => "0" }),
				("to", style_map! { "opacity" => "1" }),
			],
		);
		assert_eq!(
			sheet.to_css(),
			"@keyframes fade {from {opacity:0;} to {opacity:1;} }"
		);
	}

	#[test]
	fn test_stylesheet_mixed_rule_order() {
		let mut sheet = StyleSheet::new();
		sheet.rule("body", style_map! { "margin" => "0" });
		sheet.keyframes("@keyframes spin", [("from", style_map! { "left" => "0" })]);
		sheet.rule(".file", style_map! { "cursor" => "pointer" });
		assert_eq!(
			sheet.to_css(),
			"body {margin:0;} @keyframes spin {from {left:0;} }.file {cursor:pointer;} "
		);
	}

	#[test]
	fn test_rule_keeps_keyframes_header_as_plain_rule() {
		let mut sheet = StyleSheet::new();
		sheet.rule("@keyframes spin", style_map! { "from" => "x" });
		// inserted via rule(), so the header formats as a selector
		assert_eq!(sheet.to_css(), "@keyframes spin {from:x;} ");
	}

	#[test]
	fn test_style_spec_conversions() {
		let inline: StyleSpec = style_map! { "flex" => "1" }.into();
		assert!(matches!(inline, StyleSpec::Inline(_)));

		let sheet: StyleSpec = StyleSheet::new().into();
		assert!(matches!(sheet, StyleSpec::Sheet(_)));
	}
}

//! Directory-listing page assembly.
//!
//! Builds the listing document with [`PageBuilder`]: a fixed stylesheet pair
//! in the head, a menu bar with a `..` navigation entry, a small inline
//! navigation script and one row per directory entry. The caller streams the
//! finished session straight into a response body.

use htmless_pages::{PageBuilder, exponent, stylesheet};

/// Click handler shared by the menu and the file rows: appends the clicked
/// entry's name to the current location.
const NAV_SCRIPT: &str = r#"
function fnav(e) {
  if (e.textContent) {
    if (!window.location.href.endsWith("/")) {
      window.location.href += "/" + e.textContent;
    } else {
      window.location.href += e.textContent;
    }
  }
}
"#;

/// Builds the listing page for the given entry names and returns the ready
/// session. Entry names are shown verbatim and percent-encoded in the row
/// ids.
pub fn build_listing_page(entries: &[String]) -> PageBuilder {
	let mut ssr = PageBuilder::new();
	ssr.register_default(exponent);

	let html = ssr.create("html").element();
	let head = ssr.create("head").mount(&html).element();

	ssr.create("style").id("styles").mount(&head).style(stylesheet! {
		"body" => {
			"background-color" => "gray",
			"color" => "white !important",
			"flex-direction" => "column",
		},
		"#menu" => {
			"flex" => "1",
			"flex-direction" => "row",
			"border-radius" => "1em",
			"overflow-y" => "hidden",
			"overflow-x" => "auto",
			"background-color" => "#acd5e3",
			"margin" => "1em",
			"line-height" => "5em",
		},
		".menu-item" => {
			"max-width" => "10em",
			"background-color" => "#666868",
			"cursor" => "pointer",
			"text-align" => "center",
		},
		"#files" => {
			"flex" => "10",
			"flex-direction" => "column",
			"border-radius" => "1em",
			"overflow-y" => "auto",
			"overflow-x" => "hidden",
			"background-color" => "#acd5e3",
			"padding" => "1em",
			"margin" => "1em",
		},
		".file" => {
			"padding" => "1em",
			"background-color" => "#666868",
			"margin" => "1px",
			"cursor" => "pointer",
		},
	});

	ssr.create_with("style", Some("exponent-styles"), &[])
		.style(stylesheet! {
			".exponent-body" => {
				"top" => "0",
				"left" => "0",
				"width" => "100vw",
				"height" => "100vh",
				"margin" => "0",
				"padding" => "0",
				"overflow" => "hidden",
				"display" => "flex",
			},
			".exponent" => {
				"flex" => "1",
				"color" => "inherit",
			},
			".exponent-div" => {
				"display" => "flex",
			},
			".exponent-button" => {
				"border" => "none",
				"cursor" => "pointer",
			},
			".exponent-canvas" => {
				"min-width" => "0",
			},
			".exponent-input" => {
				"min-width" => "0",
				"min-height" => "0",
			},
		})
		.mount(&head);

	let body = ssr.create("body").mount(&html).element();

	let menu = ssr.create_with("div", Some("menu"), &[]).mount(&body).element();
	ssr.create_with("span", Some("menu-nav-up"), &["menu-item"])
		.text_content("..")
		.attrs([("onclick", "fnav(this)")])
		.mount(&menu);

	ssr.create_with("script", Some("code"), &[])
		.text_content(NAV_SCRIPT)
		.mount(&body);

	let files = ssr.create_with("div", Some("files"), &[]).mount(&body).element();
	for name in entries {
		let escaped = urlencoding::encode(name);
		ssr.create_with("span", Some(&format!("file-{escaped}")), &["file"])
			.text_content(name.as_str())
			.attrs([("onclick", "fnav(this);")])
			.mount(&files);
	}

	ssr
}

#[cfg(test)]
mod tests {
	use super::*;

	fn render(entries: &[&str]) -> String {
		let entries: Vec<String> = entries.iter().map(|s| s.to_string()).collect();
		build_listing_page(&entries).render_to_string().unwrap()
	}

	#[test]
	fn test_page_skeleton() {
		let out = render(&[]);
		assert!(out.starts_with("<html ><head >"));
		assert!(out.ends_with("</body></html>"));
		assert!(out.contains("<style id=\"styles\" >"));
		assert!(out.contains("<style id=\"exponent-styles\" >"));
		assert!(out.contains("function fnav(e)"));
	}

	#[test]
	fn test_exponent_classes_are_injected() {
		let out = render(&[]);
		assert!(out.contains("<body  class=\"exponent exponent-body \" >"));
		assert!(out.contains("<div id=\"menu\"  class=\"exponent exponent-div \" >"));
	}

	#[test]
	fn test_menu_nav_entry() {
		let out = render(&[]);
		assert!(out.contains(
			"<span id=\"menu-nav-up\"  class=\"menu-item exponent \" onclick=\"fnav(this)\" >..</span>"
		));
	}

	#[test]
	fn test_one_row_per_entry_in_order() {
		let out = render(&["alpha.txt", "beta"]);
		let alpha = out.find("file-alpha.txt").unwrap();
		let beta = out.find("file-beta").unwrap();
		assert!(alpha < beta);
		assert!(out.contains(
			"<span id=\"file-beta\"  class=\"file exponent \" onclick=\"fnav(this);\" >beta</span>"
		));
	}

	#[test]
	fn test_entry_ids_are_percent_encoded() {
		let out = render(&["my file.txt"]);
		assert!(out.contains("id=\"file-my%20file.txt\""));
		// the visible label stays verbatim
		assert!(out.contains(">my file.txt</span>"));
	}

	#[test]
	fn test_stylesheets_render_as_text() {
		let out = render(&[]);
		assert!(out.contains("body {background-color:gray;color:white !important;flex-direction:column;} "));
		assert!(out.contains(".exponent {flex:1;color:inherit;} "));
	}
}

//! HTML rendering for the index page.

use std::fmt::Write;

/// Renders the index page: one link per entry, pointing at its `/zip`
/// download. An empty listing produces the same page with an empty list.
pub fn render_index(entries: &[String]) -> String {
    let mut items = String::new();
    for entry in entries {
        let _ = write!(
            items,
            "<li><a href=\"./zip/{href}\">{label}</a></li>",
            href = html_escape::encode_double_quoted_attribute(entry),
            label = html_escape::encode_text(entry),
        );
    }

    format!(
        "<html><head><title>List of available archives</title>\
         <meta name=\"viewport\" content=\"width=device-width\"></head>\
         <body><ul>{items}</ul></body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_link_per_entry() {
        let page = render_index(&["a.txt".to_owned(), "sub".to_owned()]);
        assert!(page.contains("<li><a href=\"./zip/a.txt\">a.txt</a></li>"));
        assert!(page.contains("<li><a href=\"./zip/sub\">sub</a></li>"));
        assert_eq!(page.matches("<li>").count(), 2);
    }

    #[test]
    fn renders_valid_page_for_empty_listing() {
        let page = render_index(&[]);
        assert!(page.contains("<ul></ul>"));
        assert!(page.contains("List of available archives"));
    }

    #[test]
    fn escapes_markup_in_entry_names() {
        let page = render_index(&["<b>.txt".to_owned()]);
        assert!(page.contains("&lt;b&gt;.txt</a>"));
        assert!(!page.contains("<b>.txt</a>"));
    }
}

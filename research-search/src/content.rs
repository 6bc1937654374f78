//! HTML to plain-text projection for fetched pages.
//!
//! The projection is deliberately lossy: markup, links and layout are
//! dropped, script and style bodies are removed, every whitespace run
//! becomes a single space, and the result is cut to a character limit.

use scraper::{Html, Selector};

use crate::error::{Result, SearchError};
use crate::types::PageContent;

/// Elements whose text is never visible and is skipped during extraction.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract visible text from raw HTML, keeping at most `max_chars` characters.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the page has no visible text.
pub fn extract_text(html: &str, max_chars: usize) -> Result<String> {
    document_text(&Html::parse_document(html), max_chars)
}

/// Extract a [`PageContent`] record from raw HTML.
///
/// The document is parsed once for both the text and the title.
///
/// # Errors
///
/// Same as [`extract_text`].
pub fn extract_page(html: &str, url: &str, max_chars: usize) -> Result<PageContent> {
    let document = Html::parse_document(html);
    let text = document_text(&document, max_chars)?;
    Ok(PageContent {
        url: url.to_owned(),
        title: document_title(&document).unwrap_or_default(),
        char_count: text.chars().count(),
        text,
    })
}

fn document_text(document: &Html, max_chars: usize) -> Result<String> {
    let text = collapse_whitespace(&visible_text(document));
    if text.is_empty() {
        return Err(SearchError::Parse("no extractable content found".into()));
    }
    Ok(truncate_chars(&text, max_chars))
}

/// The trimmed contents of the first `<title>` element, if any.
fn document_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();
    let title = collapse_whitespace(&title);
    (!title.is_empty()).then_some(title)
}

/// Concatenate every text node that is not inside an invisible element.
fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE_TAGS.contains(&el.name()))
        });
        if !hidden {
            out.push_str(text);
        }
    }
    out
}

/// Replace every whitespace run with a single space and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first `max_chars` characters of `text`.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_owned(),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_body_text() {
        let html = "<html><body><p>Paris is the capital of France.</p></body></html>";
        let text = extract_text(html, 5000).expect("should extract");
        assert_eq!(text, "Paris is the capital of France.");
    }

    #[test]
    fn strips_script_and_style() {
        let html = r#"<html><head><style>.x { color: red; }</style></head><body>
            <p>Real content</p>
            <script>var x = 1; alert('hi');</script>
        </body></html>"#;
        let text = extract_text(html, 5000).expect("should extract");
        assert_eq!(text, "Real content");
        assert!(!text.contains("alert"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn strips_noscript() {
        let html = "<html><body><p>Visible</p><noscript>Enable JS please</noscript></body></html>";
        let text = extract_text(html, 5000).expect("should extract");
        assert!(text.contains("Visible"));
        assert!(!text.contains("Enable JS"));
    }

    #[test]
    fn collapses_all_whitespace_runs() {
        let html = "<html><body><p>Word1    Word2</p>\n\n\n<p>\tWord3\r\n</p></body></html>";
        let text = extract_text(html, 5000).expect("should extract");
        assert_eq!(text, "Word1 Word2 Word3");
    }

    #[test]
    fn keeps_nav_and_footer_text() {
        let html = "<html><body><nav>Menu</nav><main>Body</main><footer>Foot</footer></body></html>";
        let text = extract_text(html, 5000).expect("should extract");
        assert!(text.contains("Menu"));
        assert!(text.contains("Foot"));
    }

    #[test]
    fn title_text_is_included() {
        let html = "<html><head><title>Gold</title></head><body><p>Symbol Au</p></body></html>";
        let text = extract_text(html, 5000).expect("should extract");
        assert!(text.starts_with("Gold"));
        assert!(text.contains("Symbol Au"));
    }

    #[test]
    fn truncates_to_char_limit() {
        let html = format!("<html><body>{}</body></html>", "word ".repeat(2000));
        let text = extract_text(&html, 5000).expect("should extract");
        assert_eq!(text.chars().count(), 5000);
    }

    #[test]
    fn truncation_respects_multibyte_chars() {
        let html = format!("<html><body>{}</body></html>", "é".repeat(200));
        let text = extract_text(&html, 50).expect("should extract");
        assert_eq!(text.chars().count(), 50);
        assert!(text.chars().all(|c| c == 'é'));
    }

    #[test]
    fn short_text_not_truncated() {
        assert_eq!(truncate_chars("abc", 5000), "abc");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn empty_html_is_parse_error() {
        let err = extract_text("", 5000).unwrap_err();
        assert!(err.to_string().contains("no extractable content"));
    }

    #[test]
    fn only_scripts_is_parse_error() {
        let html = "<html><head><style>body{}</style></head><body><script>go()</script></body></html>";
        assert!(extract_text(html, 5000).is_err());
    }

    #[test]
    fn malformed_html_still_extracts() {
        let html = "<div><p>Unclosed paragraph <b>bold <i>nested</div>";
        let text = extract_text(html, 5000).expect("should extract");
        assert_eq!(text, "Unclosed paragraph bold nested");
    }

    #[test]
    fn page_title_found_and_missing() {
        let page_title = |html: &str| document_title(&Html::parse_document(html));
        assert_eq!(
            page_title("<html><head><title>  My   Page </title></head></html>").as_deref(),
            Some("My Page")
        );
        assert!(page_title("<html><body>No title</body></html>").is_none());
    }

    #[test]
    fn extract_page_fills_metadata() {
        let html = "<html><head><title>T</title></head><body>One two</body></html>";
        let page = extract_page(html, "https://example.org/p", 5000).expect("should extract");
        assert_eq!(page.url, "https://example.org/p");
        assert_eq!(page.title, "T");
        assert_eq!(page.text, "TOne two");
        assert_eq!(page.char_count, 8);
    }

    #[test]
    fn extract_page_without_title_has_empty_title() {
        let page = extract_page("<html><body><p>Only body</p></body></html>", "u", 5000)
            .expect("should extract");
        assert_eq!(page.title, "");
        assert_eq!(page.text, "Only body");
    }
}

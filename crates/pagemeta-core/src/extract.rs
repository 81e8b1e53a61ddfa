//! HTML metadata extraction
//!
//! Pulls the title, description and Open Graph properties out of a page using
//! CSS selectors. Extraction never fails: anything that cannot be found is
//! left as an empty string.

use scraper::{Html, Selector};

use crate::types::{OgMeta, PageMeta, RawDocument};

/// Extracts metadata from a fetched document.
///
/// The status code is ignored; a 404 page with a `<title>` still yields that
/// title.
pub fn extract(document: &RawDocument) -> PageMeta {
    extract_html(document.body())
}

/// Extracts metadata from an HTML string.
///
/// Only the first `<title>` counts and its text is trimmed. For each `meta`
/// selector the first match that carries a `content` attribute wins, so an
/// earlier match without one is skipped.
///
/// # Example
///
/// ```
/// use pagemeta_core::extract_html;
///
/// let meta = extract_html(r#"<meta property="og:type" content="website">"#);
/// assert_eq!(meta.og.kind, "website");
/// ```
pub fn extract_html(html: &str) -> PageMeta {
    let document = Html::parse_document(html);

    PageMeta {
        title: first_text(&document, "title"),
        description: first_content(&document, "meta[name=description]"),
        og: OgMeta {
            title: first_content(&document, r#"meta[property="og:title"]"#),
            kind: first_content(&document, r#"meta[property="og:type"]"#),
            image: first_content(&document, r#"meta[property="og:image"]"#),
            url: first_content(&document, r#"meta[property="og:url"]"#),
        },
    }
}

/// Text of the first element matching `selector`, whitespace-trimmed.
fn first_text(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// `content` attribute of the first element matching `selector`.
fn first_content(document: &Html, selector: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };

    document
        .select(&selector)
        .find_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

#![allow(dead_code)]
use pagemeta_core::RawDocument;

/// Builds an HTML page with the given `<head>` contents.
pub fn page(head: &str) -> String {
    format!("<!DOCTYPE html><html><head>{head}</head><body></body></html>")
}

/// Wraps `html` into a 200 document for `url`.
pub fn document(url: &str, html: &str) -> RawDocument {
    RawDocument::new(url, 200, html)
}

/// Returns a page that declares every supported property.
pub fn complete_page() -> String {
    page(
        r#"
        <title>Rust Blog</title>
        <meta name="description" content="Empowering everyone">
        <meta property="og:title" content="The Rust Blog">
        <meta property="og:type" content="website">
        <meta property="og:image" content="https://blog.rust-lang.test/logo.png">
        <meta property="og:url" content="https://blog.rust-lang.test/">
        "#,
    )
}

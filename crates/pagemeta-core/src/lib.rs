//! pagemeta Core - Domain types and metadata extraction
//!
//! This crate provides the foundational types shared by the fetcher and the
//! server: the extracted [`PageMeta`], the fetched [`RawDocument`], and the pure
//! [`extract`] function that turns one into the other.
//!
//! ## Example
//!
//! ```
//! use pagemeta_core::{RawDocument, extract};
//!
//! let doc = RawDocument::new("https://example.com", 200, "<title>Example</title>");
//! let meta = extract(&doc);
//! assert_eq!(meta.title, "Example");
//! ```

pub mod extract;
pub mod types;

pub use extract::{extract, extract_html};
pub use types::{OgMeta, PageMeta, RawDocument};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

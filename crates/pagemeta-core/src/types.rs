//! Domain types for extracted page metadata.

use serde::{Deserialize, Serialize};

/// Metadata extracted from a single page.
///
/// Fields that are missing in the document are empty strings, never absent,
/// so the JSON shape is stable for clients.
///
/// # Example
///
/// ```
/// use pagemeta_core::PageMeta;
///
/// let meta = PageMeta::default();
/// let json = serde_json::to_value(&meta).unwrap();
/// assert_eq!(json["og"]["type"], "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Text of the `<title>` element.
    #[serde(default)]
    pub title: String,

    /// Content of `<meta name="description">`.
    #[serde(default)]
    pub description: String,

    /// Open Graph properties.
    #[serde(default)]
    pub og: OgMeta,
}

impl PageMeta {
    /// Returns true if nothing could be extracted from the page.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.og.is_empty()
    }
}

/// Open Graph (`og:*`) properties of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OgMeta {
    #[serde(default)]
    pub title: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub url: String,
}

impl OgMeta {
    /// Returns true if no Open Graph property was present.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.kind.is_empty() && self.image.is_empty() && self.url.is_empty()
    }
}

/// A document retrieved from the network, before extraction.
///
/// The status code is carried along because a non-2xx response is still
/// handed to the extractor; callers decide whether to log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    url: String,
    status: u16,
    body: String,
}

impl RawDocument {
    /// Creates a new document for the given URL.
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Returns the URL the document was requested from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the HTTP status code of the response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

//! PageSource en memoria para tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pagemeta_core::RawDocument;
use pagemeta_fetch::{FetchError, PageSource};
use parking_lot::Mutex;

/// Sirve paginas registradas y falla con `Request` para cualquier otra URL.
#[derive(Default)]
pub struct StubSource {
    pages: HashMap<String, (u16, String)>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
    delay: Option<Duration>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra una pagina con status 200.
    pub fn page(self, url: &str, html: &str) -> Self {
        self.page_with_status(url, 200, html)
    }

    pub fn page_with_status(mut self, url: &str, status: u16, html: &str) -> Self {
        self.pages
            .insert(url.to_string(), (status, html.to_string()));
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        *self.calls.lock().entry(url.to_string()).or_default() += 1;
        self.total.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.pages.get(url) {
            Some((status, body)) => Ok(RawDocument::new(url, *status, body.clone())),
            None => Err(FetchError::request(url, "connection refused")),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// HTML con todos los campos que se extraen.
pub fn full_page(title: &str) -> String {
    format!(
        r#"<html><head>
<title>{title}</title>
<meta name="description" content="About {title}">
<meta property="og:title" content="OG {title}">
<meta property="og:type" content="website">
<meta property="og:image" content="https://img.test/{title}.png">
<meta property="og:url" content="https://{title}.test/">
</head><body></body></html>"#
    )
}

//! Page source abstraction and the HTTP implementation.

mod http;
mod traits;

pub use http::HttpPageSource;
pub use traits::PageSource;

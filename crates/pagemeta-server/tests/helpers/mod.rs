//! Test helpers para pagemeta-server.

#![allow(dead_code, unused_imports)]

pub mod assertions;
pub mod client;
pub mod source;

pub use assertions::*;
pub use client::{TestClient, TestResponse, client, client_with};
pub use source::StubSource;

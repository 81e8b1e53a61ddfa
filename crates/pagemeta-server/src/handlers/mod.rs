//! HTTP handlers.

pub mod health;
pub mod inspect;
pub mod invalidate;
pub mod metrics;

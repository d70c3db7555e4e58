//! HTTP request handlers.

pub(crate) mod health;
pub(crate) mod posts;
pub(crate) mod preview;

//! HTTP client wrapper

pub mod client;

//! Progress sync orchestration

pub mod ports;
pub mod service;

pub use service::SyncService;

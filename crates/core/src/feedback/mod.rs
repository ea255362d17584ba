//! Teacher feedback management

pub mod ports;
pub mod service;

pub use service::FeedbackService;

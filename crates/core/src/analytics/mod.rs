//! Cohort and system analytics

pub mod service;

pub use service::{AnalyticsScope, AnalyticsService, SystemReport};

//! # SolveTrack Infra
//!
//! Infrastructure adapters: SQLite persistence, the HTTP client wrapper,
//! configuration loading, and the per-platform progress extractors.
//!
//! Everything here implements a port defined in `solvetrack-core`.

pub mod config;
pub mod database;
pub mod errors;
pub mod extractors;
pub mod http;

pub use database::manager::DbManager;
pub use database::{
    SqliteFeedbackRepository, SqliteProfileRepository, SqliteProgressRepository,
    SqliteUserRepository,
};
pub use errors::InfraError;
pub use extractors::{
    build_extractors, GeeksForGeeksExtractor, HackerRankExtractor, LeetCodeExtractor,
};
pub use http::client::{HttpClient, HttpClientBuilder};

//! SQLite persistence adapters

pub mod feedback_repository;
pub mod manager;
pub mod profile_repository;
pub mod progress_repository;
pub mod user_repository;

pub use feedback_repository::SqliteFeedbackRepository;
pub use profile_repository::SqliteProfileRepository;
pub use progress_repository::SqliteProgressRepository;
pub use user_repository::SqliteUserRepository;

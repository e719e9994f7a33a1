//! File-based persistence

mod environment_repository;

pub use environment_repository::FileEnvironmentRepository;

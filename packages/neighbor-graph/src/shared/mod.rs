//! Shared models and utilities

pub mod embedding_reader;
pub mod models;
pub mod parallel;

pub use embedding_reader::{read_embedding, read_embedding_file, EmbeddingFormat};
pub use models::*;
pub use parallel::WorkerPool;

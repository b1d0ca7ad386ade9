//! Configuration, retrieval context assembly, and the question-answering engine.

pub mod bootstrap;
pub mod config;
pub mod context;
pub mod error;
pub mod prompt;
pub mod query;

pub use config::Config;
pub use error::QueryError;
pub use query::{QueryEngine, Retrieval};

//! Model loading and saving functionality
//!
//! Reads and writes schema graphs as YAML or JSON documents.

pub mod document;
pub mod error;
pub mod loader;
pub mod saver;

pub use document::{DocumentFormat, SchemaDocument};
pub use error::DocumentError;
pub use loader::ModelLoader;
pub use saver::ModelSaver;

//! cinefile core library exports

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod paths;

pub use error::{CatalogError, ConfigError, StorageError};

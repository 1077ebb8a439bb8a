//! docsplit-core - Core types and traits for document splitting
//!
//! This crate provides the documents, configuration, error handling and
//! collaborator interfaces shared by the docsplit crates.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{Result, SplitError};
pub use traits::*;
pub use types::*;

//! Filesystem helpers for buildfarm
//!
//! Provides crash-safe writes and extension-driven structured document
//! loading for the metadata cache, the configuration file and the generated
//! build artifacts.

pub mod error;
pub mod io;
pub mod structured;

pub use error::{Error, Result};
pub use structured::{StructuredFormat, StructuredStore};

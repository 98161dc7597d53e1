//! Shared test utilities for the buildfarm workspace.
//!
//! Dev-dependency only. Fixtures produce plain strings and bytes so every
//! crate can use them without depending on the crates under test.
//!
//! # Modules
//!
//! - [`package`]: [`PackageXml`] release descriptor builder
//! - [`snapshot`]: [`MetadataSnapshot`] builder for a whole distribution
//! - [`sample`]: a small ready-made distribution

pub mod package;
pub mod sample;
pub mod snapshot;

pub use package::PackageXml;
pub use snapshot::{MetadataSnapshot, SnapshotDocument};

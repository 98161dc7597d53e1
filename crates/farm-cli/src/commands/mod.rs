//! Command implementations for farm-cli

pub mod generate;
pub mod resolve;

pub use generate::run_generate;
pub use resolve::run_resolve;

use farm_meta::{DistributionContext, HttpTransport, MetadataStore};

use crate::config::FarmConfig;
use crate::error::Result;

/// Load every distribution document through the on-disk cache.
fn load_context(config: &FarmConfig) -> Result<DistributionContext> {
    let mut store = MetadataStore::new(HttpTransport::new()?, config.metadata.cache_dir.clone());
    Ok(DistributionContext::load(&mut store, &config.metadata)?)
}

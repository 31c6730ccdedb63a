//! # postal2nuts
//!
//! Convert postal codes to their Eurostat NUTS region codes.
//!
//! The NUTS classification maps every postal code of a country to a
//! hierarchical region code (level 1 coarsest, level 3 finest). Eurostat
//! publishes the correspondence tables per country and year as ZIP archives;
//! this crate downloads an archive once, caches the extracted table under
//! the local cache directory, and answers lookups from an in-memory index.
//! Every run after the first works offline.
//!
//! ## Example
//!
//! ```no_run
//! use postal2nuts::{
//!     CacheManager, Country, NutsConfig, NutsLevel, NutsYear, PostalNutsIndex,
//!     default_cache_dir,
//! };
//!
//! #[tokio::main]
//! async fn main() -> postal2nuts::Result<()> {
//!     let config = NutsConfig {
//!         country: Country::NL,
//!         year: NutsYear::Y2021,
//!         cache_dir: default_cache_dir()?,
//!         force_download: false,
//!     };
//!
//!     // Downloads on the first run, cache hit afterwards
//!     let manager = CacheManager::new(config);
//!     let entry = manager.resolve();
//!     let data_file = manager.ensure_available(&entry).await?;
//!
//!     let index = PostalNutsIndex::load(&data_file)?;
//!     if let Some(nuts) = index.lookup_one("2612AB", NutsLevel::Three) {
//!         println!("Postal code 2612AB has nuts code {nuts}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;

pub use cache::{CacheEntry, CacheManager};
pub use cli::Cli;
pub use config::{Country, DatasetDescriptor, NutsConfig, NutsYear, default_cache_dir};
pub use error::{NutsError, Result};
pub use lookup::{NutsLevel, PostalNutsIndex, normalize_postal_code};

//! larder-core library.
//!
//! Pure planning logic for the weekly recipe planner: the recipe catalog,
//! the persisted selection and purchased sets, the grocery aggregation
//! engine, and the presentation/export helpers built on top of it.
//!
//! # Conventions
//!
//! - **Errors**: library operations return [`error::Result`]; config loading
//!   uses `anyhow::Result` with context.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod aggregate;
pub mod capabilities;
pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod ident;
pub mod lock;
pub mod search;
pub mod store;
pub mod view;

pub use aggregate::{AggregatedEntry, Aggregation, aggregate};
pub use catalog::{Catalog, RecipeCard, Section};
pub use error::{Error, ErrorCode, Result};
pub use ident::{normalize_key, slugify};
pub use store::{FileStore, KeyValueStore, MemoryStore, Persistence};

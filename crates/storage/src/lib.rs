//! Storage layer for the clan dashboard
//!
//! **Philosophy:** Declarative, Modular, SoC
//! - Declarative: collections and record shapes are fixed up front
//! - Modular: backends are swappable behind the [`DocumentStore`] trait
//! - SoC: this crate ONLY handles persistence and record decoding, no
//!   aggregation logic
//!
//! # Layers
//!
//! - [`DocumentStore`]: untyped get-all / get-by-id / put over JSON documents
//! - [`MemoryStore`], [`FileStore`]: the two backends
//! - [`decode`]: raw documents to fully-defaulted domain types
//! - [`ClanRepository`]: typed reads, schedule replacement and per-call
//!   deadlines on top of any backend
//! - [`seed`]: bulk import of a JSON seed file

pub mod decode;
mod document;
mod error;
mod file;
mod memory;
mod repository;
pub mod seed;

pub use document::{DocumentStore, collections};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::{ClanRepository, DEFAULT_DEADLINE};
pub use seed::{SeedData, SeedReport, import_seed};

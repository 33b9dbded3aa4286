//! Collection repositories
//!
//! Provides the data access layer over the on-disk collection files.

pub mod collection;

pub use collection::{CollectionRepository, StoreError};

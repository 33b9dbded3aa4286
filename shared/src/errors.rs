//! Error types for the Fitness Tracker application

use thiserror::Error;

/// Errors raised while reading stored entries through a typed view
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("Entry is not a JSON object")]
    NotAnObject,

    #[error("Entry could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised when naming a collection
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Unknown collection: {0}")]
    Unknown(String),
}

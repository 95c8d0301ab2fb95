//! Core cleaning pipeline for educational interaction logs
//!
//! This crate provides the in-memory dataset abstraction and the ordered
//! sequence of validation/repair passes that turn a raw interaction log
//! into a cleaned table with a fixed column set.

pub mod coerce;
pub mod columns;
pub mod completeness;
pub mod dataset;
pub mod dedup;
pub mod features;
pub mod order;
pub mod pipeline;
pub mod repair;
pub mod response_time;

pub use dataset::{Dataset, Row};
pub use pipeline::{clean, CleanConfig, CleanStats};

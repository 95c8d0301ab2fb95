//! CSV adapters for the eduscrub cleaning pipeline
//!
//! The core consumes and returns an in-memory `Dataset`; this crate is
//! responsible for materializing one from delimited text and persisting
//! the cleaned result.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{Error, Result};
pub use reader::{
    encoding_from_label, read_dataset, read_dataset_with_config, CsvConfig, CsvReader,
};
pub use writer::write_dataset;

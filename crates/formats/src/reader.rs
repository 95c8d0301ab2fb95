//! Streaming CSV reader producing the in-memory dataset
//!
//! Reads delimited text with automatic gzip decompression and per-field
//! decoding through a configurable encoding (the usual interaction-log
//! feed is latin1). Cells are typed on read: NA markers become missing,
//! then integer, then float, then string.

use crate::{Error, Result};
use eduscrub_core::dataset::{Dataset, Row};
use encoding_rs::Encoding;
use flate2::read::GzDecoder;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Cell spellings treated as missing
pub const NA_MARKERS: [&str; 5] = ["NA", "N/A", "NaN", "nan", "null"];

/// Configuration for CSV reading
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Text encoding of the input bytes
    pub encoding: &'static Encoding,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Streaming CSV reader that yields one row at a time
pub struct CsvReader {
    reader: csv::Reader<Box<dyn Read>>,
    headers: Vec<String>,
    encoding: &'static Encoding,
    record: csv::ByteRecord,
    rows_read: usize,
}

impl CsvReader {
    /// Open a CSV file with default configuration.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, CsvConfig::default())
    }

    /// Open a CSV file, auto-detecting gzip compression by extension.
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()));
        }
        let file = File::open(path)?;

        let raw: Box<dyn Read> = match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => {
                debug!("Opening gzip-compressed CSV file: {:?}", path);
                Box::new(GzDecoder::new(file))
            }
            _ => Box::new(file),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(config.delimiter)
            .flexible(true)
            .from_reader(raw);

        let header_record = reader.byte_headers()?.clone();
        let headers: Vec<String> = header_record
            .iter()
            .map(|field| decode(field, config.encoding))
            .collect();

        info!("Opened dataset {:?}: {} columns", path, headers.len());
        Ok(Self {
            reader,
            headers,
            encoding: config.encoding,
            record: csv::ByteRecord::new(),
            rows_read: 0,
        })
    }

    /// Column names from the header line, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows read so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
}

impl Iterator for CsvReader {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_byte_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                self.rows_read += 1;
                let mut row = Row::new();
                // Short rows leave trailing columns absent; extra fields
                // beyond the header are dropped.
                for (name, field) in self.headers.iter().zip(self.record.iter()) {
                    let text = decode(field, self.encoding);
                    row.insert(name.clone(), typed_value(&text));
                }
                Some(Ok(row))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Interpret a raw cell: NA markers as missing, then integer, then
/// float, then string.
fn typed_value(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() || NA_MARKERS.contains(&trimmed) {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::from(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::from(f);
    }
    Value::String(text.to_string())
}

/// Read an entire CSV file into a dataset with default configuration.
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    read_dataset_with_config(path, CsvConfig::default())
}

/// Read an entire CSV file into a dataset.
pub fn read_dataset_with_config<P: AsRef<Path>>(path: P, config: CsvConfig) -> Result<Dataset> {
    let mut reader = CsvReader::open_with_config(path, config)?;
    let mut dataset = Dataset::new(reader.headers().to_vec());
    for row in reader.by_ref() {
        dataset.push_row(row?);
    }
    info!("Read {} rows", dataset.len());
    Ok(dataset)
}

/// Resolve an encoding by label, e.g. "utf-8" or "latin1".
pub fn encoding_from_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.as_bytes()).ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

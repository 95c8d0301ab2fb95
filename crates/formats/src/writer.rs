//! CSV writer for cleaned datasets
//!
//! Writes the dataset's columns as the header, then one record per row.
//! Missing cells become empty fields; everything else is rendered with
//! the same canonicalization the type coercer uses.

use crate::Result;
use eduscrub_core::dataset::{canonical_string, Dataset};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Write a dataset as comma-delimited text, creating parent directories.
pub fn write_dataset<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(dataset.columns())?;
    for row in dataset.rows() {
        let fields: Vec<String> = dataset
            .columns()
            .iter()
            .map(|col| match row.get(col) {
                None | Some(Value::Null) => String::new(),
                Some(v) => canonical_string(v),
            })
            .collect();
        writer.write_record(&fields)?;
    }
    writer.flush()?;

    info!("Wrote {} rows to {:?}", dataset.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_dataset;
    use serde_json::json;
    use tempfile::tempdir;

    fn dataset(columns: &[&str], rows: &[Value]) -> Dataset {
        Dataset::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter().map(|v| v.as_object().unwrap().clone()).collect(),
        )
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let ds = dataset(
            &["user_id", "correct", "hint_independence"],
            &[
                json!({"user_id": "42", "correct": 1, "hint_independence": 0.5}),
                json!({"user_id": "7", "correct": 0, "hint_independence": 1.0}),
            ],
        );
        write_dataset(&ds, &path).unwrap();

        let back = read_dataset(&path).unwrap();
        assert_eq!(back.columns(), ds.columns());
        assert_eq!(back.len(), 2);
        assert_eq!(back.rows()[0]["user_id"], json!(42));
        assert_eq!(back.rows()[0]["hint_independence"], json!(0.5));
    }

    #[test]
    fn test_parent_directories_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("output").join("out.csv");
        let ds = dataset(&["a"], &[json!({"a": 1})]);
        write_dataset(&ds, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_missing_cells_are_empty_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let ds = dataset(&["a", "b"], &[json!({"a": 1, "b": null})]);
        write_dataset(&ds, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a,b\n1,\n");
    }

    #[test]
    fn test_integral_floats_render_without_decimal_point() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let ds = dataset(&["v"], &[json!({"v": 3600.0})]);
        write_dataset(&ds, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "v\n3600\n");
    }

    #[test]
    fn test_empty_dataset_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let ds = dataset(&["a", "b"], &[]);
        write_dataset(&ds, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a,b\n");
    }
}

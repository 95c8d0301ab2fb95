//! In-memory tabular dataset shared by every cleaning stage

use serde_json::{Map, Number, Value};

/// A single row: column name mapped to a raw cell value.
///
/// `Value::Null` and an absent key both mean missing.
pub type Row = Map<String, Value>;

/// Ordered rows with a named, ordered column list.
///
/// Stages consume a `Dataset` and return a new one; nothing mutates a
/// dataset still held by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given column order.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a dataset from pre-built rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Append a column name to the header if not already present.
    pub fn add_column(&mut self, name: &str) {
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
    }

    /// Decompose into column list and rows for a stage to rebuild.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.columns, self.rows)
    }

    /// Project onto the named columns, in the given order, dropping all
    /// other cell values. Requested columns absent from a row stay absent.
    pub fn project(self, keep: &[&str]) -> Dataset {
        let columns: Vec<String> = keep.iter().map(|c| c.to_string()).collect();
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                keep.iter()
                    .filter_map(|col| row.get(*col).map(|v| ((*col).to_string(), v.clone())))
                    .collect()
            })
            .collect();
        Dataset { columns, rows }
    }
}

/// True when the cell is absent or explicitly null.
pub fn is_missing(row: &Row, column: &str) -> bool {
    matches!(row.get(column), None | Some(Value::Null))
}

/// Numeric view of a cell: numbers directly, numeric strings parsed,
/// booleans as 0/1. Anything else has no numeric interpretation.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Wrap a float back into a cell, preferring an integer representation
/// when the value is integral.
pub fn number_value(f: f64) -> Value {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Canonical text form of a cell: strings unchanged, integral numbers
/// without a decimal point, other floats via standard formatting.
pub fn canonical_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 9.0e18 => {
                        format!("{}", f as i64)
                    }
                    Some(f) => f.to_string(),
                    None => String::new(),
                }
            }
        }
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

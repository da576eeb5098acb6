//! Loading samples from data files.
//!
//! Every cell or element becomes one sample. Cells that are not finite
//! numbers are kept as `InvalidInput` errors so the monitor can report and
//! skip them in stream order.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use anomaly::{parse_sample, AnomalyError, Result};
use anyhow::{anyhow, bail, Context};

/// Load samples from a CSV file.
///
/// `column` is a header name or a zero-based index; defaults to the first column.
/// Without headers the first row is data and `column` must be an index.
pub fn load_csv(
    path: &Path,
    column: Option<&str>,
    has_headers: bool,
) -> anyhow::Result<Vec<Result<f64>>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .from_reader(BufReader::new(file));

    // Without headers this peeks at the first record without consuming it
    let headers = reader.headers().context("failed to read CSV headers")?.clone();
    let col_idx = match column {
        None => 0,
        Some(col) => match col.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) if !has_headers => bail!("column '{}' needs a header row; use an index", col),
            Err(_) => headers
                .iter()
                .position(|h| h.trim() == col)
                .ok_or_else(|| anyhow!("column '{}' not found", col))?,
        },
    };
    if col_idx >= headers.len() {
        bail!("column index {} out of range ({} columns)", col_idx, headers.len());
    }

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("failed to read CSV record {}", row + 1))?;
        let cell = record.get(col_idx).unwrap_or("");
        samples.push(parse_sample(cell));
    }
    Ok(samples)
}

/// Load samples from a JSON file.
///
/// Accepts an array of numbers, an array of objects (using `column` or one of
/// `value`, `values`, `data`, `y`), or an object holding such an array under
/// `data`, `values`, `series` or `y`.
pub fn load_json(path: &Path, column: Option<&str>) -> anyhow::Result<Vec<Result<f64>>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let json: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).context("failed to parse JSON")?;

    let array = match &json {
        serde_json::Value::Array(arr) => arr,
        serde_json::Value::Object(obj) => ["data", "values", "series", "y"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(|v| v.as_array()))
            .ok_or_else(|| anyhow!("no data array found in JSON object"))?,
        _ => bail!("expected a JSON array or object"),
    };

    if array.iter().any(|v| v.is_object()) {
        let keys: Vec<&str> = match column {
            Some(col) => vec![col],
            None => vec!["value", "values", "data", "y"],
        };
        let key = keys
            .into_iter()
            .find(|key| array.iter().any(|obj| obj.get(*key).is_some()))
            .ok_or_else(|| anyhow!("no value field found in JSON objects"))?;
        return Ok(array
            .iter()
            .map(|obj| json_sample(obj.get(key).unwrap_or(&serde_json::Value::Null)))
            .collect());
    }

    Ok(array.iter().map(json_sample).collect())
}

fn json_sample(value: &serde_json::Value) -> Result<f64> {
    match value {
        serde_json::Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AnomalyError::InvalidInput(format!("{} is not representable", n))),
        serde_json::Value::String(s) => parse_sample(s),
        other => Err(AnomalyError::InvalidInput(format!("{} is not a number", other))),
    }
}

fn looks_like_json(path: &Path) -> anyhow::Result<bool> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(matches!(text.trim_start().as_bytes().first(), Some(b'[' | b'{')))
}

/// Load samples, picking the format from the file extension.
///
/// Files with any other extension are read as JSON when they start with
/// `[` or `{`, as CSV otherwise. A file without a single cell is an error.
pub fn load(
    path: &Path,
    column: Option<&str>,
    has_headers: bool,
) -> anyhow::Result<Vec<Result<f64>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let samples = match ext.as_str() {
        "csv" => load_csv(path, column, has_headers)?,
        "json" => load_json(path, column)?,
        _ if looks_like_json(path)? => load_json(path, column)?,
        _ => load_csv(path, column, has_headers)?,
    };

    if samples.is_empty() {
        bail!("no data found in {}", path.display());
    }
    Ok(samples)
}

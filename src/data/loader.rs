use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{LaunchDataset, LaunchRecord};

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch columns (the usual export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat table with the same column names
///
/// Extra columns are ignored. Every record is validated, so a returned
/// dataset always satisfies the [`LaunchRecord`] invariants.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    let dataset = LaunchDataset::from_records(records)
        .with_context(|| format!("validating launch records in {}", path.display()))?;
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<LaunchRecord>> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<LaunchRecord>> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &'static str| headers.iter().position(|h| h == name);
    let required = |name: &'static str| position(name).ok_or(DatasetError::MissingColumn(name));

    let site_idx = required(COL_SITE)?;
    let payload_idx = required(COL_PAYLOAD)?;
    let class_idx = required(COL_CLASS)?;
    let category_idx = required(COL_BOOSTER_CATEGORY)?;
    let flight_idx = position(COL_FLIGHT_NUMBER);
    let version_idx = position(COL_BOOSTER_VERSION);

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let payload_raw = field(payload_idx);
        let payload_mass_kg = payload_raw.parse::<f64>().with_context(|| {
            format!("Row {row_no}, {COL_PAYLOAD}: '{payload_raw}' is not a number")
        })?;

        let flight_number = match flight_idx.map(field) {
            Some(raw) if !raw.is_empty() => Some(parse_flight_number(raw, row_no)?),
            _ => None,
        };

        records.push(LaunchRecord {
            site: field(site_idx).to_string(),
            payload_mass_kg,
            outcome: parse_outcome(field(class_idx), row_no)?,
            booster_version_category: field(category_idx).to_string(),
            flight_number,
            booster_version: version_idx
                .map(field)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        });
    }

    Ok(records)
}

/// Class labels appear as `1`/`0` or, after a pandas round-trip, `1.0`/`0.0`.
fn parse_outcome(raw: &str, row: usize) -> Result<u8, DatasetError> {
    match raw {
        "0" => Ok(0),
        "1" => Ok(1),
        _ => match raw.parse::<f64>() {
            Ok(v) => outcome_from_f64(v, row),
            Err(_) => Err(DatasetError::InvalidOutcome {
                row,
                value: raw.to_string(),
            }),
        },
    }
}

fn outcome_from_f64(v: f64, row: usize) -> Result<u8, DatasetError> {
    if v == 0.0 {
        Ok(0)
    } else if v == 1.0 {
        Ok(1)
    } else {
        Err(DatasetError::InvalidOutcome {
            row,
            value: v.to_string(),
        })
    }
}

fn parse_flight_number(raw: &str, row: usize) -> Result<u32> {
    if let Ok(n) = raw.parse::<u32>() {
        return Ok(n);
    }
    match raw.parse::<f64>().ok().and_then(flight_number_from_f64) {
        Some(n) => Ok(n),
        None => bail!("Row {row}, {COL_FLIGHT_NUMBER}: '{raw}' is not a flight number"),
    }
}

fn flight_number_from_f64(v: f64) -> Option<u32> {
    (v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64).then_some(v as u32)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "class": 0,
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<LaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<Vec<LaunchRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let obj = row
                .as_object()
                .with_context(|| format!("Row {i} is not a JSON object"))?;
            json_record(obj, i)
        })
        .collect()
}

fn json_record(obj: &Map<String, JsonValue>, row: usize) -> Result<LaunchRecord> {
    let site = json_string(obj, COL_SITE)?.with_context(|| format!("Row {row}: '{COL_SITE}'"))?;
    let category = json_string(obj, COL_BOOSTER_CATEGORY)?
        .with_context(|| format!("Row {row}: '{COL_BOOSTER_CATEGORY}'"))?;

    let payload_mass_kg = obj
        .get(COL_PAYLOAD)
        .ok_or(DatasetError::MissingColumn(COL_PAYLOAD))?
        .as_f64()
        .with_context(|| format!("Row {row}, {COL_PAYLOAD}: not a number"))?;

    let outcome = match obj.get(COL_CLASS).ok_or(DatasetError::MissingColumn(COL_CLASS))? {
        JsonValue::Number(n) => outcome_from_f64(n.as_f64().unwrap_or(f64::NAN), row)?,
        JsonValue::String(s) => parse_outcome(s.trim(), row)?,
        other => {
            return Err(DatasetError::InvalidOutcome {
                row,
                value: other.to_string(),
            }
            .into());
        }
    };

    let flight_number = match obj.get(COL_FLIGHT_NUMBER) {
        None | Some(JsonValue::Null) => None,
        Some(v) => {
            let n = v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .or_else(|| v.as_f64().and_then(flight_number_from_f64))
                .with_context(|| format!("Row {row}, {COL_FLIGHT_NUMBER}: not a flight number"))?;
            Some(n)
        }
    };

    let booster_version = match obj.get(COL_BOOSTER_VERSION) {
        None | Some(JsonValue::Null) => None,
        Some(v) => {
            let version = v
                .as_str()
                .with_context(|| format!("Row {row}, {COL_BOOSTER_VERSION}: not a string"))?;
            Some(version.to_string())
        }
    };

    Ok(LaunchRecord {
        site,
        payload_mass_kg,
        outcome,
        booster_version_category: category,
        flight_number,
        booster_version,
    })
}

/// `Err` when the key is absent entirely, `Ok(None)` when present but not a string.
fn json_string(obj: &Map<String, JsonValue>, key: &'static str) -> Result<Option<String>> {
    let value = obj.get(key).ok_or(DatasetError::MissingColumn(key))?;
    Ok(value.as_str().map(|s| s.trim().to_string()))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table of launch records.
///
/// Numeric columns may be Int32, Int64, Float32 or Float64 (pandas writes
/// `class` as int64 and payloads as double); string columns Utf8 or
/// LargeUtf8.
fn load_parquet(path: &Path) -> Result<Vec<LaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = records.len();
        records.extend(batch_records(&batch, offset)?);
    }

    Ok(records)
}

fn batch_records(batch: &RecordBatch, offset: usize) -> Result<Vec<LaunchRecord>> {
    let required = |name: &'static str| {
        batch
            .column_by_name(name)
            .ok_or(DatasetError::MissingColumn(name))
    };

    let site_col = required(COL_SITE)?;
    let payload_col = required(COL_PAYLOAD)?;
    let class_col = required(COL_CLASS)?;
    let category_col = required(COL_BOOSTER_CATEGORY)?;
    let flight_col = batch.column_by_name(COL_FLIGHT_NUMBER);
    let version_col = batch.column_by_name(COL_BOOSTER_VERSION);

    let mut records = Vec::with_capacity(batch.num_rows());

    for i in 0..batch.num_rows() {
        let row = offset + i;

        let site = string_value(site_col, i)
            .with_context(|| format!("Row {row}: '{COL_SITE}' is not a string"))?;
        let category = string_value(category_col, i)
            .with_context(|| format!("Row {row}: '{COL_BOOSTER_CATEGORY}' is not a string"))?;
        let payload_mass_kg = numeric_value(payload_col, i)
            .with_context(|| format!("Row {row}: '{COL_PAYLOAD}' is not a number"))?;
        let class = numeric_value(class_col, i)
            .with_context(|| format!("Row {row}: '{COL_CLASS}' is not a number"))?;

        // Optional columns: a null cell is absent, anything else must parse.
        let flight_number = match flight_col {
            Some(col) if !col.is_null(i) => Some(
                numeric_value(col, i)
                    .and_then(flight_number_from_f64)
                    .with_context(|| {
                        format!("Row {row}, {COL_FLIGHT_NUMBER}: not a flight number")
                    })?,
            ),
            _ => None,
        };
        let booster_version = match version_col {
            Some(col) if !col.is_null(i) => Some(
                string_value(col, i)
                    .with_context(|| format!("Row {row}, {COL_BOOSTER_VERSION}: not a string"))?,
            ),
            _ => None,
        };

        records.push(LaunchRecord {
            site,
            payload_mass_kg,
            outcome: outcome_from_f64(class, row)?,
            booster_version_category: category,
            flight_number,
            booster_version,
        });
    }

    Ok(records)
}

// -- Arrow helpers --

/// Read a numeric cell as `f64`; `None` for nulls and non-numeric columns.
fn numeric_value(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Int32 => Some(col.as_primitive::<Int32Type>().value(row) as f64),
        DataType::Int64 => Some(col.as_primitive::<Int64Type>().value(row) as f64),
        DataType::Float32 => Some(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => Some(col.as_primitive::<Float64Type>().value(row)),
        _ => None,
    }
}

/// Read a string cell; `None` for nulls and non-string columns.
fn string_value(col: &ArrayRef, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    match col.data_type() {
        DataType::Utf8 => Some(col.as_string::<i32>().value(row).trim().to_string()),
        DataType::LargeUtf8 => Some(col.as_string::<i64>().value(row).trim().to_string()),
        _ => None,
    }
}

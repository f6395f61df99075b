use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    CellValue, LaunchDataset, LaunchRecord, Outcome, SkippedRow, COL_BOOSTER_CATEGORY,
    COL_BOOSTER_VERSION, COL_CLASS, COL_FLIGHT_NUMBER, COL_LAUNCH_SITE, COL_PAYLOAD_MASS,
    REQUIRED_COLUMNS,
};
use crate::error::{LoadError, RowError};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the launch record column names (recommended)
/// * `.json`    – `[{ "Launch Site": "...", "Payload Mass (kg)": 0.0, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Rows with unusable values are skipped and listed in
/// [`LaunchDataset::skipped`]; a missing column or a file without a single
/// valid row is an error.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    log::info!(
        "Loaded {} launch records from {} ({} sites, {} rows skipped)",
        dataset.len(),
        path.display(),
        dataset.sites.len(),
        dataset.skipped.len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row assembly shared by all formats
// ---------------------------------------------------------------------------

/// Build one record from a cell lookup keyed by column name.
fn build_record(cell: impl Fn(&str) -> CellValue) -> Result<LaunchRecord, RowError> {
    let launch_site = cell(COL_LAUNCH_SITE)
        .as_text()
        .ok_or(RowError::MissingValue {
            column: COL_LAUNCH_SITE,
        })?;

    let payload_cell = cell(COL_PAYLOAD_MASS);
    let payload_mass_kg = payload_cell
        .as_f64()
        .filter(|m| m.is_finite() && *m >= 0.0)
        .ok_or_else(|| RowError::InvalidPayload(payload_cell.clone()))?;

    let class_cell = cell(COL_CLASS);
    let outcome =
        Outcome::from_cell(&class_cell).ok_or_else(|| RowError::InvalidClass(class_cell.clone()))?;

    let booster_category = cell(COL_BOOSTER_CATEGORY)
        .as_text()
        .ok_or(RowError::MissingValue {
            column: COL_BOOSTER_CATEGORY,
        })?;

    let flight_number = cell(COL_FLIGHT_NUMBER)
        .as_f64()
        .filter(|n| n.fract() == 0.0)
        .map(|n| n as i64);
    let booster_version = cell(COL_BOOSTER_VERSION).as_text();

    Ok(LaunchRecord {
        launch_site,
        payload_mass_kg,
        outcome,
        booster_category,
        flight_number,
        booster_version,
    })
}

/// Accumulates accepted records and skipped rows while reading a file.
#[derive(Default)]
struct RowCollector {
    records: Vec<LaunchRecord>,
    skipped: Vec<SkippedRow>,
}

impl RowCollector {
    fn push(&mut self, row: usize, result: Result<LaunchRecord, RowError>) {
        match result {
            Ok(rec) => self.records.push(rec),
            Err(e) => self.skip(row, e.to_string()),
        }
    }

    fn skip(&mut self, row: usize, reason: String) {
        log::warn!("Skipping row {row}: {reason}");
        self.skipped.push(SkippedRow { row, reason });
    }

    fn finish(self) -> Result<LaunchDataset> {
        if self.records.is_empty() {
            return Err(LoadError::Empty {
                skipped: self.skipped.len(),
            }
            .into());
        }
        Ok(LaunchDataset::from_records(self.records, self.skipped))
    }
}

fn check_required_columns(mut present: impl FnMut(&str) -> bool) -> Result<(), LoadError> {
    match REQUIRED_COLUMNS.iter().find(|col| !present(col)) {
        Some(col) => Err(LoadError::MissingColumn(col.to_string())),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one launch per line.
/// Extra columns are ignored.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    check_required_columns(|col| headers.iter().any(|h| h == col))?;

    let mut rows = RowCollector::default();
    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                rows.skip(row_no, format!("unreadable CSV row: {e}"));
                continue;
            }
        };

        let cell = |col: &str| {
            headers
                .iter()
                .position(|h| h == col)
                .and_then(|idx| record.get(idx))
                .map(guess_cell_type)
                .unwrap_or(CellValue::Null)
        };
        rows.push(row_no, build_record(cell));
    }

    rows.finish()
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::Text(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Flight Number": 1,
///     "Launch Site": "CCAFS LC-40",
///     "class": 0,
///     "Payload Mass (kg)": 0.0,
///     "Booster Version": "F9 v1.0  B0003",
///     "Booster Version Category": "v1.0"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let entries = root.as_array().context("Expected top-level JSON array")?;

    // Column presence is judged on the union of keys, so one sparse row
    // does not reject the file.
    check_required_columns(|col| {
        entries
            .iter()
            .any(|e| e.as_object().is_some_and(|o| o.contains_key(col)))
    })?;

    let mut rows = RowCollector::default();
    for (i, entry) in entries.iter().enumerate() {
        let Some(obj) = entry.as_object() else {
            rows.skip(i, "row is not a JSON object".to_string());
            continue;
        };
        let cell = |col: &str| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null);
        rows.push(i, build_record(cell));
    }

    rows.finish()
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per launch record field.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`), as well as `generate_sample`.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    check_required_columns(|col| schema.index_of(col).is_ok())?;

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = RowCollector::default();
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let batch_schema = batch.schema();

        let mut columns: Vec<(&str, ArrayRef)> = Vec::with_capacity(RECORD_COLUMNS.len());
        for name in RECORD_COLUMNS {
            if let Ok(idx) = batch_schema.index_of(name) {
                let decoded = decode_dictionary(batch.column(idx))
                    .with_context(|| format!("decoding column '{name}'"))?;
                columns.push((name, decoded));
            }
        }

        for row in 0..batch.num_rows() {
            let cell = |col: &str| {
                columns
                    .iter()
                    .find(|(name, _)| *name == col)
                    .map(|(_, array)| extract_cell(array, row))
                    .unwrap_or(CellValue::Null)
            };
            rows.push(row_offset + row, build_record(cell));
        }
        row_offset += batch.num_rows();
    }

    rows.finish()
}

/// Columns read from Parquet batches.
const RECORD_COLUMNS: [&str; 6] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
    COL_FLIGHT_NUMBER,
    COL_BOOSTER_VERSION,
];

/// Dictionary-encoded strings (pandas `category`, polars `Categorical`) are
/// cast to plain `Utf8`. Other columns pass through unchanged.
fn decode_dictionary(col: &ArrayRef) -> Result<ArrayRef> {
    match col.data_type() {
        DataType::Dictionary(_, values)
            if matches!(values.as_ref(), DataType::Utf8 | DataType::LargeUtf8) =>
        {
            Ok(cast(col.as_ref(), &DataType::Utf8)?)
        }
        _ => Ok(Arc::clone(col)),
    }
}

/// Extract a single cell from an Arrow column at a given row.
///
/// Unsupported types read as `Null`, so the row is rejected and reported.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|s| CellValue::Text(s.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|s| CellValue::Text(s.value(row).to_string())),
        DataType::Int8 => col
            .as_primitive_opt::<Int8Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int16 => col
            .as_primitive_opt::<Int16Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::UInt8 => col
            .as_primitive_opt::<UInt8Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::UInt16 => col
            .as_primitive_opt::<UInt16Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::UInt32 => col
            .as_primitive_opt::<UInt32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::UInt64 => col
            .as_primitive_opt::<UInt64Type>()
            .and_then(|a| i64::try_from(a.value(row)).ok())
            .map(CellValue::Integer),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => None,
    };
    cell.unwrap_or_else(|| {
        log::debug!("Unsupported parquet column type {:?}", col.data_type());
        CellValue::Null
    })
}

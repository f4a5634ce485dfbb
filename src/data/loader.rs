use std::collections::BTreeSet;
use std::path::Path;

use chrono::{Duration, NaiveDate, NaiveTime};

use super::model::{Column, ColumnType, Record, Schema, Table, Value};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Table> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    ingest(&bytes)
}

/// Parse an uploaded CSV byte stream into a [`Table`].
///
/// Layout: one header row with unique column names, then data rows with
/// exactly as many fields as the header. Column types are inferred from
/// the data rows (see [`ColumnType::infer`]) and every cell is coerced
/// with its column's type. Either the whole table parses or nothing does.
pub fn ingest(bytes: &[u8]) -> Result<Table> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(PipelineError::Parse("input is empty".into()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut seen = BTreeSet::new();
    for h in &headers {
        if !seen.insert(h.as_str()) {
            return Err(PipelineError::Parse(format!("duplicate column name '{h}'")));
        }
    }

    let mut rows: Vec<csv::StringRecord> = Vec::new();
    for result in reader.records() {
        rows.push(result.map_err(csv_error)?);
    }

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| Column {
            name: name.clone(),
            ty: ColumnType::infer(rows.iter().map(move |r| r.get(idx).unwrap_or(""))),
        })
        .collect();

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        let values = columns
            .iter()
            .zip(row.iter())
            .map(|(col, raw)| col.ty.coerce(&col.name, raw))
            .collect::<Result<Vec<Value>>>()?;
        records.push(Record::new(values));
    }

    log::debug!(
        "Ingested {} records with columns {:?}",
        records.len(),
        columns.iter().map(|c| (&c.name, c.ty)).collect::<Vec<_>>()
    );

    Ok(Table::new(Schema::new(columns), records))
}

fn csv_error(e: csv::Error) -> PipelineError {
    let line = e.position().map(|p| p.line());
    match (e.kind(), line) {
        (csv::ErrorKind::UnequalLengths { expected_len, len, .. }, Some(line)) => {
            PipelineError::Parse(format!(
                "line {line}: expected {expected_len} fields but found {len}"
            ))
        }
        (csv::ErrorKind::Utf8 { .. }, Some(line)) => {
            PipelineError::Parse(format!("line {line}: invalid UTF-8"))
        }
        _ => PipelineError::Parse(e.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Built-in sample data
// ---------------------------------------------------------------------------

pub const SAMPLE_METRIC_COLUMN: &str = "Energy / Metric";
pub const SAMPLE_DATE_COLUMN: &str = "Date";

/// The fixed "Physics and Modelling Data" table shown in the portfolio.
pub fn sample_table() -> Table {
    const STUDIES: [(&str, f64); 5] = [
        ("Alpha Decay", 4.2),
        ("Gamma Spectroscopy", 2.9),
        ("Nanoparticle Microscopy", 3.4),
        ("Organic Solar Cell Modelling", 6.1),
        ("Genetic Algorithm Optimisation", 7.1),
    ];

    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN);

    let schema = Schema::new(vec![
        Column { name: "Study".into(), ty: ColumnType::Text },
        Column { name: SAMPLE_METRIC_COLUMN.into(), ty: ColumnType::Number },
        Column { name: SAMPLE_DATE_COLUMN.into(), ty: ColumnType::Date },
    ]);

    let records = STUDIES
        .iter()
        .zip(0i64..)
        .map(|(&(study, metric), day)| {
            Record::new(vec![
                Value::Text(study.to_string()),
                Value::Number(metric),
                Value::Date(start + Duration::days(day)),
            ])
        })
        .collect();

    Table::new(schema, records)
}

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveTime};

use super::model::{parse_date, ColumnType, Table, Value};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Year buckets
// ---------------------------------------------------------------------------

/// Record counts per calendar year, iterated in ascending year order.
/// Years with no records are absent rather than zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearCounts(BTreeMap<i32, usize>);

impl YearCounts {
    pub fn iter(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.0.iter().map(|(&y, &n)| (y, n))
    }

    pub fn get(&self, year: i32) -> Option<usize> {
        self.0.get(&year).copied()
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(i32, usize)> for YearCounts {
    fn from_iter<I: IntoIterator<Item = (i32, usize)>>(iter: I) -> Self {
        YearCounts(iter.into_iter().collect())
    }
}

/// Count records per calendar year of `date_column`.
///
/// Accepts date columns, numeric columns holding whole years, and text
/// columns whose every non-empty cell is a whole year or a parseable date.
/// The first cell that is neither is reported. Empty cells are skipped.
pub fn aggregate_by_year(table: &Table, date_column: &str) -> Result<YearCounts> {
    let idx = table.schema().index_of(date_column)?;
    let ty = table.schema().columns[idx].ty;

    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for record in table.records() {
        let value = record.get(idx);
        if value.is_null() {
            continue;
        }
        let year = extract_year(ty, value).ok_or_else(|| PipelineError::TypeCoercion {
            column: date_column.to_string(),
            value: value.to_string(),
            expected: ColumnType::Date.name(),
        })?;
        *counts.entry(year).or_default() += 1;
    }

    log::debug!("Aggregated {date_column:?} into {} year buckets", counts.len());
    Ok(YearCounts(counts))
}

fn extract_year(ty: ColumnType, value: &Value) -> Option<i32> {
    match (ty, value) {
        (ColumnType::Date, Value::Date(d)) => Some(d.year()),
        (ColumnType::Number, Value::Number(v)) => whole_year(*v),
        (ColumnType::Text, Value::Text(s)) => s
            .trim()
            .parse::<i32>()
            .ok()
            .or_else(|| parse_date(s).map(|d| d.year())),
        _ => None,
    }
}

fn whole_year(v: f64) -> Option<i32> {
    let in_range = v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX);
    // Guarded above, so the cast cannot truncate.
    in_range.then_some(v as i32)
}

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// `(days since 1970-01-01, value)` points for a metric-over-time chart,
/// in table order. Records missing either cell are skipped.
pub fn time_series(table: &Table, date_column: &str, value_column: &str) -> Result<Vec<[f64; 2]>> {
    let date_idx = table.schema().index_of(date_column)?;
    let value_idx = table.schema().index_of(value_column)?;

    for (idx, name, expected) in [
        (date_idx, date_column, ColumnType::Date),
        (value_idx, value_column, ColumnType::Number),
    ] {
        let ty = table.schema().columns[idx].ty;
        if ty != expected {
            return Err(PipelineError::TypeCoercion {
                column: name.to_string(),
                value: format!("{} column", ty.name()),
                expected: expected.name(),
            });
        }
    }

    let epoch = NaiveDate::default().and_time(NaiveTime::MIN);
    let points = table
        .records()
        .iter()
        .filter_map(|r| {
            let date = r.get(date_idx).as_date()?;
            let value = r.get(value_idx).as_f64()?;
            let elapsed = date.signed_duration_since(epoch);
            Some([elapsed.num_seconds() as f64 / 86_400.0, value])
        })
        .collect();
    Ok(points)
}

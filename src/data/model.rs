use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Value – a single cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value. The variant is fixed per column by the
/// column's [`ColumnType`]; `Null` marks an empty cell in any column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    Null,
}

impl Value {
    /// Uniform string form used by keyword search.
    pub fn to_searchable_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{s}"),
            Value::Number(v) => write!(f, "{v}"),
            Value::Date(d) if d.time() == NaiveTime::MIN => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            Value::Null => write!(f, "<null>"),
        }
    }
}

/// Parse the date layouts accepted for date-typed columns.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    let s = s.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}

/// Numeric cells must be finite; `inf`, `NaN` and overflowing literals stay text.
fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Number,
    Date,
}

impl ColumnType {
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
        }
    }

    /// Infer the narrowest type that every non-empty cell satisfies.
    pub fn infer<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> Self {
        let mut present = cells.filter(|c| !c.is_empty()).peekable();
        if present.peek().is_none() {
            return ColumnType::Text;
        }
        if present.clone().all(|c| parse_finite(c).is_some()) {
            ColumnType::Number
        } else if present.all(|c| parse_date(c).is_some()) {
            ColumnType::Date
        } else {
            ColumnType::Text
        }
    }

    /// Coerce a raw cell to this type. Empty cells become `Null`.
    pub fn coerce(self, column: &str, raw: &str) -> Result<Value> {
        if raw.is_empty() {
            return Ok(Value::Null);
        }
        let mismatch = || PipelineError::TypeCoercion {
            column: column.to_string(),
            value: raw.to_string(),
            expected: self.name(),
        };
        match self {
            ColumnType::Text => Ok(Value::Text(raw.to_string())),
            ColumnType::Number => parse_finite(raw).map(Value::Number).ok_or_else(mismatch),
            ColumnType::Date => parse_date(raw).map(Value::Date).ok_or_else(mismatch),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

/// Ordered column definitions shared by every record of a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Schema { columns }
    }

    /// Position of `name`, or `ColumnNotFound`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| PipelineError::ColumnNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Record / Table
// ---------------------------------------------------------------------------

/// One row; values are positional, aligned with the table's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub values: Vec<Value>,
}

impl Record {
    pub fn new(values: Vec<Value>) -> Self {
        Record { values }
    }

    pub fn get(&self, index: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(index).unwrap_or(&NULL)
    }
}

/// An ordered, immutable set of records sharing one schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    schema: Schema,
    records: Vec<Record>,
}

impl Table {
    pub fn new(schema: Schema, records: Vec<Record>) -> Self {
        Table { schema, records }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Value of `column` in every record, in table order.
    pub fn column_values(&self, column: &str) -> Result<impl Iterator<Item = &Value>> {
        let idx = self.schema.index_of(column)?;
        Ok(self.records.iter().map(move |r| r.get(idx)))
    }

    /// Build a new table with the same schema holding only the records
    /// that satisfy `keep`.
    pub fn retain_where(&self, mut keep: impl FnMut(&Record) -> bool) -> Table {
        Table {
            schema: self.schema.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn searchable_text_uses_plain_forms() {
        let date = parse_date("2024-01-02").unwrap();
        assert_eq!(Value::Number(4.2).to_searchable_text(), "4.2");
        assert_eq!(Value::Number(2021.0).to_searchable_text(), "2021");
        assert_eq!(Value::Date(date).to_searchable_text(), "2024-01-02");
        assert_eq!(Value::Text("Alpha Decay".into()).to_searchable_text(), "Alpha Decay");
        assert_eq!(Value::Null.to_searchable_text(), "");
    }

    #[test]
    fn datetime_keeps_time_component_in_text() {
        let dt = parse_date("2024-03-05T14:30:00").unwrap();
        assert_eq!(Value::Date(dt).to_string(), "2024-03-05 14:30:00");
    }

    #[test]
    fn parse_date_accepts_known_layouts() {
        assert!(parse_date("2024-01-01").is_some());
        assert!(parse_date("2024/01/01").is_some());
        assert!(parse_date("2024-01-01 08:00:00").is_some());
        assert!(parse_date("2024-01-01T08:00:00+02:00").is_some());
        assert!(parse_date("January 2024").is_none());
        assert!(parse_date("2024").is_none());
    }

    #[test]
    fn infer_prefers_number_then_date_then_text() {
        assert_eq!(ColumnType::infer(["1", "2.5", ""].into_iter()), ColumnType::Number);
        assert_eq!(
            ColumnType::infer(["2024-01-01", "2025/06/30"].into_iter()),
            ColumnType::Date
        );
        assert_eq!(ColumnType::infer(["2024-01-01", "soon"].into_iter()), ColumnType::Text);
        assert_eq!(ColumnType::infer(["", ""].into_iter()), ColumnType::Text);
    }

    #[test]
    fn non_finite_spellings_are_not_numbers() {
        assert_eq!(ColumnType::infer(["Infinity", "NaN"].into_iter()), ColumnType::Text);
        assert_eq!(ColumnType::infer(["1", "inf"].into_iter()), ColumnType::Text);
        assert_eq!(ColumnType::infer(["1e400"].into_iter()), ColumnType::Text);
        assert!(ColumnType::Number.coerce("Energy", "NaN").is_err());
    }

    #[test]
    fn coerce_reports_column_and_value() {
        let err = ColumnType::Number.coerce("Energy", "high").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::TypeCoercion { ref column, ref value, expected: "number" }
                if column == "Energy" && value == "high"
        ));
        assert_eq!(ColumnType::Date.coerce("Date", "").unwrap(), Value::Null);
    }

    #[test]
    fn missing_column_is_reported() {
        let schema = Schema::new(vec![Column { name: "Study".into(), ty: ColumnType::Text }]);
        assert_eq!(schema.index_of("Study").unwrap(), 0);
        assert!(matches!(
            schema.index_of("Year"),
            Err(PipelineError::ColumnNotFound(name)) if name == "Year"
        ));
    }
}

use super::model::{ColumnType, Table};
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Filter specifications
// ---------------------------------------------------------------------------

/// Case-insensitive substring search across every column.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordFilter {
    pub term: String,
}

/// Closed interval `[low, high]` on a numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    pub column: String,
    pub low: f64,
    pub high: f64,
}

/// One step of a filter chain, built per user interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    Keyword(KeywordFilter),
    Range(RangeFilter),
}

impl FilterSpec {
    pub fn keyword(term: impl Into<String>) -> Self {
        FilterSpec::Keyword(KeywordFilter { term: term.into() })
    }

    pub fn range(column: impl Into<String>, low: f64, high: f64) -> Self {
        FilterSpec::Range(RangeFilter {
            column: column.into(),
            low,
            high,
        })
    }

    pub fn apply(&self, table: &Table) -> Result<Table> {
        match self {
            FilterSpec::Keyword(k) => Ok(filter_by_keyword(table, &k.term)),
            FilterSpec::Range(r) => filter_by_range(table, &r.column, r.low, r.high),
        }
    }
}

/// Apply each spec in order, feeding the output of one into the next.
pub fn apply_filters(table: &Table, specs: &[FilterSpec]) -> Result<Table> {
    specs
        .iter()
        .try_fold(table.clone(), |current, spec| spec.apply(&current))
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Keep records where any cell's searchable text contains `term`,
/// ignoring case. An empty term returns the table unchanged.
pub fn filter_by_keyword(table: &Table, term: &str) -> Table {
    if term.is_empty() {
        return table.clone();
    }
    let needle = term.to_lowercase();
    let filtered = table.retain_where(|record| {
        record
            .values
            .iter()
            .any(|v| v.to_searchable_text().to_lowercase().contains(&needle))
    });
    log::debug!(
        "Keyword {term:?} kept {} of {} records",
        filtered.len(),
        table.len()
    );
    filtered
}

/// Keep records whose value in `column` lies in `[low, high]`.
/// Empty cells never match.
pub fn filter_by_range(table: &Table, column: &str, low: f64, high: f64) -> Result<Table> {
    // `!(low <= high)` also rejects NaN bounds.
    if !(low <= high) {
        return Err(PipelineError::InvalidRange { low, high });
    }

    let idx = table.schema().index_of(column)?;
    let ty = table.schema().columns[idx].ty;
    if ty != ColumnType::Number {
        return Err(PipelineError::TypeCoercion {
            column: column.to_string(),
            value: format!("{} column", ty.name()),
            expected: ColumnType::Number.name(),
        });
    }

    let filtered = table.retain_where(|record| {
        record
            .get(idx)
            .as_f64()
            .is_some_and(|v| low <= v && v <= high)
    });
    log::debug!(
        "Range {column:?} [{low}, {high}] kept {} of {} records",
        filtered.len(),
        table.len()
    );
    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{ingest, sample_table, SAMPLE_METRIC_COLUMN};
    use crate::data::model::Value;
    use pretty_assertions::assert_eq;

    fn energy_table() -> Table {
        ingest(b"Energy,Date\n4.2,2024-01-01\n1.5,2024-01-02\n7.1,2025-01-01\n").unwrap()
    }

    fn publications() -> Table {
        ingest(
            b"Experiment,Year,Notes\n\
              Alpha Decay,2023,lab\n\
              Gamma Spectroscopy,2024,\n\
              Solar cells,2024,ALPHA draft\n\
              Microscopy,2022,SEM\n",
        )
        .unwrap()
    }

    #[test]
    fn empty_keyword_is_identity() {
        let table = publications();
        assert_eq!(filter_by_keyword(&table, ""), table);
    }

    #[test]
    fn keyword_matches_any_column_ignoring_case() {
        let table = publications();
        let hits = filter_by_keyword(&table, "alpha");
        let names: Vec<String> = hits
            .column_values("Experiment")
            .unwrap()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(names, vec!["Alpha Decay", "Solar cells"]);
    }

    #[test]
    fn keyword_matches_number_text() {
        let table = publications();
        let hits = filter_by_keyword(&table, "2024");
        assert_eq!(hits.len(), 2);
        assert_eq!(filter_by_keyword(&table, "nothing here").len(), 0);
    }

    #[test]
    fn keyword_result_is_exact_partition() {
        let table = publications();
        let term = "sc";
        let hits = filter_by_keyword(&table, term);
        for record in table.records() {
            let matches = record
                .values
                .iter()
                .any(|v| v.to_searchable_text().to_lowercase().contains(term));
            assert_eq!(hits.records().contains(record), matches);
        }
    }

    #[test]
    fn range_keeps_closed_interval() {
        let table = energy_table();
        let kept = filter_by_range(&table, "Energy", 2.0, 10.0).unwrap();
        assert_eq!(kept.records(), &[table.records()[0].clone(), table.records()[2].clone()]);

        let edge = filter_by_range(&table, "Energy", 4.2, 7.1).unwrap();
        assert_eq!(edge.len(), 2);
    }

    #[test]
    fn range_is_idempotent() {
        let table = sample_table();
        let once = filter_by_range(&table, SAMPLE_METRIC_COLUMN, 3.0, 6.5).unwrap();
        let twice = filter_by_range(&once, SAMPLE_METRIC_COLUMN, 3.0, 6.5).unwrap();
        assert_eq!(once, twice);
        for v in once.column_values(SAMPLE_METRIC_COLUMN).unwrap() {
            let v = v.as_f64().unwrap();
            assert!((3.0..=6.5).contains(&v));
        }
    }

    #[test]
    fn range_rejects_inverted_or_nan_bounds() {
        let table = energy_table();
        assert!(matches!(
            filter_by_range(&table, "Energy", 5.0, 1.0),
            Err(PipelineError::InvalidRange { .. })
        ));
        assert!(matches!(
            filter_by_range(&table, "Energy", f64::NAN, 1.0),
            Err(PipelineError::InvalidRange { .. })
        ));
    }

    #[test]
    fn range_on_unknown_or_text_column_fails() {
        let table = publications();
        assert!(matches!(
            filter_by_range(&table, "Energy", 0.0, 1.0),
            Err(PipelineError::ColumnNotFound(_))
        ));
        assert!(matches!(
            filter_by_range(&table, "Experiment", 0.0, 1.0),
            Err(PipelineError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn range_skips_empty_cells() {
        let table = ingest(b"Name,Score\na,\nb,5\n").unwrap();
        let kept = filter_by_range(&table, "Score", 0.0, 10.0).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.records()[0].get(1), &Value::Number(5.0));
    }

    #[test]
    fn filters_apply_in_sequence() {
        let table = sample_table();
        let specs = [
            FilterSpec::range(SAMPLE_METRIC_COLUMN, 3.0, 10.0),
            FilterSpec::keyword("model"),
        ];
        let result = apply_filters(&table, &specs).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.records()[0].get(0),
            &Value::Text("Organic Solar Cell Modelling".into())
        );
        assert_eq!(apply_filters(&table, &[]).unwrap(), table);
    }
}

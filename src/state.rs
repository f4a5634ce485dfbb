use crate::config::AppConfig;
use crate::data::aggregate::{aggregate_by_year, time_series, YearCounts};
use crate::data::filter::{apply_filters, filter_by_keyword, FilterSpec};
use crate::data::loader::{sample_table, SAMPLE_DATE_COLUMN, SAMPLE_METRIC_COLUMN};
use crate::data::model::{ColumnType, Table};
use crate::error::PipelineError;

/// Column preferred for the publication timeline.
pub const TIMELINE_COLUMN: &str = "Year";

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    AcademicProfile,
    Research,
    Publications,
    Portfolio,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::AcademicProfile,
        Section::Research,
        Section::Publications,
        Section::Portfolio,
        Section::Contact,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::AcademicProfile => "Academic Profile",
            Section::Research => "Research & Experience",
            Section::Publications => "Publications",
            Section::Portfolio => "Computational & STEM Portfolio",
            Section::Contact => "Contact",
        }
    }
}

/// Which user action raised the message on the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOrigin {
    Portfolio,
    Publications,
    Document,
}

// ---------------------------------------------------------------------------
// Uploaded publications
// ---------------------------------------------------------------------------

pub struct Publications {
    /// File name shown above the grid.
    pub source: String,
    pub table: Table,
    /// Result of the keyword filter; `None` while the search box is empty.
    pub matches: Option<Table>,
    /// Timeline column and its per-year counts.
    pub timeline: Option<(String, YearCounts)>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Lives for one session.
pub struct AppState {
    pub config: AppConfig,
    pub section: Section,

    /// Built-in sample table, constructed once at startup.
    pub sample: Table,
    /// Current slider bounds on the sample metric.
    pub metric_low: f64,
    pub metric_high: f64,
    /// Sample records inside the current bounds.
    pub filtered_sample: Table,
    /// Metric-over-time points of `filtered_sample`.
    pub metric_series: Vec<[f64; 2]>,

    pub publications: Option<Publications>,
    pub keyword: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    /// Action that produced `status_message`; only that action clears it.
    pub status_origin: Option<StatusOrigin>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let sample = sample_table();
        let [metric_low, metric_high] = config.metric_range;
        let mut state = Self {
            config,
            section: Section::default(),
            filtered_sample: sample.clone(),
            sample,
            metric_low,
            metric_high,
            metric_series: Vec::new(),
            publications: None,
            keyword: String::new(),
            status_message: None,
            status_origin: None,
        };
        state.refilter_sample();
        state
    }

    /// Recompute the portfolio view from the slider bounds. On failure the
    /// previous view is kept and the error is reported.
    pub fn refilter_sample(&mut self) {
        let specs = [FilterSpec::range(
            SAMPLE_METRIC_COLUMN,
            self.metric_low,
            self.metric_high,
        )];
        let result = apply_filters(&self.sample, &specs).and_then(|filtered| {
            let series = time_series(&filtered, SAMPLE_DATE_COLUMN, SAMPLE_METRIC_COLUMN)?;
            Ok((filtered, series))
        });

        match result {
            Ok((filtered, series)) => {
                self.filtered_sample = filtered;
                self.metric_series = series;
                self.clear_status(StatusOrigin::Portfolio);
            }
            Err(e) => self.report_error(StatusOrigin::Portfolio, &e),
        }
    }

    /// Update the slider bounds, clamped to the configured range.
    pub fn set_metric_range(&mut self, low: f64, high: f64) {
        let [min, max] = self.config.metric_range;
        self.metric_low = low.clamp(min, max);
        self.metric_high = high.clamp(min, max);
        self.refilter_sample();
    }

    /// Install a freshly ingested publications table.
    pub fn set_publications(&mut self, source: String, table: Table) {
        self.clear_status(StatusOrigin::Publications);
        let timeline = timeline_column(&table).and_then(|column| {
            match aggregate_by_year(&table, &column) {
                Ok(counts) => Some((column, counts)),
                Err(e) => {
                    self.report_error(StatusOrigin::Publications, &e);
                    None
                }
            }
        });

        self.publications = Some(Publications {
            source,
            table,
            matches: None,
            timeline,
        });
        self.refilter_publications();
    }

    /// Re-run the keyword search over the uploaded table.
    pub fn refilter_publications(&mut self) {
        let Some(pubs) = &mut self.publications else {
            return;
        };
        pubs.matches = if self.keyword.is_empty() {
            None
        } else {
            Some(filter_by_keyword(&pubs.table, &self.keyword))
        };
    }

    pub fn report_error(&mut self, origin: StatusOrigin, err: &PipelineError) {
        log::warn!("{err}");
        self.status_message = Some(format!("Error: {err}"));
        self.status_origin = Some(origin);
    }

    /// Drop the status line if `origin` put it there.
    pub fn clear_status(&mut self, origin: StatusOrigin) {
        if self.status_origin == Some(origin) {
            self.status_message = None;
            self.status_origin = None;
        }
    }
}

/// The `Year` column if present, otherwise the first date-typed column.
pub fn timeline_column(table: &Table) -> Option<String> {
    let schema = table.schema();
    if schema.contains(TIMELINE_COLUMN) {
        return Some(TIMELINE_COLUMN.to_string());
    }
    schema
        .columns
        .iter()
        .find(|c| c.ty == ColumnType::Date)
        .map(|c| c.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::ingest;

    #[test]
    fn slider_bounds_filter_sample_and_series() {
        let mut state = AppState::new(AppConfig::default());
        assert_eq!(state.filtered_sample.len(), 5);
        assert_eq!(state.metric_series.len(), 5);

        state.set_metric_range(3.0, 6.5);
        assert_eq!(state.filtered_sample.len(), 3);
        assert_eq!(state.metric_series.len(), 3);
    }

    #[test]
    fn inverted_bounds_keep_last_view() {
        let mut state = AppState::new(AppConfig::default());
        state.set_metric_range(4.0, 10.0);
        let before = state.filtered_sample.clone();

        state.set_metric_range(8.0, 2.0);
        assert_eq!(state.filtered_sample, before);
        assert!(state.status_message.as_deref().unwrap_or("").contains("Invalid range"));
    }

    #[test]
    fn slider_success_keeps_unrelated_error() {
        let mut state = AppState::new(AppConfig::default());
        state.report_error(
            StatusOrigin::Document,
            &PipelineError::FileNotFound("assets/research.pdf".into()),
        );

        state.set_metric_range(2.0, 8.0);
        assert!(state.status_message.as_deref().unwrap_or("").contains("research.pdf"));

        state.set_metric_range(8.0, 2.0);
        assert_eq!(state.status_origin, Some(StatusOrigin::Portfolio));
        state.set_metric_range(2.0, 8.0);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn bounds_are_clamped_to_configured_range() {
        let mut state = AppState::new(AppConfig::default());
        state.set_metric_range(-5.0, 50.0);
        assert_eq!((state.metric_low, state.metric_high), (0.0, 10.0));
    }

    #[test]
    fn upload_builds_timeline_and_keyword_matches() {
        let mut state = AppState::new(AppConfig::default());
        let table = ingest(
            b"Title,Year\nTiny Metals,2023\nInverted OSCs,2024\nPoster: OSC stability,2024\n",
        )
        .unwrap();
        state.set_publications("pubs.csv".into(), table);

        let pubs = state.publications.as_ref().unwrap();
        let (column, counts) = pubs.timeline.as_ref().unwrap();
        assert_eq!(column, TIMELINE_COLUMN);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![(2023, 1), (2024, 2)]);
        assert!(pubs.matches.is_none());

        state.keyword = "osc".into();
        state.refilter_publications();
        let matches = state.publications.as_ref().unwrap().matches.as_ref().unwrap();
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn timeline_falls_back_to_date_column() {
        let table = ingest(b"Title,Presented\nTalk,2022-10-01\n").unwrap();
        assert_eq!(timeline_column(&table).as_deref(), Some("Presented"));

        let plain = ingest(b"Title,Venue\nTalk,SAIP\n").unwrap();
        assert_eq!(timeline_column(&plain), None);
    }

    #[test]
    fn bad_year_column_reports_error_without_timeline() {
        let mut state = AppState::new(AppConfig::default());
        let table = ingest(b"Title,Year\nDraft,in review\n").unwrap();
        state.set_publications("pubs.csv".into(), table);

        assert!(state.publications.as_ref().unwrap().timeline.is_none());
        assert!(state.status_message.is_some());
    }
}

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;
use crate::data::labels;
use crate::data::loader;
use crate::data::model::CanonicalTable;
use crate::data::pipeline::{self, PrepareOptions};
use crate::geo::{self, Outline};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// The dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    ContinentTotals,
    ContinentTrend,
    CauseOverYears,
    YearTrend,
    CauseTotals,
    TopCountries,
}

impl View {
    pub const ALL: [View; 6] = [
        View::ContinentTotals,
        View::ContinentTrend,
        View::CauseOverYears,
        View::YearTrend,
        View::CauseTotals,
        View::TopCountries,
    ];

    pub fn title(self) -> &'static str {
        match self {
            View::ContinentTotals => "Total de Mortes por Continente",
            View::ContinentTrend => "Tendência de Mortes por Continente",
            View::CauseOverYears => "Causas das mortes ao longo dos anos",
            View::YearTrend => "Tendência de Mortes por Ano",
            View::CauseTotals => "Total de Mortes por Causa",
            View::TopCountries => "Países com mais mortes",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Canonical table (None until a file loads successfully).
    pub table: Option<CanonicalTable>,

    /// File the current table came from.
    pub source: Option<PathBuf>,

    pub view: View,
    pub selected_continent: Option<String>,
    pub selected_cause: Option<String>,
    /// `None` means every year.
    pub selected_year: Option<i32>,

    /// Map outline, read the first time the map is shown.
    outline: Option<Result<Outline, String>>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            table: None,
            source: None,
            view: View::ContinentTotals,
            selected_continent: None,
            selected_cause: None,
            selected_year: None,
            outline: None,
            status_message: None,
        }
    }

    /// Load and prepare a raw file.  On failure the current table is kept and
    /// the error is shown in the status line.
    pub fn open(&mut self, path: &Path) {
        match read_table(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} canonical rows from {}",
                    table.len(),
                    path.display()
                );
                self.set_table(table);
                self.source = Some(path.to_path_buf());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Erro: {e:#}"));
            }
        }
    }

    /// Ingest a freshly prepared table and reset the selections to defaults.
    pub fn set_table(&mut self, table: CanonicalTable) {
        self.selected_continent = table.continents().into_iter().next();
        self.selected_cause = self.cause_options_for(&table).into_iter().next();
        self.selected_year = None;
        self.table = Some(table);
        self.status_message = None;
    }

    /// Cause selector entries: the all-causes aggregate first, then the
    /// others in order of appearance.
    pub fn cause_options(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(|t| self.cause_options_for(t))
            .unwrap_or_default()
    }

    fn cause_options_for(&self, table: &CanonicalTable) -> Vec<String> {
        let (mut all, rest): (Vec<String>, Vec<String>) = table
            .causes()
            .into_iter()
            .partition(|c| labels::is_all_causes(c));
        all.extend(rest);
        all
    }

    /// Rows the continent and year views sum over: the all-causes aggregate
    /// when the source has it, otherwise the whole table.
    pub fn totals_table(&self) -> Option<CanonicalTable> {
        let table = self.table.as_ref()?;
        let all = table.all_causes();
        Some(if all.is_empty() { table.clone() } else { all })
    }

    /// The configured map outline, read on first use.  `None` when no
    /// outline file is configured.
    pub fn outline(&mut self) -> Option<&Result<Outline, String>> {
        let path = self.config.outline_path.clone()?;
        let outline: &Result<Outline, String> = self.outline.get_or_insert_with(|| {
            geo::load_outline(&path).map_err(|e| {
                log::warn!("Map outline {} unavailable: {e}", path.display());
                e.to_string()
            })
        });
        Some(outline)
    }
}

fn read_table(path: &Path) -> Result<CanonicalTable> {
    let raw = loader::load_file(path)?;
    Ok(pipeline::prepare(&raw, PrepareOptions::default())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CanonicalRecord;

    fn rec(continent: &str, year: i32, cause: &str, deaths: u64) -> CanonicalRecord {
        CanonicalRecord {
            continent_code: String::new(),
            continent: continent.to_string(),
            country: "Chad".to_string(),
            year,
            cause: cause.to_string(),
            cause_code: String::new(),
            deaths,
        }
    }

    #[test]
    fn test_set_table_picks_defaults() {
        let mut state = AppState::new(Config::default());
        state.selected_year = Some(2015);
        state.set_table(CanonicalTable::from_records(vec![
            rec("África", 2015, "AVC", 1),
            rec("Europa", 2015, "Todas as causas", 2),
        ]));
        assert_eq!(state.selected_continent.as_deref(), Some("África"));
        assert_eq!(state.selected_cause.as_deref(), Some("Todas as causas"));
        assert_eq!(state.selected_year, None);
        assert_eq!(state.cause_options(), vec!["Todas as causas", "AVC"]);
    }

    #[test]
    fn test_totals_table_prefers_all_causes_rows() {
        let mut state = AppState::new(Config::default());
        assert!(state.totals_table().is_none());

        state.set_table(CanonicalTable::from_records(vec![
            rec("África", 2015, "AVC", 1),
            rec("África", 2015, "Todas as causas", 3),
        ]));
        assert_eq!(state.totals_table().map(|t| t.total_deaths()), Some(3));

        state.set_table(CanonicalTable::from_records(vec![rec("África", 2015, "AVC", 1)]));
        assert_eq!(state.totals_table().map(|t| t.total_deaths()), Some(1));
    }

    #[test]
    fn test_failed_open_keeps_previous_table() {
        let mut state = AppState::new(Config::default());
        state.set_table(CanonicalTable::from_records(vec![rec("África", 2015, "AVC", 1)]));
        state.open(Path::new("/nonexistent/pollution-panel/data.csv"));
        assert_eq!(state.table.as_ref().map(|t| t.len()), Some(1));
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_outline_absent_without_path() {
        let mut state = AppState::new(Config::default());
        assert!(state.outline().is_none());
    }

    #[test]
    fn test_outline_error_is_remembered() {
        let mut state = AppState::new(Config {
            outline_path: Some(PathBuf::from("/nonexistent/world.geojson")),
            ..Config::default()
        });
        assert!(matches!(state.outline(), Some(Err(_))));
        assert!(matches!(state.outline(), Some(Err(_))));
    }
}

use thiserror::Error;

use super::labels;
use super::model::{CanonicalRecord, CanonicalTable, Cell, RawTable};

/// Rows before this year are discarded.
pub const MIN_YEAR: i32 = 2014;

/// Sex codes of the single-sex breakdowns; only combined-sex rows are kept.
pub const SINGLE_SEX_CODES: [&str; 2] = ["SEX_MLE", "SEX_FMLE"];

/// Source column names read by the pipeline.  Everything else is dropped.
pub mod columns {
    pub const CONTINENT_CODE: &str = "ParentLocationCode";
    pub const CONTINENT: &str = "ParentLocation";
    pub const COUNTRY: &str = "Location";
    pub const YEAR: &str = "Period";
    pub const SEX_CODE: &str = "Dim1ValueCode";
    pub const CAUSE: &str = "Dim2";
    pub const CAUSE_CODE: &str = "Dim2ValueCode";
    pub const DEATHS: &str = "FactValueNumeric";
}

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("source is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        reason: String,
    },
}

/// Which label maps are applied in the localization step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrepareOptions {
    pub localize_continents: bool,
    pub localize_causes: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            localize_continents: true,
            localize_causes: true,
        }
    }
}

/// Row accounting of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareReport {
    pub rows_read: usize,
    pub dropped_by_year: usize,
    pub dropped_by_sex: usize,
    pub rows_kept: usize,
}

/// Turn the raw source into the canonical table.
pub fn prepare(raw: &RawTable, options: PrepareOptions) -> Result<CanonicalTable, PipelineError> {
    let (table, report) = prepare_with_report(raw, options)?;
    log::info!(
        "Prepared {} of {} rows ({} before {MIN_YEAR}, {} single-sex)",
        report.rows_kept,
        report.rows_read,
        report.dropped_by_year,
        report.dropped_by_sex
    );
    Ok(table)
}

/// Same as [`prepare`], also returning how many rows each filter removed.
///
/// Steps run in a fixed order: projection, year filter, sex filter,
/// rounding, renaming, localization.  A value is only validated once the
/// row has survived the filters before it.
pub fn prepare_with_report(
    raw: &RawTable,
    options: PrepareOptions,
) -> Result<(CanonicalTable, PrepareReport), PipelineError> {
    let projection = Projection::locate(raw)?;
    if raw.is_empty() {
        log::warn!("Source has a header but no rows");
    }
    let mut report = PrepareReport {
        rows_read: raw.len(),
        ..Default::default()
    };

    let mut records = Vec::with_capacity(raw.len());
    for (row_no, row) in raw.rows().iter().enumerate() {
        let year = parse_year(&row[projection.year], row_no)?;
        if year < MIN_YEAR {
            report.dropped_by_year += 1;
            continue;
        }

        if is_single_sex(&row[projection.sex_code]) {
            report.dropped_by_sex += 1;
            continue;
        }

        let deaths = parse_deaths(&row[projection.deaths], row_no)?;

        let continent = row[projection.continent].to_text();
        let cause = row[projection.cause].to_text();
        records.push(CanonicalRecord {
            continent_code: row[projection.continent_code].to_text(),
            continent: if options.localize_continents {
                labels::continent(&continent)
            } else {
                continent
            },
            country: row[projection.country].to_text(),
            year,
            cause: if options.localize_causes {
                labels::cause(&cause)
            } else {
                cause
            },
            cause_code: row[projection.cause_code].to_text(),
            deaths,
        });
    }

    report.rows_kept = records.len();
    log::debug!("{report:?}");
    Ok((CanonicalTable::from_records(records), report))
}

/// Round a fractional estimate to a whole count, ties to even.
/// Non-finite and negative values have no count.
pub fn normalize_deaths(value: f64) -> Option<u64> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round_ties_even();
    if rounded < 0.0 {
        return None;
    }
    Some(rounded as u64)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Positions of the retained source columns.
struct Projection {
    continent_code: usize,
    continent: usize,
    country: usize,
    year: usize,
    sex_code: usize,
    cause: usize,
    cause_code: usize,
    deaths: usize,
}

impl Projection {
    fn locate(raw: &RawTable) -> Result<Self, PipelineError> {
        let find = |name: &'static str| {
            raw.column_index(name)
                .ok_or(PipelineError::MissingColumn(name))
        };
        Ok(Projection {
            continent_code: find(columns::CONTINENT_CODE)?,
            continent: find(columns::CONTINENT)?,
            country: find(columns::COUNTRY)?,
            year: find(columns::YEAR)?,
            sex_code: find(columns::SEX_CODE)?,
            cause: find(columns::CAUSE)?,
            cause_code: find(columns::CAUSE_CODE)?,
            deaths: find(columns::DEATHS)?,
        })
    }
}

fn parse_year(cell: &Cell, row: usize) -> Result<i32, PipelineError> {
    cell.as_i64()
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| PipelineError::InvalidValue {
            row,
            column: columns::YEAR,
            reason: format!("'{cell}' is not a year"),
        })
}

fn parse_deaths(cell: &Cell, row: usize) -> Result<u64, PipelineError> {
    cell.as_f64()
        .and_then(normalize_deaths)
        .ok_or_else(|| PipelineError::InvalidValue {
            row,
            column: columns::DEATHS,
            reason: format!("'{cell}' is not a non-negative number"),
        })
}

fn is_single_sex(cell: &Cell) -> bool {
    match cell {
        Cell::String(code) => SINGLE_SEX_CODES.contains(&code.as_str()),
        _ => false,
    }
}

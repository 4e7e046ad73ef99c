//! Writes a synthetic raw dataset with the full WHO export column set.
//!
//! Usage: `generate_sample [OUT.csv]` (default `data.csv`).

use anyhow::{Context, Result};

const HEADER: [&str; 34] = [
    "IndicatorCode",
    "Indicator",
    "ValueType",
    "ParentLocationCode",
    "ParentLocation",
    "Location type",
    "SpatialDimValueCode",
    "Location",
    "Period type",
    "Period",
    "IsLatestYear",
    "Dim1 type",
    "Dim1",
    "Dim1ValueCode",
    "Dim2 type",
    "Dim2",
    "Dim2ValueCode",
    "Dim3 type",
    "Dim3",
    "Dim3ValueCode",
    "DataSourceDimValueCode",
    "DataSource",
    "FactValueNumericPrefix",
    "FactValueNumeric",
    "FactValueUoM",
    "FactValueNumericLowPrefix",
    "FactValueNumericLow",
    "FactValueNumericHighPrefix",
    "FactValueNumericHigh",
    "Value",
    "FactValueTranslationID",
    "FactComments",
    "Language",
    "DateModified",
];

/// (country, ISO3, continent code, continent, yearly all-cause deaths)
const COUNTRIES: [(&str, &str, &str, &str, f64); 14] = [
    ("China", "CHN", "WPR", "Western Pacific", 1_850_000.0),
    ("India", "IND", "SEAR", "South-East Asia", 1_600_000.0),
    ("Pakistan", "PAK", "EMR", "Eastern Mediterranean", 230_000.0),
    ("Indonesia", "IDN", "SEAR", "South-East Asia", 180_000.0),
    ("Nigeria", "NGA", "AFR", "Africa", 170_000.0),
    ("Bangladesh", "BGD", "SEAR", "South-East Asia", 160_000.0),
    ("Russian Federation", "RUS", "EUR", "Europe", 140_000.0),
    ("Egypt", "EGY", "EMR", "Eastern Mediterranean", 90_000.0),
    ("United States of America", "USA", "AMR", "Americas", 60_000.0),
    ("Viet Nam", "VNM", "WPR", "Western Pacific", 55_000.0),
    ("Japan", "JPN", "WPR", "Western Pacific", 45_000.0),
    ("Brazil", "BRA", "AMR", "Americas", 40_000.0),
    ("France", "FRA", "EUR", "Europe", 12_000.0),
    ("Chad", "TCD", "AFR", "Africa", 9_000.0),
];

/// (cause label, cause code, share of all-cause deaths)
const CAUSES: [(&str, &str, f64); 5] = [
    ("Trachea, bronchus, lung cancers", "ENVCAUSE_LC", 0.07),
    ("Chronic obstructive pulmonary disease", "ENVCAUSE_COPD", 0.20),
    ("Acute lower respiratory infections", "ENVCAUSE_ALRI", 0.13),
    ("Stroke", "ENVCAUSE_STROKE", 0.26),
    ("Ischaemic heart disease", "ENVCAUSE_IHD", 0.34),
];

/// (label, code, share of both-sexes deaths)
const SEXES: [(&str, &str, f64); 3] = [
    ("Both sexes", "SEX_BTSX", 1.0),
    ("Male", "SEX_MLE", 0.56),
    ("Female", "SEX_FMLE", 0.44),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform jitter factor in `[1 - spread, 1 + spread)`.
    fn jitter(&mut self, spread: f64) -> f64 {
        1.0 + spread * (2.0 * self.next_f64() - 1.0)
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args().nth(1).unwrap_or_else(|| "data.csv".to_string());
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for &(country, iso3, parent_code, parent, base) in &COUNTRIES {
        for year in 2010..=2019 {
            let trend = 1.0 + 0.012 * (year - 2010) as f64;
            let causes: Vec<(&str, &str, f64)> = CAUSES
                .iter()
                .map(|&(label, code, share)| (label, code, base * trend * share * rng.jitter(0.05)))
                .collect();
            let all: f64 = causes.iter().map(|(_, _, v)| v).sum();

            let with_total = std::iter::once(("ALL CAUSES", "ENVCAUSE_ALL", all)).chain(causes);
            for (cause, cause_code, both) in with_total {
                for &(sex, sex_code, share) in &SEXES {
                    let value = both * share;
                    write_row(
                        &mut writer,
                        &Row {
                            country,
                            iso3,
                            parent_code,
                            parent,
                            year,
                            sex,
                            sex_code,
                            cause,
                            cause_code,
                            value,
                            latest: year == 2019,
                        },
                    )?;
                    rows += 1;
                }
            }
        }
    }

    writer.flush()?;
    println!("Wrote {rows} rows ({} countries, 2010-2019) to {output_path}", COUNTRIES.len());
    Ok(())
}

struct Row<'a> {
    country: &'a str,
    iso3: &'a str,
    parent_code: &'a str,
    parent: &'a str,
    year: i32,
    sex: &'a str,
    sex_code: &'a str,
    cause: &'a str,
    cause_code: &'a str,
    value: f64,
    latest: bool,
}

fn write_row<W: std::io::Write>(writer: &mut csv::Writer<W>, row: &Row<'_>) -> Result<()> {
    let low = row.value * 0.82;
    let high = row.value * 1.19;
    let year = row.year.to_string();
    let value = format!("{:.2}", row.value);
    let low_text = format!("{low:.2}");
    let high_text = format!("{high:.2}");
    let display = format!("{:.0} [{low:.0}-{high:.0}]", row.value);
    let fields: [&str; 34] = [
        "AIR_4",
        "Ambient air pollution attributable deaths",
        "numeric",
        row.parent_code,
        row.parent,
        "Country",
        row.iso3,
        row.country,
        "Year",
        &year,
        if row.latest { "true" } else { "false" },
        "Sex",
        row.sex,
        row.sex_code,
        "Cause",
        row.cause,
        row.cause_code,
        "",
        "",
        "",
        "",
        "",
        "",
        &value,
        "",
        "",
        &low_text,
        "",
        &high_text,
        &display,
        "",
        "",
        "EN",
        "2022-08-12T16:42:00.000Z",
    ];
    writer.write_record(fields)?;
    Ok(())
}

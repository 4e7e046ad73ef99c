use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::labels;
use super::model::{CanonicalRecord, CanonicalTable};

/// One cell of the zero-filled (continent, year) grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinentYear {
    pub continent: String,
    pub year: i32,
    pub deaths: u64,
}

// ---------------------------------------------------------------------------
// Group-by-sum views over the canonical table
// ---------------------------------------------------------------------------

impl CanonicalTable {
    /// Deaths per continent, ordered by continent name.
    pub fn total_by_continent(&self) -> Vec<(String, u64)> {
        sum_by(self.iter(), |r| r.continent.as_str())
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// Deaths per (continent, year) over every continent × every year present.
    /// Combinations without rows are reported as zero so each continent gets
    /// a continuous series.
    pub fn total_by_year_and_continent(&self) -> Vec<ContinentYear> {
        let mut sums: HashMap<(&str, i32), u64> = HashMap::new();
        let mut continents = BTreeSet::new();
        let mut years = BTreeSet::new();
        for r in self.iter() {
            *sums.entry((r.continent.as_str(), r.year)).or_default() += r.deaths;
            continents.insert(r.continent.as_str());
            years.insert(r.year);
        }

        let mut grid = Vec::with_capacity(continents.len() * years.len());
        for continent in &continents {
            for &year in &years {
                grid.push(ContinentYear {
                    continent: continent.to_string(),
                    year,
                    deaths: sums.get(&(*continent, year)).copied().unwrap_or(0),
                });
            }
        }
        grid
    }

    /// Deaths per year (ascending), optionally restricted to one cause label.
    pub fn total_by_year(&self, cause: Option<&str>) -> Vec<(i32, u64)> {
        sum_by(
            self.iter().filter(|r| cause.map_or(true, |c| r.cause == c)),
            |r| r.year,
        )
    }

    /// Deaths per cause, ordered by cause label.  The all-causes aggregate is
    /// one of the groups.
    pub fn total_by_cause(&self) -> Vec<(String, u64)> {
        sum_by(self.iter(), |r| r.cause.as_str())
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// The `n` countries with the most deaths, descending.  Equal totals keep
    /// the order in which the countries first appear.
    pub fn top_n_countries(&self, n: usize) -> Vec<(String, u64)> {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut totals: Vec<(String, u64)> = Vec::new();
        for r in self.iter() {
            let idx = *position.entry(r.country.as_str()).or_insert_with(|| {
                totals.push((r.country.clone(), 0));
                totals.len() - 1
            });
            totals[idx].1 += r.deaths;
        }
        totals.sort_by(|a, b| b.1.cmp(&a.1));
        totals.truncate(n);
        totals
    }

    // -- subsets and scalar totals --

    /// Rows of a single cause label.
    pub fn only_cause(&self, cause: &str) -> CanonicalTable {
        self.subset(|r| r.cause == cause)
    }

    /// Rows of the all-causes aggregate, whether or not causes were localized.
    pub fn all_causes(&self) -> CanonicalTable {
        self.subset(|r| labels::is_all_causes(&r.cause))
    }

    pub fn total_for_cause(&self, cause: &str) -> u64 {
        self.iter().filter(|r| r.cause == cause).map(|r| r.deaths).sum()
    }

    pub fn total_deaths(&self) -> u64 {
        self.iter().map(|r| r.deaths).sum()
    }

    // -- distinct values for selectors --

    /// Distinct continents in order of first appearance.
    pub fn continents(&self) -> Vec<String> {
        distinct(self.iter().map(|r| r.continent.as_str()))
    }

    /// Distinct causes in order of first appearance.
    pub fn causes(&self) -> Vec<String> {
        distinct(self.iter().map(|r| r.cause.as_str()))
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.iter()
            .map(|r| r.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn sum_by<'a, K: Ord>(
    records: impl Iterator<Item = &'a CanonicalRecord>,
    key: impl Fn(&'a CanonicalRecord) -> K,
) -> Vec<(K, u64)> {
    let mut sums: BTreeMap<K, u64> = BTreeMap::new();
    for r in records {
        *sums.entry(key(r)).or_default() += r.deaths;
    }
    sums.into_iter().collect()
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

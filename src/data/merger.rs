use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Year;

use super::bundle::{DatasetBundle, NumericColumn, NumericText};
use super::country_names::CountryNameMap;
use super::ranking::HappinessRanking;

/// Happiness, population and GDP of one country in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYearRecord {
    pub country: String,
    pub year: Year,
    /// 1-based position in the year's happiness ranking.
    pub rank: usize,
    pub happiness: f64,
    pub population: u64,
    pub gdp: f64,
    /// Derived by the GDP percentile filter; `true` straight out of a merge.
    pub visible: bool,
}

/// Fully loaded source tables with foreign country names canonicalized.
///
/// Rankings are built once for every year; per-year merged records are
/// produced on demand by [`Dataset::merge_year`].
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    names: CountryNameMap,
    rankings: IndexMap<Year, HappinessRanking>,
    population: IndexMap<Year, NumericColumn>,
    gdp: IndexMap<Year, NumericColumn>,
}

impl Dataset {
    #[must_use]
    pub fn from_bundle(bundle: DatasetBundle, names: CountryNameMap) -> Self {
        let rankings = bundle
            .happiness
            .iter()
            .map(|(year, rows)| (*year, HappinessRanking::from_rows(*year, rows)))
            .collect();
        let population = canonicalize_columns(bundle.population, &names);
        let gdp = canonicalize_columns(bundle.gdp, &names);
        Self {
            names,
            rankings,
            population,
            gdp,
        }
    }

    #[must_use]
    pub fn names(&self) -> &CountryNameMap {
        &self.names
    }

    /// Years with a happiness table, in load order.
    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.rankings.keys().copied()
    }

    #[must_use]
    pub fn ranking(&self, year: Year) -> Option<&HappinessRanking> {
        self.rankings.get(&year)
    }

    /// Merges the year's ranking with population and GDP.
    ///
    /// Countries missing either value, or whose value does not parse, are
    /// left out. Output keeps ranking order.
    #[must_use]
    pub fn merge_year(&self, year: Year) -> Vec<CountryYearRecord> {
        let Some(ranking) = self.rankings.get(&year) else {
            debug!(%year, "no happiness table for year");
            return Vec::new();
        };
        let population = self.population.get(&year);
        let gdp = self.gdp.get(&year);

        let records: Vec<CountryYearRecord> = ranking
            .entries()
            .iter()
            .enumerate()
            .filter_map(|(position, entry)| {
                let key = self.names.canonicalize(&entry.country);
                let population = population
                    .and_then(|column| column.get(key))
                    .and_then(parse_population)?;
                let gdp = gdp
                    .and_then(|column| column.get(key))
                    .and_then(NumericText::parse)?;
                Some(CountryYearRecord {
                    country: entry.country.clone(),
                    year,
                    rank: position + 1,
                    happiness: entry.score,
                    population,
                    gdp,
                    visible: true,
                })
            })
            .collect();

        debug!(
            %year,
            ranked = ranking.len(),
            merged = records.len(),
            "merge year"
        );
        records
    }
}

fn parse_population(cell: &NumericText) -> Option<u64> {
    let value = cell.parse()?;
    (value >= 0.0).then(|| value.round() as u64)
}

/// Re-keys every column by canonical country name.
///
/// When a foreign spelling and the canonical spelling both appear, the
/// canonical entry wins.
fn canonicalize_columns(
    columns: IndexMap<Year, NumericColumn>,
    names: &CountryNameMap,
) -> IndexMap<Year, NumericColumn> {
    columns
        .into_iter()
        .map(|(year, column)| {
            let mut canonical = NumericColumn::with_capacity(column.len());
            for (country, value) in column {
                let key = names.canonicalize(&country);
                if key == country {
                    canonical.insert(country, value);
                } else {
                    canonical.entry(key.to_owned()).or_insert(value);
                }
            }
            (year, canonical)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::Dataset;
    use crate::core::Year;
    use crate::data::{CountryNameMap, DatasetBundle, HappinessRow};

    #[test]
    fn foreign_spelling_is_reconciled() {
        let bundle = DatasetBundle::default()
            .with_happiness(Year::Y2018, vec![HappinessRow::new("Russia", "5.8")])
            .with_population(Year::Y2018, [("Russian Federation", "144000000")])
            .with_gdp(Year::Y2018, [("Russian Federation", "11289")]);
        let dataset = Dataset::from_bundle(bundle, CountryNameMap::default());

        let merged = dataset.merge_year(Year::Y2018);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].country, "Russia");
        assert_eq!(merged[0].population, 144_000_000);
    }

    #[test]
    fn canonical_entry_wins_over_foreign_duplicate() {
        let bundle = DatasetBundle::default()
            .with_happiness(Year::Y2018, vec![HappinessRow::new("Russia", "5.8")])
            .with_population(
                Year::Y2018,
                [("Russian Federation", "1"), ("Russia", "2")],
            )
            .with_gdp(Year::Y2018, [("Russia", "3")]);
        let dataset = Dataset::from_bundle(bundle, CountryNameMap::default());

        assert_eq!(dataset.merge_year(Year::Y2018)[0].population, 2);
    }

    #[test]
    fn negative_population_counts_as_missing() {
        let bundle = DatasetBundle::default()
            .with_happiness(Year::Y2016, vec![HappinessRow::new("A", "5")])
            .with_population(Year::Y2016, [("A", "-4")])
            .with_gdp(Year::Y2016, [("A", "100")]);
        let dataset = Dataset::from_bundle(bundle, CountryNameMap::identity());

        assert!(dataset.merge_year(Year::Y2016).is_empty());
    }
}

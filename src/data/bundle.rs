use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Year;
use crate::error::VizResult;

/// Numeric cell kept as text until it is used.
///
/// Source tables mix quoted numbers, bare numbers and junk (`".."`, empty
/// strings). Parsing happens at merge time and failures count as missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCell", into = "String")]
pub struct NumericText(String);

impl NumericText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the cell, ignoring surrounding whitespace and thousands separators.
    #[must_use]
    pub fn parse(&self) -> Option<f64> {
        let trimmed = self.0.trim();
        let value = if trimmed.contains(',') {
            trimmed.replace(',', "").parse::<f64>().ok()?
        } else {
            trimmed.parse::<f64>().ok()?
        };
        value.is_finite().then_some(value)
    }
}

impl From<&str> for NumericText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for NumericText {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<NumericText> for String {
    fn from(cell: NumericText) -> Self {
        cell.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Text(String),
    Number(f64),
    Missing(()),
}

impl From<RawCell> for NumericText {
    fn from(raw: RawCell) -> Self {
        match raw {
            RawCell::Text(text) => Self(text),
            RawCell::Number(value) => Self(value.to_string()),
            RawCell::Missing(()) => Self(String::new()),
        }
    }
}

/// One row of a yearly happiness report, already in rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HappinessRow {
    #[serde(rename = "Country", alias = "Country or region")]
    pub country: String,
    #[serde(rename = "Score", alias = "Happiness Score", alias = "Happiness.Score")]
    pub score: NumericText,
}

impl HappinessRow {
    #[must_use]
    pub fn new(country: impl Into<String>, score: impl Into<NumericText>) -> Self {
        Self {
            country: country.into(),
            score: score.into(),
        }
    }
}

/// Country name to numeric cell, for one year.
pub type NumericColumn = IndexMap<String, NumericText>;

/// Parsed output of the data loading collaborator.
///
/// Every table is keyed by survey year. The core never reads files itself;
/// hosts build this from CSV, JSON or fixtures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetBundle {
    #[serde(default)]
    pub happiness: IndexMap<Year, Vec<HappinessRow>>,
    #[serde(default)]
    pub population: IndexMap<Year, NumericColumn>,
    #[serde(default)]
    pub gdp: IndexMap<Year, NumericColumn>,
}

impl DatasetBundle {
    pub fn from_json_str(json: &str) -> VizResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> VizResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn with_happiness(mut self, year: Year, rows: Vec<HappinessRow>) -> Self {
        self.happiness.insert(year, rows);
        self
    }

    #[must_use]
    pub fn with_population<I, K, V>(mut self, year: Year, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NumericText>,
    {
        self.population.insert(year, collect_column(cells));
        self
    }

    #[must_use]
    pub fn with_gdp<I, K, V>(mut self, year: Year, cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NumericText>,
    {
        self.gdp.insert(year, collect_column(cells));
        self
    }
}

fn collect_column<I, K, V>(cells: I) -> NumericColumn
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<NumericText>,
{
    cells
        .into_iter()
        .map(|(country, value)| (country.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DatasetBundle, NumericText};
    use crate::core::Year;

    #[test]
    fn numeric_text_tolerates_junk() {
        assert_eq!(NumericText::new(" 7.5 ").parse(), Some(7.5));
        assert_eq!(NumericText::new("1,234,567").parse(), Some(1_234_567.0));
        assert_eq!(NumericText::new("..").parse(), None);
        assert_eq!(NumericText::new("").parse(), None);
        assert_eq!(NumericText::new("NaN").parse(), None);
    }

    #[test]
    fn bundle_reads_mixed_cells_and_column_aliases() {
        let json = r#"{
            "happiness": {
                "2019": [
                    {"Country or region": "Finland", "Score": "7.769", "Overall rank": "1"},
                    {"Country or region": "Denmark", "Score": 7.6}
                ]
            },
            "population": {"2019": {"Finland": 5520314, "Denmark": "5818553"}},
            "gdp": {"2019": {"Finland": "48782.7", "Denmark": null}}
        }"#;
        let bundle = DatasetBundle::from_json_str(json).expect("bundle");

        let rows = &bundle.happiness[&Year::Y2019];
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country, "Finland");
        assert_eq!(rows[1].score.parse(), Some(7.6));
        assert_eq!(bundle.population[&Year::Y2019]["Finland"].parse(), Some(5_520_314.0));
        assert_eq!(bundle.gdp[&Year::Y2019]["Denmark"].parse(), None);
    }

    #[test]
    fn bundle_rejects_unknown_years() {
        let json = r#"{"happiness": {"1999": []}}"#;
        assert!(DatasetBundle::from_json_str(json).is_err());
    }
}

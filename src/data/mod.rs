//! Source tables and the per-year merge of happiness, population and GDP.

mod bundle;
mod country_names;
mod merger;
mod ranking;

pub use bundle::{DatasetBundle, HappinessRow, NumericColumn, NumericText};
pub use country_names::{CountryNameMap, country_key};
pub use merger::{CountryYearRecord, Dataset};
pub use ranking::{HappinessRanking, RankingEntry};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{VizError, VizResult};

/// Spellings used by the population and GDP sources that differ from the
/// happiness report.
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("Bahamas, The", "Bahamas"),
    ("Congo, Dem. Rep.", "Congo (Kinshasa)"),
    ("Congo, Rep.", "Congo (Brazzaville)"),
    ("Cote d'Ivoire", "Ivory Coast"),
    ("Czechia", "Czech Republic"),
    ("Egypt, Arab Rep.", "Egypt"),
    ("Eswatini", "Swaziland"),
    ("Gambia, The", "Gambia"),
    ("Hong Kong SAR, China", "Hong Kong"),
    ("Iran, Islamic Rep.", "Iran"),
    ("Korea, Rep.", "South Korea"),
    ("Kyrgyz Republic", "Kyrgyzstan"),
    ("Lao PDR", "Laos"),
    ("North Macedonia", "Macedonia"),
    ("Russian Federation", "Russia"),
    ("Slovak Republic", "Slovakia"),
    ("Syrian Arab Republic", "Syria"),
    ("Turkiye", "Turkey"),
    ("Venezuela, RB", "Venezuela"),
    ("West Bank and Gaza", "Palestinian Territories"),
    ("Yemen, Rep.", "Yemen"),
];

/// Maps foreign country spellings onto the happiness report's spelling.
///
/// Lookup misses return the input unchanged. The table never chains: no
/// canonical name is itself an alias, so `canonicalize` is idempotent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryNameMap {
    aliases: IndexMap<String, String>,
}

impl Default for CountryNameMap {
    fn default() -> Self {
        Self {
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(foreign, canonical)| ((*foreign).to_owned(), (*canonical).to_owned()))
                .collect(),
        }
    }
}

impl CountryNameMap {
    /// A map with no aliases; every name is already canonical.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            aliases: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    #[must_use]
    pub fn canonicalize<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Registers one more alias.
    ///
    /// A canonical target that is itself an alias is resolved first. An alias
    /// that is already somebody's canonical target is rejected, since it would
    /// make lookups order dependent.
    pub fn with_alias(
        mut self,
        foreign: impl Into<String>,
        canonical: impl Into<String>,
    ) -> VizResult<Self> {
        let foreign = foreign.into();
        let canonical: String = canonical.into();
        let canonical = self.canonicalize(&canonical).to_owned();
        if foreign == canonical {
            return Ok(self);
        }
        if self.aliases.values().any(|target| *target == foreign) {
            return Err(VizError::InvalidConfig(format!(
                "country alias `{foreign}` is already a canonical name"
            )));
        }
        debug!(%foreign, %canonical, "register country alias");
        self.aliases.insert(foreign, canonical);
        Ok(self)
    }

    pub fn extend_from<I, K, V>(self, aliases: I) -> VizResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        aliases
            .into_iter()
            .try_fold(self, |map, (foreign, canonical)| map.with_alias(foreign, canonical))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(foreign, canonical)| (foreign.as_str(), canonical.as_str()))
    }
}

/// Stable element key for a country: lower-cased, runs of anything other
/// than letters and digits collapsed to a single `-`.
///
/// `"Congo (Kinshasa)"` becomes `"congo-kinshasa"`.
#[must_use]
pub fn country_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('-');
            }
            pending_separator = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    key
}

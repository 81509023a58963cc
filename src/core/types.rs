use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Survey years covered by the happiness dataset.
///
/// The set is closed: every table the loading collaborator supplies is keyed
/// by one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Year {
    Y2015,
    Y2016,
    Y2017,
    Y2018,
    Y2019,
}

impl Year {
    pub const ALL: [Year; 5] = [
        Year::Y2015,
        Year::Y2016,
        Year::Y2017,
        Year::Y2018,
        Year::Y2019,
    ];

    #[must_use]
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::Y2015 => 2015,
            Self::Y2016 => 2016,
            Self::Y2017 => 2017,
            Self::Y2018 => 2018,
            Self::Y2019 => 2019,
        }
    }

    #[must_use]
    pub const fn first() -> Self {
        Self::Y2015
    }

    #[must_use]
    pub const fn last() -> Self {
        Self::Y2019
    }

    /// Next year in the sequence, wrapping from the last year to the first.
    #[must_use]
    pub const fn next_cyclic(self) -> Self {
        match self {
            Self::Y2015 => Self::Y2016,
            Self::Y2016 => Self::Y2017,
            Self::Y2017 => Self::Y2018,
            Self::Y2018 => Self::Y2019,
            Self::Y2019 => Self::Y2015,
        }
    }
}

impl TryFrom<u16> for Year {
    type Error = VizError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|year| year.as_u16() == value)
            .ok_or(VizError::UnknownYear(value))
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.as_u16()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::Year;

    #[test]
    fn next_cyclic_wraps_to_first_year() {
        assert_eq!(Year::last().next_cyclic(), Year::first());
        let mut year = Year::first();
        for _ in 0..Year::ALL.len() {
            year = year.next_cyclic();
        }
        assert_eq!(year, Year::first());
    }

    #[test]
    fn unknown_year_is_rejected() {
        assert!(Year::try_from(2014).is_err());
        assert_eq!(Year::try_from(2017).expect("known year"), Year::Y2017);
    }
}

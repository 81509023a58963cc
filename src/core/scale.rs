use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// Continuous mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> VizResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(VizError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(VizError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to the range. Values outside the domain extrapolate.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round tick values (1/2/5 steps) covering the domain.
    #[must_use]
    pub fn ticks(self, target_count: usize) -> Vec<f64> {
        linear_ticks(self.domain_start, self.domain_end, target_count)
    }
}

/// Base-10 logarithmic mapping; used for GDP per capita which spans decades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogScale {
    log_domain: LinearScale,
}

impl LogScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> VizResult<Self> {
        let (start, end) = domain;
        if !(start.is_finite() && end.is_finite()) || start <= 0.0 || end <= 0.0 {
            return Err(VizError::InvalidData(
                "log scale requires a finite domain > 0".to_owned(),
            ));
        }
        Ok(Self {
            log_domain: LinearScale::new((start.log10(), end.log10()), range)?,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        let (start, end) = self.log_domain.domain();
        (10_f64.powf(start), 10_f64.powf(end))
    }

    /// Non-positive values clamp to the lower edge of the range.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if value <= 0.0 || !value.is_finite() {
            return self.log_domain.range().0;
        }
        self.log_domain.map(value.log10())
    }

    #[must_use]
    pub fn ticks(self, target_count: usize) -> Vec<f64> {
        let (start, end) = self.domain();
        log_ladder_ticks(start, end, target_count)
    }
}

/// Square-root mapping so that circle *area* tracks the input value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqrtScale {
    domain_max: f64,
    range_max: f64,
}

impl SqrtScale {
    pub fn new(domain_max: f64, range_max: f64) -> VizResult<Self> {
        if !domain_max.is_finite() || domain_max <= 0.0 {
            return Err(VizError::InvalidData(
                "sqrt scale domain must be finite and > 0".to_owned(),
            ));
        }
        if !range_max.is_finite() || range_max <= 0.0 {
            return Err(VizError::InvalidData(
                "sqrt scale range must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            domain_max,
            range_max,
        })
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if value <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        (value / self.domain_max).sqrt() * self.range_max
    }
}

fn linear_ticks(start: f64, end: f64, target_count: usize) -> Vec<f64> {
    if target_count == 0 || start == end {
        return vec![start];
    }
    let min = start.min(end);
    let max = start.max(end);
    let raw_step = (max - min) / target_count as f64;
    let magnitude = 10_f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|multiplier| multiplier * magnitude)
        .find(|candidate| *candidate >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|index| index as f64 * step).collect()
}

fn log_ladder_ticks(start: f64, end: f64, target_count: usize) -> Vec<f64> {
    let min = start.min(end);
    let max = start.max(end);
    let min_exp = min.log10().floor() as i32;
    let max_exp = max.log10().ceil() as i32;

    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= min && candidate <= max {
                ticks.push(candidate);
            }
        }
    }

    if target_count == 0 || ticks.len() <= target_count {
        return ticks;
    }
    // Too dense: fall back to whole decades only.
    ticks.retain(|value| {
        let exponent = value.log10();
        (exponent - exponent.round()).abs() < 1e-9
    });
    ticks
}

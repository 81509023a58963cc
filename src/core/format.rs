/// `1234567` -> `"1,234,567"`.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Whole-dollar amount with separators, e.g. `"$48,783"`.
#[must_use]
pub fn format_dollars(value: f64) -> String {
    if !value.is_finite() || value < 0.0 {
        return "n/a".to_owned();
    }
    format!("${}", format_thousands(value.round() as u64))
}

/// Compact axis label: `500` -> `"$500"`, `20000` -> `"$20k"`.
#[must_use]
pub fn format_gdp_tick(value: f64) -> String {
    if value >= 1_000.0 {
        let thousands = value / 1_000.0;
        if (thousands - thousands.round()).abs() < 1e-9 {
            format!("${}k", thousands.round() as u64)
        } else {
            format!("${thousands:.1}k")
        }
    } else {
        format!("${}", value.round() as u64)
    }
}

/// Happiness score with three decimals.
#[must_use]
pub fn format_score(value: f64) -> String {
    format!("{value:.3}")
}

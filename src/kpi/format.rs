//! Number and percentage formatting for KPI display
//!
//! Fixed decimal precision with locale digit grouping. Anything non-finite
//! renders as [`PLACEHOLDER`] so an undefined metric is visibly empty instead
//! of "NaN" or "inf".

use serde::{Deserialize, Serialize};

use crate::kpi::result::{Metric, MetricKind};

/// Shown in place of an undefined value
pub const PLACEHOLDER: &str = "—";

/// Digit grouping and decimal separator convention
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// 1,234.56
    #[default]
    En,
    /// 1.234,56
    Nl,
    /// 1 234,56 (narrow no-break space)
    Fr,
    /// 1234.56
    Plain,
}

impl Locale {
    fn separators(self) -> (&'static str, &'static str) {
        match self {
            Locale::En => (",", "."),
            Locale::Nl => (".", ","),
            Locale::Fr => ("\u{202f}", ","),
            Locale::Plain => ("", "."),
        }
    }
}

/// Decimal places per kind of metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Precision {
    pub duration: usize,
    pub percent: usize,
    pub rate: usize,
    pub fit: usize,
}

impl Default for Precision {
    fn default() -> Self {
        // λ is typically tiny, so it gets the most digits
        Self {
            duration: 2,
            percent: 4,
            rate: 6,
            fit: 2,
        }
    }
}

impl Precision {
    pub fn for_kind(&self, kind: MetricKind) -> usize {
        match kind {
            MetricKind::Duration => self.duration,
            MetricKind::Ratio => self.percent,
            MetricKind::Rate => self.rate,
            MetricKind::Fit => self.fit,
        }
    }
}

/// Formatter bound to a locale and a precision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumberFormat {
    pub locale: Locale,
    pub precision: Precision,
}

impl NumberFormat {
    pub fn new(locale: Locale, precision: Precision) -> Self {
        Self { locale, precision }
    }

    /// `x` with `precision` decimals and locale grouping
    pub fn number(&self, x: f64, precision: usize) -> String {
        if !x.is_finite() {
            return PLACEHOLDER.to_string();
        }

        let (group_sep, decimal_sep) = self.locale.separators();
        let fixed = format!("{:.*}", precision, x.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (fixed.as_str(), None),
        };

        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        if x.is_sign_negative() && fixed.bytes().any(|b| matches!(b, b'1'..=b'9')) {
            out.push('-');
        }
        out.push_str(&group_digits(int_part, group_sep));
        if let Some(frac) = frac_part {
            out.push_str(decimal_sep);
            out.push_str(frac);
        }
        out
    }

    /// Ratio `x` (0..1) as a percentage with `precision` decimals
    pub fn percent(&self, x: f64, precision: usize) -> String {
        if !x.is_finite() {
            return PLACEHOLDER.to_string();
        }
        format!("{}%", self.number(x * 100.0, precision))
    }

    /// A metric value already converted to its display unit, at the configured precision
    pub fn metric(&self, metric: Metric, value: f64) -> String {
        let precision = self.precision.for_kind(metric.kind());
        match metric.kind() {
            MetricKind::Ratio => self.percent(value, precision),
            _ => self.number(value, precision),
        }
    }
}

fn group_digits(digits: &str, sep: &str) -> String {
    if sep.is_empty() || digits.len() <= 3 {
        return digits.to_string();
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * sep.len());
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

/// Format with the default locale
pub fn format_number(x: f64, precision: usize) -> String {
    NumberFormat::default().number(x, precision)
}

/// Format a ratio as a percentage with the default locale
pub fn format_percent(x: f64, precision: usize) -> String {
    NumberFormat::default().percent(x, precision)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5000.0, 2), "5,000.00");
        assert_eq!(format_number(1234567.891, 1), "1,234,567.9");
        assert_eq!(format_number(999.999, 2), "1,000.00");
        assert_eq!(format_number(0.00005, 6), "0.000050");
        assert_eq!(format_number(42.0, 0), "42");
        assert_eq!(format_number(-1500.5, 1), "-1,500.5");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.0001, 2), "0.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(5000.0 / 5008.0, 4), "99.8403%");
        assert_eq!(format_percent(0.992, 2), "99.20%");
        assert_eq!(format_percent(1.0, 0), "100%");
    }

    #[test]
    fn test_non_finite_is_placeholder() {
        assert_eq!(format_number(f64::NAN, 2), PLACEHOLDER);
        assert_eq!(format_number(f64::INFINITY, 2), PLACEHOLDER);
        assert_eq!(format_percent(f64::NAN, 4), PLACEHOLDER);
    }

    #[test]
    fn test_locales() {
        let nl = NumberFormat::new(Locale::Nl, Precision::default());
        assert_eq!(nl.number(1234567.5, 2), "1.234.567,50");
        assert_eq!(nl.percent(0.5, 1), "50,0%");

        let plain = NumberFormat::new(Locale::Plain, Precision::default());
        assert_eq!(plain.number(1234567.5, 2), "1234567.50");
    }

    #[test]
    fn test_metric_precision() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.metric(Metric::Mtbf, 5000.0), "5,000.00");
        assert_eq!(fmt.metric(Metric::Availability, 0.992), "99.2000%");
        assert_eq!(fmt.metric(Metric::Lambda, 0.0002), "0.000200");
        assert_eq!(fmt.metric(Metric::Fit, 200_000.0), "200,000.00");
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("1", ","), "1");
        assert_eq!(group_digits("1234", ","), "1,234");
        assert_eq!(group_digits("123456", ","), "123,456");
        assert_eq!(group_digits("1234567", ","), "1,234,567");
    }
}

//! Exact decimal percentile and interquartile bounds
//!
//! Percentiles use linear interpolation between the two closest ranks with
//! rank = p * (n - 1), computed without leaving decimal arithmetic.

use rust_decimal::Decimal;

/// Percentile `pct` (0..=100) of an ascending slice
///
/// Returns `None` for an empty slice.
pub fn percentile(sorted: &[Decimal], pct: u32) -> Option<Decimal> {
    let last = sorted.len().checked_sub(1)?;
    let scaled_rank = last * pct.min(100) as usize;
    let lower = scaled_rank / 100;
    let remainder = scaled_rank % 100;

    if remainder == 0 {
        return Some(sorted[lower]);
    }

    // remainder > 0 implies lower < last
    let fraction = Decimal::new(remainder as i64, 2);
    let span = sorted[lower + 1].checked_sub(sorted[lower])?;
    sorted[lower].checked_add(span.checked_mul(fraction)?)
}

/// Tukey fences around the first and third quartile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IqrBounds {
    pub q1: Decimal,
    pub q3: Decimal,
    pub lower: Decimal,
    pub upper: Decimal,
}

impl IqrBounds {
    /// Compute fences `[Q1 - k*IQR, Q3 + k*IQR]` over unsorted values
    ///
    /// Returns `None` for no values or if the fences overflow the decimal range.
    pub fn from_values(mut values: Vec<Decimal>, multiplier: Decimal) -> Option<Self> {
        values.sort_unstable();
        let q1 = percentile(&values, 25)?;
        let q3 = percentile(&values, 75)?;
        let spread = q3.checked_sub(q1)?.checked_mul(multiplier)?;

        Some(IqrBounds {
            q1,
            q3,
            lower: q1.checked_sub(spread)?,
            upper: q3.checked_add(spread)?,
        })
    }

    /// Whether `value` lies strictly outside the fences
    pub fn excludes(&self, value: Decimal) -> bool {
        value < self.lower || value > self.upper
    }
}

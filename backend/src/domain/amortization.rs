//! Fixed-rate loan amortisation.
//!
//! Rates are whole-number annual percentages (TAE), so the monthly rate is
//! `tae / 1200`. Callers must not pass basis points or fractions.

/// Monthly instalment for a fixed-rate loan.
///
/// `monthly_fee = principal * i / (1 - (1 + i)^-n)` with `i = annual_rate /
/// 1200` and `n = term_years * 12`. A zero rate amortises in a straight line
/// (`principal / n`). A zero or negative term leaves the whole principal due
/// at once.
///
/// # Examples
/// ```
/// use backend::domain::compute_monthly_fee;
///
/// assert_eq!(compute_monthly_fee(120_000, 0, 10), 1_000.0);
/// let fee = compute_monthly_fee(100_000, 3, 20);
/// assert!((fee - 554.5976).abs() < 1e-3);
/// ```
pub fn compute_monthly_fee(principal: i64, annual_rate: i64, term_years: i64) -> f64 {
    let principal = principal as f64;
    let n = payment_count(term_years);
    if n == 0.0 {
        return principal;
    }
    if annual_rate == 0 {
        return principal / n;
    }
    let i = annual_rate as f64 / 1200.0;
    principal * i / (1.0 - (1.0 + i).powf(-n))
}

/// Total repaid over the life of the loan.
///
/// A zero or negative term counts as a single payment of `monthly_fee`.
pub fn total_repayment(monthly_fee: f64, term_years: i64) -> f64 {
    monthly_fee * payment_count(term_years).max(1.0)
}

/// Monthly payments in `term_years`, computed in floating point so large
/// terms cannot overflow. Negative terms count as zero.
fn payment_count(term_years: i64) -> f64 {
    term_years.max(0) as f64 * 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn closed_form(principal: f64, rate: f64, years: f64) -> f64 {
        let i = rate / 1200.0;
        let n = years * 12.0;
        principal * i / (1.0 - (1.0 + i).powf(-n))
    }

    fn assert_relative_eq(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-9;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[rstest]
    #[case(500_000, 300, 20)]
    #[case(100_000, 3, 20)]
    #[case(250_000, 5, 30)]
    #[case(1, 100, 1)]
    fn matches_closed_form(#[case] principal: i64, #[case] rate: i64, #[case] years: i64) {
        assert_relative_eq(
            compute_monthly_fee(principal, rate, years),
            closed_form(principal as f64, rate as f64, years as f64),
        );
    }

    #[rstest]
    fn known_instalment_for_three_percent_over_twenty_years() {
        let fee = compute_monthly_fee(100_000, 3, 20);
        assert!((fee - 554.597_6).abs() < 1e-3, "fee was {fee}");
    }

    #[rstest]
    #[case(120_000, 10)]
    #[case(500_000, 20)]
    #[case(7, 3)]
    fn zero_rate_is_straight_line(#[case] principal: i64, #[case] years: i64) {
        assert_eq!(
            compute_monthly_fee(principal, 0, years),
            principal as f64 / (years * 12) as f64
        );
    }

    #[rstest]
    fn zero_term_returns_principal() {
        assert_eq!(compute_monthly_fee(9_000, 4, 0), 9_000.0);
    }

    #[rstest]
    #[case(-1)]
    #[case(i64::MIN)]
    fn negative_term_returns_principal(#[case] years: i64) {
        assert_eq!(compute_monthly_fee(9_000, 4, years), 9_000.0);
        assert_eq!(total_repayment(9_000.0, years), 9_000.0);
    }

    #[rstest]
    #[case(i64::MAX / 2)]
    #[case(i64::MAX)]
    fn huge_term_does_not_overflow(#[case] years: i64) {
        let fee = compute_monthly_fee(1_000, 3, years);
        assert!(fee.is_finite() && fee > 0.0, "fee was {fee}");
        assert!(compute_monthly_fee(1_000, 0, years) >= 0.0);
        assert!(total_repayment(fee, years).is_finite());
    }

    #[rstest]
    fn total_repayment_multiplies_out_the_term() {
        assert_eq!(total_repayment(500.0, 20), 120_000.0);
    }
}

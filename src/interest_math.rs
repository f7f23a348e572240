//! Interest Rate Math
//!
//! Pure calendar and daily-interest arithmetic on integer cent balances.
//! All intermediate math uses `rust_decimal::Decimal`; binary floating
//! point would drift over a year of daily accruals.
//!
//! The nominal annual rate is fixed at 27.5%. The daily rate divides by the
//! actual number of days in the calendar year, so a leap year pays slightly
//! less per day but the same over the full year.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

/// Nominal annual interest rate, percent.
const ANNUAL_RATE_PERCENT: Decimal = Decimal::from_parts(275, 0, 0, false, 1); // 27.5

/// Days in the given Gregorian calendar year: 366 for leap years, else 365.
pub fn days_in_year(year: i32) -> u32 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    if leap { 366 } else { 365 }
}

/// Daily interest rate for a year, at full Decimal precision.
///
/// `rate = 27.5 / 100 / days_in_year(year)`
pub fn daily_rate(year: i32) -> Decimal {
    ANNUAL_RATE_PERCENT / Decimal::from(days_in_year(year)) / Decimal::from(100)
}

/// Daily rate as persisted on interest records: 6 decimal places.
///
/// Only the stored audit value is rounded; interest computation always uses
/// the full-precision [`daily_rate`].
pub fn persisted_rate(date: NaiveDate) -> Decimal {
    daily_rate(date.year()).round_dp_with_strategy(6, RoundingStrategy::MidpointAwayFromZero)
}

/// One day of interest on a balance, in whole cents.
///
/// `floor(balance_cents * daily_rate(year))`, always rounded toward zero;
/// the institution never owes a fractional cent upward. Zero or negative
/// balances accrue nothing.
pub fn daily_interest_cents(balance_cents: i64, date: NaiveDate) -> i64 {
    if balance_cents <= 0 {
        return 0;
    }
    let rate = daily_rate(date.year());
    (Decimal::from(balance_cents) * rate)
        .floor()
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_year_non_leap() {
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(2022), 365);
        assert_eq!(days_in_year(2021), 365);
    }

    #[test]
    fn test_days_in_year_leap_divisible_by_4() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2020), 366);
    }

    #[test]
    fn test_days_in_year_century_not_leap() {
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2100), 365);
    }

    #[test]
    fn test_days_in_year_divisible_by_400() {
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(2400), 366);
    }

    #[test]
    fn test_daily_rate_reconstructs_annual() {
        // rate * days * 100 == 27.5 for both leap and non-leap years
        for year in [2023, 2024] {
            let annual = daily_rate(year) * Decimal::from(days_in_year(year)) * Decimal::from(100);
            assert_eq!(
                annual.round_dp(2),
                Decimal::from_parts(2750, 0, 0, false, 2),
                "year {}",
                year
            );
        }
    }

    #[test]
    fn test_daily_rate_exact_divisor() {
        let expected = Decimal::from_parts(275, 0, 0, false, 1)
            / Decimal::from(365)
            / Decimal::from(100);
        assert_eq!(daily_rate(2023), expected);

        let expected_leap = Decimal::from_parts(275, 0, 0, false, 1)
            / Decimal::from(366)
            / Decimal::from(100);
        assert_eq!(daily_rate(2024), expected_leap);
    }

    #[test]
    fn test_persisted_rate_six_decimals() {
        let rate = persisted_rate(date(2023, 6, 15));
        assert_eq!(rate.scale(), 6);
        // 27.5 / 365 / 100 = 0.000753424657... -> 0.000753
        assert_eq!(rate, Decimal::from_parts(753, 0, 0, false, 6));
    }

    #[test]
    fn test_daily_interest_concrete_scenario() {
        // 10_000 cents on a non-leap-year date: floor(10000 * 27.5 / 365 / 100) = 7
        let cents = daily_interest_cents(10_000, date(2023, 6, 15));
        let expected = (Decimal::from(10_000) * daily_rate(2023))
            .floor()
            .to_i64()
            .unwrap();
        assert_eq!(cents, expected);
        assert_eq!(cents, 7);
    }

    #[test]
    fn test_daily_interest_floors_sub_cent_to_zero() {
        assert_eq!(daily_interest_cents(1, date(2023, 1, 1)), 0);
        assert_eq!(daily_interest_cents(1, date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_daily_interest_never_rounds_up() {
        for balance in [1i64, 99, 1_327, 10_000, 999_999, 123_456_789] {
            let cents = daily_interest_cents(balance, date(2023, 3, 1));
            let unrounded = Decimal::from(balance) * daily_rate(2023);
            assert!(Decimal::from(cents) <= unrounded);
            assert!(unrounded - Decimal::from(cents) < Decimal::ONE);
        }
    }

    #[test]
    fn test_zero_and_negative_balance_accrue_nothing() {
        assert_eq!(daily_interest_cents(0, date(2023, 6, 15)), 0);
        assert_eq!(daily_interest_cents(-5_000, date(2023, 6, 15)), 0);
    }

    #[test]
    fn test_leap_year_daily_interest_is_lower() {
        let non_leap = daily_interest_cents(1_000_000, date(2023, 1, 1));
        let leap = daily_interest_cents(1_000_000, date(2024, 1, 1));
        assert!(leap < non_leap);
    }

    #[test]
    fn test_year_of_daily_accrual_has_no_drift() {
        // Summing 365 daily floors stays within 365 cents of the simple
        // annual interest (each floor discards less than one cent).
        let balance = 100_000_000i64; // 1M in cents
        let mut total = 0i64;
        let mut d = date(2023, 1, 1);
        for _ in 0..365 {
            total += daily_interest_cents(balance, d);
            d = d.succ_opt().unwrap();
        }
        let annual = (Decimal::from(balance) * ANNUAL_RATE_PERCENT / Decimal::from(100))
            .floor()
            .to_i64()
            .unwrap();
        assert!(total <= annual);
        assert!(annual - total <= 365);
    }
}

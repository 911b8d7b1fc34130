//! Identity attribute providers.
//!
//! Providers supply realistic-looking personal and business attributes (names, addresses,
//! contact details, registration codes, account numbers) plus date samplers. Every method
//! draws from the caller's RNG, so a seeded RNG yields a reproducible population.

mod iban;
mod synthetic;

pub use iban::{iban_check_digits, is_valid_iban};
pub use synthetic::{FakeIdentity, FakeIdentityConfig};

use rand::Rng;
use time::{Date, Duration, OffsetDateTime};

/// Source of randomized entity attributes.
///
/// Implementations should provide:
/// - Personal attributes (names, contact details, postal address, country)
/// - Business attributes (company name, registration code)
/// - An IBAN-shaped account number
/// - A short free-text description
///
/// Date sampling has default implementations shared by all providers.
pub trait IdentityProvider {
    fn first_name<R: Rng>(&self, rng: &mut R) -> String;

    fn last_name<R: Rng>(&self, rng: &mut R) -> String;

    /// Email address, usually derived from the person's name.
    fn email<R: Rng>(&self, first_name: &str, last_name: &str, rng: &mut R) -> String;

    fn phone<R: Rng>(&self, rng: &mut R) -> String;

    /// Single-line postal address.
    fn address<R: Rng>(&self, rng: &mut R) -> String;

    fn country<R: Rng>(&self, rng: &mut R) -> String;

    fn company_name<R: Rng>(&self, rng: &mut R) -> String;

    /// Formatted company registration code.
    fn registration_number<R: Rng>(&self, rng: &mut R) -> String;

    fn iban<R: Rng>(&self, rng: &mut R) -> String;

    /// Short description sentence.
    fn sentence<R: Rng>(&self, rng: &mut R) -> String;

    /// Samples a date of birth such that the age on `on` lies in `[min_age, max_age]`.
    fn date_of_birth<R: Rng>(&self, on: Date, min_age: i32, max_age: i32, rng: &mut R) -> Date {
        let latest = years_before(on, min_age);
        let earliest = years_before(on, max_age + 1) + Duration::days(1);
        self.date_between(earliest, latest, rng)
    }

    /// Samples a date uniformly from `[start, end]`.
    fn date_between<R: Rng>(&self, start: Date, end: Date, rng: &mut R) -> Date {
        let span = end.to_julian_day() - start.to_julian_day();
        if span <= 0 {
            return start;
        }
        start + Duration::days(rng.gen_range(0..=i64::from(span)))
    }

    /// Samples an instant uniformly from `[start, end]` at one-second resolution.
    fn date_time_between<R: Rng>(
        &self,
        start: OffsetDateTime,
        end: OffsetDateTime,
        rng: &mut R,
    ) -> OffsetDateTime {
        let span = (end - start).whole_seconds();
        if span <= 0 {
            return start;
        }
        start + Duration::seconds(rng.gen_range(0..=span))
    }
}

/// Returns the same calendar date `years` earlier, clamping Feb 29 to Feb 28.
pub fn years_before(date: Date, years: i32) -> Date {
    let year = date.year() - years;
    let day = date.day().min(date.month().length(year));
    // Only fails outside the supported year range.
    Date::from_calendar_date(year, date.month(), day).unwrap_or(Date::MIN)
}

/// Age in completed years on `on` for someone born on `dob`.
pub fn age_on(dob: Date, on: Date) -> i32 {
    let had_birthday = (on.month() as u8, on.day()) >= (dob.month() as u8, dob.day());
    on.year() - dob.year() - if had_birthday { 0 } else { 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use time::macros::{date, datetime};

    #[test]
    fn test_years_before_leap_day() {
        assert_eq!(years_before(date!(2024 - 02 - 29), 1), date!(2023 - 02 - 28));
        assert_eq!(years_before(date!(2024 - 02 - 29), 4), date!(2020 - 02 - 29));
        assert_eq!(years_before(date!(2024 - 06 - 15), 18), date!(2006 - 06 - 15));
        assert_eq!(years_before(date!(2000 - 02 - 29), 100), date!(1900 - 02 - 28));
        assert_eq!(years_before(date!(2023 - 01 - 31), 1), date!(2022 - 01 - 31));
    }

    #[test]
    fn test_age_on() {
        assert_eq!(age_on(date!(2000 - 06 - 15), date!(2018 - 06 - 15)), 18);
        assert_eq!(age_on(date!(2000 - 06 - 15), date!(2018 - 06 - 14)), 17);
        assert_eq!(age_on(date!(2000 - 02 - 29), date!(2018 - 02 - 28)), 17);
    }

    #[test]
    fn test_date_of_birth_bounds() {
        let provider = FakeIdentity::new();
        let mut rng = StdRng::seed_from_u64(7);

        for on in [date!(2024 - 02 - 29), date!(2024 - 06 - 01), date!(2023 - 12 - 31)] {
            for _ in 0..500 {
                let dob = provider.date_of_birth(on, 18, 85, &mut rng);
                let age = age_on(dob, on);
                assert!((18..=85).contains(&age), "age {age} out of range for {dob}");
            }
        }
    }

    #[test]
    fn test_date_time_between_window() {
        let provider = FakeIdentity::new();
        let mut rng = StdRng::seed_from_u64(11);
        let start = datetime!(2022-06-01 0:00 UTC);
        let end = datetime!(2024-06-01 0:00 UTC);

        for _ in 0..500 {
            let ts = provider.date_time_between(start, end, &mut rng);
            assert!(ts >= start && ts <= end);
        }

        // Empty window collapses to its start
        assert_eq!(provider.date_time_between(end, start, &mut rng), end);
    }
}

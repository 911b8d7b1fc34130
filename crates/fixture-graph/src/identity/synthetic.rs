//! Identity provider backed by the `fake` crate.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, PostCode, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rand::Rng;

use super::IdentityProvider;
use super::iban::iban_check_digits;

/// Configuration for the fake-backed provider.
#[derive(Debug, Clone)]
pub struct FakeIdentityConfig {
    /// Email domains picked uniformly per address.
    pub email_domains: Vec<String>,
    /// Country code used for generated IBANs.
    pub iban_country: String,
    /// Four-letter bank codes used in generated IBANs.
    pub bank_codes: Vec<String>,
    /// Word count range for description sentences.
    pub sentence_words: (usize, usize),
}

impl Default for FakeIdentityConfig {
    fn default() -> Self {
        Self {
            email_domains: vec![
                "gmail.com".into(),
                "outlook.com".into(),
                "yahoo.com".into(),
                "proton.me".into(),
            ],
            iban_country: "GB".to_string(),
            bank_codes: vec![
                "BARC".into(),
                "HBUK".into(),
                "LOYD".into(),
                "NWBK".into(),
                "MIDL".into(),
            ],
            sentence_words: (3, 6),
        }
    }
}

/// Generates realistic identity attributes using `fake` with the caller's RNG.
#[derive(Debug, Clone, Default)]
pub struct FakeIdentity {
    config: FakeIdentityConfig,
}

impl FakeIdentity {
    /// Creates a provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider with custom configuration.
    pub fn with_config(config: FakeIdentityConfig) -> Self {
        Self { config }
    }

    fn pick<'a, R: Rng>(options: &'a [String], fallback: &'a str, rng: &mut R) -> &'a str {
        if options.is_empty() {
            return fallback;
        }
        &options[rng.gen_range(0..options.len())]
    }
}

impl IdentityProvider for FakeIdentity {
    fn first_name<R: Rng>(&self, rng: &mut R) -> String {
        FirstName().fake_with_rng(rng)
    }

    fn last_name<R: Rng>(&self, rng: &mut R) -> String {
        LastName().fake_with_rng(rng)
    }

    fn email<R: Rng>(&self, first_name: &str, last_name: &str, rng: &mut R) -> String {
        let normalized: String = format!("{first_name} {last_name}")
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == ' ')
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".");

        let suffix: u32 = rng.gen_range(1..9999);
        let domain = Self::pick(&self.config.email_domains, "example.com", rng);

        format!("{normalized}{suffix}@{domain}")
    }

    fn phone<R: Rng>(&self, rng: &mut R) -> String {
        PhoneNumber().fake_with_rng(rng)
    }

    fn address<R: Rng>(&self, rng: &mut R) -> String {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        let city: String = CityName().fake_with_rng(rng);
        let post_code: String = PostCode().fake_with_rng(rng);
        format!("{number} {street}, {city}, {post_code}")
    }

    fn country<R: Rng>(&self, rng: &mut R) -> String {
        CountryName().fake_with_rng(rng)
    }

    fn company_name<R: Rng>(&self, rng: &mut R) -> String {
        CompanyName().fake_with_rng(rng)
    }

    fn registration_number<R: Rng>(&self, rng: &mut R) -> String {
        format!("REG{:08}", rng.gen_range(0..100_000_000u32))
    }

    fn iban<R: Rng>(&self, rng: &mut R) -> String {
        let bank = Self::pick(&self.config.bank_codes, "BANK", rng);
        let sort_code: u32 = rng.gen_range(0..1_000_000);
        let account: u32 = rng.gen_range(0..100_000_000);
        let bban = format!("{bank}{sort_code:06}{account:08}");
        let country = &self.config.iban_country;

        match iban_check_digits(country, &bban) {
            Some(check) => format!("{country}{check:02}{bban}"),
            // Non-alphanumeric bank code in config: emit without a valid checksum
            None => format!("{country}00{bban}"),
        }
    }

    fn sentence<R: Rng>(&self, rng: &mut R) -> String {
        let (min, max) = self.config.sentence_words;
        Sentence(min..max.max(min + 1)).fake_with_rng(rng)
    }
}

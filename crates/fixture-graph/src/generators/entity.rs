//! Customer, company and account populations.

use rand::Rng;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};
use tracing::debug;

use crate::config::{GenerationConfig, Industry};
use crate::identity::{FakeIdentity, IdentityProvider};
use crate::ids;

/// Generated customer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    #[serde(with = "crate::iso_date")]
    pub date_of_birth: Date,
    /// Set by the relationship stage; `None` means unemployed or self-employed.
    pub employer_company_id: Option<String>,
}

/// Generated company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub company_id: String,
    pub name: String,
    pub registration_number: String,
    pub country: String,
    pub address: String,
    pub sector: String,
}

/// Generated account row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub customer_id: String,
    pub iban: String,
    pub currency: String,
    #[serde(with = "crate::iso_date")]
    pub opened_date: Date,
}

/// Configuration for entity generation.
#[derive(Debug, Clone)]
pub struct EntityGenConfig {
    /// Industry template for the company sector label.
    pub industry: Industry,
    /// Accounts per customer, inclusive.
    pub accounts_per_customer: (usize, usize),
    /// Currency stamped on every account.
    pub currency: String,
    /// Reference instant for ages and account opening dates.
    pub as_of: OffsetDateTime,
    /// Customer age range in years, inclusive.
    pub age_range: (i32, i32),
    /// How far back account opening dates reach, in days.
    pub account_history_days: i64,
}

impl Default for EntityGenConfig {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for EntityGenConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            industry: config.industry(),
            accounts_per_customer: config.accounts_per_customer,
            currency: config.currency.clone(),
            as_of: config.reference_time(),
            age_range: (18, 85),
            account_history_days: 5 * 365,
        }
    }
}

/// Produces the customer, company and account populations.
pub struct EntityGenerator<I = FakeIdentity> {
    config: EntityGenConfig,
    identity: I,
}

impl EntityGenerator {
    /// Creates a generator with default configuration.
    pub fn new() -> Self {
        Self::with_config(EntityGenConfig::default())
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: EntityGenConfig) -> Self {
        Self {
            config,
            identity: FakeIdentity::new(),
        }
    }
}

impl Default for EntityGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdentityProvider> EntityGenerator<I> {
    /// Creates a generator with a custom identity provider.
    pub fn with_identity(config: EntityGenConfig, identity: I) -> Self {
        Self { config, identity }
    }

    /// Generates `count` customers with ids `CUST_000001..`.
    pub fn generate_customers(&self, count: usize, rng: &mut impl Rng) -> Vec<Customer> {
        let today = self.config.as_of.date();
        let (min_age, max_age) = self.config.age_range;

        let customers: Vec<Customer> = (1..=count as u64)
            .map(|seq| {
                let first_name = self.identity.first_name(rng);
                let last_name = self.identity.last_name(rng);
                let email = self.identity.email(&first_name, &last_name, rng);

                Customer {
                    customer_id: ids::customer_id(seq),
                    email,
                    phone: self.identity.phone(rng),
                    address: self.identity.address(rng),
                    country: self.identity.country(rng),
                    date_of_birth: self.identity.date_of_birth(today, min_age, max_age, rng),
                    employer_company_id: None,
                    first_name,
                    last_name,
                }
            })
            .collect();

        debug!("Generated {} customers", customers.len());
        customers
    }

    /// Generates `count` companies with ids `COMP_000001..`.
    pub fn generate_companies(&self, count: usize, rng: &mut impl Rng) -> Vec<Company> {
        let sector = self.config.industry.sector_label();

        let companies: Vec<Company> = (1..=count as u64)
            .map(|seq| Company {
                company_id: ids::company_id(seq),
                name: self.identity.company_name(rng),
                registration_number: self.identity.registration_number(rng),
                country: self.identity.country(rng),
                address: self.identity.address(rng),
                sector: sector.to_string(),
            })
            .collect();

        debug!("Generated {} companies", companies.len());
        companies
    }

    /// Generates accounts for every customer.
    ///
    /// Each customer draws its account count uniformly from the configured inclusive range.
    /// Account ids come from one global sequence so they stay unique across owners.
    pub fn generate_accounts(&self, customers: &[Customer], rng: &mut impl Rng) -> Vec<Account> {
        let (min_accounts, max_accounts) = self.config.accounts_per_customer;
        let today = self.config.as_of.date();
        let earliest = today - Duration::days(self.config.account_history_days);

        let mut accounts = Vec::new();
        let mut next_seq: u64 = 1;

        for customer in customers {
            // An inverted range is a caller error; fall back to the minimum.
            let num_accounts = if min_accounts >= max_accounts {
                min_accounts
            } else {
                rng.gen_range(min_accounts..=max_accounts)
            };

            for _ in 0..num_accounts {
                accounts.push(Account {
                    account_id: ids::account_id(next_seq),
                    customer_id: customer.customer_id.clone(),
                    iban: self.identity.iban(rng),
                    currency: self.config.currency.clone(),
                    opened_date: self.identity.date_between(earliest, today, rng),
                });
                next_seq += 1;
            }
        }

        debug!(
            "Generated {} accounts for {} customers",
            accounts.len(),
            customers.len()
        );
        accounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::age_on;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use time::macros::datetime;

    fn test_config() -> EntityGenConfig {
        EntityGenConfig {
            as_of: datetime!(2024-06-01 0:00 UTC),
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_customers() {
        let entity_gen = EntityGenerator::with_config(test_config());
        let mut rng = StdRng::seed_from_u64(1);
        let customers = entity_gen.generate_customers(25, &mut rng);

        assert_eq!(customers.len(), 25);
        assert_eq!(customers[0].customer_id, "CUST_000001");
        assert_eq!(customers[24].customer_id, "CUST_000025");

        let ids: HashSet<_> = customers.iter().map(|c| &c.customer_id).collect();
        assert_eq!(ids.len(), 25);

        let today = datetime!(2024-06-01 0:00 UTC).date();
        for c in &customers {
            assert!(c.employer_company_id.is_none());
            assert!(c.email.contains('@'));
            let age = age_on(c.date_of_birth, today);
            assert!((18..=85).contains(&age));
        }
    }

    #[test]
    fn test_zero_counts() {
        let entity_gen = EntityGenerator::with_config(test_config());
        let mut rng = StdRng::seed_from_u64(1);

        assert!(entity_gen.generate_customers(0, &mut rng).is_empty());
        assert!(entity_gen.generate_companies(0, &mut rng).is_empty());
        assert!(entity_gen.generate_accounts(&[], &mut rng).is_empty());
    }

    #[test]
    fn test_company_sector() {
        let mut rng = StdRng::seed_from_u64(2);

        let banking = EntityGenerator::with_config(test_config());
        let companies = banking.generate_companies(5, &mut rng);
        assert_eq!(companies[4].company_id, "COMP_000005");
        assert!(companies.iter().all(|c| c.sector == "Banking"));
        assert!(companies.iter().all(|c| c.registration_number.starts_with("REG")));

        let generic = EntityGenerator::with_config(EntityGenConfig {
            industry: Industry::from_label("aerospace"),
            ..test_config()
        });
        let companies = generic.generate_companies(3, &mut rng);
        assert!(companies.iter().all(|c| c.sector == "Generic"));
    }

    #[test]
    fn test_accounts_per_customer_range() {
        let entity_gen = EntityGenerator::with_config(EntityGenConfig {
            accounts_per_customer: (2, 4),
            ..test_config()
        });
        let mut rng = StdRng::seed_from_u64(3);
        let customers = entity_gen.generate_customers(40, &mut rng);
        let accounts = entity_gen.generate_accounts(&customers, &mut rng);

        for customer in &customers {
            let owned = accounts
                .iter()
                .filter(|a| a.customer_id == customer.customer_id)
                .count();
            assert!((2..=4).contains(&owned), "{owned} accounts");
        }

        // One global sequence, never reset per customer
        for (i, account) in accounts.iter().enumerate() {
            assert_eq!(account.account_id, ids::account_id(i as u64 + 1));
        }
    }

    #[test]
    fn test_account_opening_window() {
        let entity_gen = EntityGenerator::with_config(test_config());
        let mut rng = StdRng::seed_from_u64(4);
        let customers = entity_gen.generate_customers(20, &mut rng);
        let accounts = entity_gen.generate_accounts(&customers, &mut rng);

        let today = datetime!(2024-06-01 0:00 UTC).date();
        let earliest = today - Duration::days(5 * 365);
        for account in &accounts {
            assert!(account.opened_date >= earliest && account.opened_date <= today);
            assert_eq!(account.currency, "GBP");
        }
    }
}

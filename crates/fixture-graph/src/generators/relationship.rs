//! Employer links and the organic transaction set.

use rand::Rng;
use rand_distr::{Distribution, LogNormal};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use super::entity::{Account, Company, Customer};
use crate::config::{EmploymentModel, GenerationConfig};
use crate::identity::{FakeIdentity, IdentityProvider};
use crate::ids;

/// Generated transaction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub txn_id: String,
    pub src_account_id: String,
    pub dst_account_id: String,
    /// Positive amount rounded to two decimal places.
    pub amount: f64,
    pub currency: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub description: String,
}

/// Configuration for relationship building.
#[derive(Debug, Clone)]
pub struct RelationshipConfig {
    pub employment: EmploymentModel,
    /// Currency stamped on every transaction.
    pub currency: String,
    /// End of the transaction window.
    pub as_of: OffsetDateTime,
    /// Length of the trailing transaction window in days.
    pub window_days: i64,
    /// Location (mu) of the log-normal amount distribution.
    pub amount_log_mean: f64,
    /// Scale (sigma) of the log-normal amount distribution.
    pub amount_log_std: f64,
}

impl Default for RelationshipConfig {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for RelationshipConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            employment: config.employment,
            currency: config.currency.clone(),
            as_of: config.reference_time(),
            window_days: 2 * 365,
            // Right-skewed: many small payments, few large ones
            amount_log_mean: 3.5,
            amount_log_std: 1.0,
        }
    }
}

/// Wires entities together: employment links and account-to-account transactions.
pub struct RelationshipBuilder<I = FakeIdentity> {
    config: RelationshipConfig,
    identity: I,
    /// `None` when the configured scale is not a valid standard deviation.
    amounts: Option<LogNormal<f64>>,
}

fn amount_distribution(config: &RelationshipConfig) -> Option<LogNormal<f64>> {
    match LogNormal::new(config.amount_log_mean, config.amount_log_std) {
        Ok(dist) => Some(dist),
        Err(e) => {
            warn!(
                "Invalid amount distribution (mu={}, sigma={}): {}; using fixed amount exp(mu)",
                config.amount_log_mean, config.amount_log_std, e
            );
            None
        }
    }
}

impl RelationshipBuilder {
    /// Creates a builder with default configuration.
    pub fn new() -> Self {
        Self::with_config(RelationshipConfig::default())
    }

    /// Creates a builder with custom configuration.
    pub fn with_config(config: RelationshipConfig) -> Self {
        Self::with_identity(config, FakeIdentity::new())
    }
}

impl Default for RelationshipBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: IdentityProvider> RelationshipBuilder<I> {
    /// Creates a builder with a custom identity provider.
    pub fn with_identity(config: RelationshipConfig, identity: I) -> Self {
        let amounts = amount_distribution(&config);
        Self {
            config,
            identity,
            amounts,
        }
    }

    /// Returns a copy of `customers` with `employer_company_id` sampled per customer.
    ///
    /// Under [`EmploymentModel::UniformWithNone`] the "no employer" outcome carries the same
    /// weight as any single company.
    pub fn assign_employers(
        &self,
        customers: &[Customer],
        companies: &[Company],
        rng: &mut impl Rng,
    ) -> Vec<Customer> {
        let assigned: Vec<Customer> = customers
            .iter()
            .map(|customer| Customer {
                employer_company_id: self.pick_employer(companies, rng),
                ..customer.clone()
            })
            .collect();

        let employed = assigned
            .iter()
            .filter(|c| c.employer_company_id.is_some())
            .count();
        debug!(
            "Assigned employers: {} of {} customers employed",
            employed,
            assigned.len()
        );

        assigned
    }

    fn pick_employer(&self, companies: &[Company], rng: &mut impl Rng) -> Option<String> {
        match self.config.employment {
            EmploymentModel::UniformWithNone => {
                let idx = rng.gen_range(0..=companies.len());
                companies.get(idx).map(|c| c.company_id.clone())
            }
            EmploymentModel::Rate { unemployed } => {
                if rng.r#gen::<f64>() < unemployed || companies.is_empty() {
                    None
                } else {
                    let idx = rng.gen_range(0..companies.len());
                    Some(companies[idx].company_id.clone())
                }
            }
        }
    }

    /// Generates `count` transactions between uniformly sampled accounts.
    ///
    /// A self-transfer is resampled from the remaining accounts whenever more than one account
    /// exists. With a single account every transaction is a self-transfer; with none the
    /// result is empty.
    pub fn generate_transactions(
        &self,
        accounts: &[Account],
        count: usize,
        rng: &mut impl Rng,
    ) -> Vec<Transaction> {
        if accounts.is_empty() {
            if count > 0 {
                warn!("No accounts available, skipping {} transactions", count);
            }
            return Vec::new();
        }

        let end = self.config.as_of;
        let start = end - Duration::days(self.config.window_days);
        let n = accounts.len();

        let transactions: Vec<Transaction> = (1..=count as u64)
            .map(|seq| {
                let src = rng.gen_range(0..n);
                let mut dst = rng.gen_range(0..n);
                if dst == src && n > 1 {
                    let other = rng.gen_range(0..n - 1);
                    dst = if other >= src { other + 1 } else { other };
                }

                Transaction {
                    txn_id: ids::transaction_id(seq),
                    src_account_id: accounts[src].account_id.clone(),
                    dst_account_id: accounts[dst].account_id.clone(),
                    amount: self.sample_amount(rng),
                    currency: self.config.currency.clone(),
                    timestamp: self.identity.date_time_between(start, end, rng),
                    description: self.identity.sentence(rng),
                }
            })
            .collect();

        debug!(
            "Generated {} transactions over {} accounts",
            transactions.len(),
            n
        );
        transactions
    }

    /// Samples a log-normal amount rounded to cents, never below one cent.
    fn sample_amount(&self, rng: &mut impl Rng) -> f64 {
        let raw = match &self.amounts {
            Some(dist) => dist.sample(rng),
            None => self.config.amount_log_mean.exp(),
        };
        ((raw * 100.0).round() / 100.0).max(0.01)
    }
}

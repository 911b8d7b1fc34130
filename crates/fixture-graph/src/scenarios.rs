//! Anomaly injection: near-duplicate customers and circular layering rings.
//!
//! Both injectors take complete tables and return new ones (original rows first, injected
//! rows appended). Neither ever reuses an identifier already present in its input.

use rand::Rng;
use rand::seq::index;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::generators::{Account, Customer, Transaction};
use crate::ids;

/// Surname perturbations applied to cloned customers. The empty suffix yields exact duplicates.
pub const SURNAME_SUFFIXES: &[&str] = &["", "-", " Jr", " Sr"];

/// Amount used for every ring transaction, just under a common reporting threshold.
pub const STRUCTURING_AMOUNT: f64 = 9_999.99;

pub const LAYERING_DESCRIPTION: &str = "Layering pattern";

/// Configuration for the scenario injector.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Ring timestamp used when the transaction table is empty.
    pub fallback_time: OffsetDateTime,
    pub structuring_amount: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            fallback_time: OffsetDateTime::UNIX_EPOCH,
            structuring_amount: STRUCTURING_AMOUNT,
        }
    }
}

/// Adds anomalies to otherwise organic data.
pub struct ScenarioInjector {
    config: ScenarioConfig,
}

impl ScenarioInjector {
    /// Creates an injector with default configuration.
    pub fn new() -> Self {
        Self {
            config: ScenarioConfig::default(),
        }
    }

    /// Creates an injector with custom configuration.
    pub fn with_config(config: ScenarioConfig) -> Self {
        Self { config }
    }

    /// Appends `floor(ratio * N)` near-duplicate customers.
    ///
    /// Clones are picked without replacement, get fresh ids continuing from the largest
    /// numeric suffix in the table, and have a surname suffix from [`SURNAME_SUFFIXES`].
    pub fn add_duplicate_customers(
        &self,
        customers: &[Customer],
        ratio: f64,
        rng: &mut impl Rng,
    ) -> Vec<Customer> {
        let total = customers.len();
        // Negative and NaN ratios saturate to zero
        let count = ((total as f64 * ratio).floor() as usize).min(total);

        let mut result = customers.to_vec();
        if count == 0 {
            return result;
        }

        let mut next_seq = customers
            .iter()
            .filter_map(|c| ids::numeric_suffix(&c.customer_id))
            .max()
            .unwrap_or(0)
            + 1;

        for idx in index::sample(rng, total, count).iter() {
            let original = &customers[idx];
            let suffix = SURNAME_SUFFIXES[rng.gen_range(0..SURNAME_SUFFIXES.len())];

            result.push(Customer {
                customer_id: ids::customer_id(next_seq),
                last_name: format!("{}{suffix}", original.last_name),
                ..original.clone()
            });
            next_seq += 1;
        }

        info!("Injected {} duplicate customers", count);
        result
    }

    /// Appends `n_rings` closed transaction cycles of `ring_size` distinct accounts each.
    ///
    /// Every ring transaction carries the structuring amount and the latest timestamp already
    /// in the table. Rings are skipped when there are fewer than `ring_size` accounts or the
    /// ring would not have at least two members.
    pub fn add_structured_fraud_transactions(
        &self,
        transactions: &[Transaction],
        accounts: &[Account],
        n_rings: usize,
        ring_size: usize,
        rng: &mut impl Rng,
    ) -> Vec<Transaction> {
        let mut result = transactions.to_vec();

        if n_rings == 0 {
            return result;
        }
        if ring_size < 2 || accounts.len() < ring_size {
            warn!(
                "Skipping {} fraud rings: ring size {} with {} accounts",
                n_rings,
                ring_size,
                accounts.len()
            );
            return result;
        }

        let timestamp = transactions
            .iter()
            .map(|t| t.timestamp)
            .max()
            .unwrap_or(self.config.fallback_time);

        // Continue numbering after rings injected by an earlier call
        let first_ring = transactions
            .iter()
            .filter_map(|t| ids::fraud_ring_number(&t.txn_id))
            .max()
            .map_or(0, |ring| ring + 1);

        for ring in first_ring..first_ring + n_rings as u64 {
            let members = index::sample(rng, accounts.len(), ring_size).into_vec();

            for (i, &src) in members.iter().enumerate() {
                let dst = members[(i + 1) % ring_size];
                result.push(Transaction {
                    txn_id: ids::fraud_ring_transaction_id(ring, i),
                    src_account_id: accounts[src].account_id.clone(),
                    dst_account_id: accounts[dst].account_id.clone(),
                    amount: self.config.structuring_amount,
                    currency: accounts[src].currency.clone(),
                    timestamp,
                    description: LAYERING_DESCRIPTION.to_string(),
                });
            }
        }

        info!(
            "Injected {} fraud rings ({} transactions)",
            n_rings,
            n_rings * ring_size
        );
        result
    }
}

impl Default for ScenarioInjector {
    fn default() -> Self {
        Self::new()
    }
}

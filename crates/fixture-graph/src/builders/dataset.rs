//! Fluent builder for complete generation runs.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use time::OffsetDateTime;
use tracing::info;

use crate::config::{EmploymentModel, FraudConfig, GenerationConfig};
use crate::edges::{Edge, build_edges};
use crate::generators::{
    Account, Company, Customer, EntityGenConfig, EntityGenerator, RelationshipBuilder,
    RelationshipConfig, Transaction,
};
use crate::scenarios::{ScenarioConfig, ScenarioInjector};

/// The five tables produced by one run.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub companies: Vec<Company>,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub edges: Vec<Edge>,
    /// Metrics from generation (populated if metrics tracking enabled).
    pub metrics: Option<DatasetMetrics>,
}

/// Performance and size metrics from a generation run.
#[derive(Debug, Clone)]
pub struct DatasetMetrics {
    /// Time spent generating data (milliseconds).
    pub generation_time_ms: u64,
    pub customer_count: usize,
    pub company_count: usize,
    pub account_count: usize,
    pub transaction_count: usize,
    pub edge_count: usize,
    /// Customers appended by duplicate injection.
    pub duplicate_customer_count: usize,
    /// Transactions appended by fraud ring injection.
    pub fraud_transaction_count: usize,
}

/// Builder for complete datasets.
///
/// # Example
///
/// ```rust,ignore
/// let dataset = DatasetBuilder::new()
///     .with_customers(50)
///     .with_companies(10)
///     .with_accounts_per_customer(1, 2)
///     .with_transactions(500)
///     .with_fraud(true)
///     .with_seed(7)
///     .build();
/// ```
pub struct DatasetBuilder {
    config: GenerationConfig,
    track_metrics: bool,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::from_config(GenerationConfig::default())
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: GenerationConfig) -> Self {
        Self {
            config,
            track_metrics: false,
        }
    }

    /// Returns the configuration the builder will run with.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Sets the industry label.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.config.industry = industry.into();
        self
    }

    /// Sets the number of customers to generate.
    pub fn with_customers(mut self, count: usize) -> Self {
        self.config.n_customers = count;
        self
    }

    /// Sets the number of companies to generate.
    pub fn with_companies(mut self, count: usize) -> Self {
        self.config.n_companies = count;
        self
    }

    /// Sets the inclusive range of accounts per customer.
    pub fn with_accounts_per_customer(mut self, min: usize, max: usize) -> Self {
        self.config.accounts_per_customer = (min, max);
        self
    }

    /// Sets the number of organic transactions.
    pub fn with_transactions(mut self, count: usize) -> Self {
        self.config.n_transactions = count;
        self
    }

    /// Enables or disables anomaly injection.
    pub fn with_fraud(mut self, enabled: bool) -> Self {
        self.config.include_fraud = enabled;
        self
    }

    /// Sets the anomaly injection parameters.
    pub fn with_fraud_config(mut self, fraud: FraudConfig) -> Self {
        self.config.fraud = fraud;
        self
    }

    /// Sets the employment model.
    pub fn with_employment(mut self, employment: EmploymentModel) -> Self {
        self.config.employment = employment;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.random_seed = Some(seed);
        self
    }

    /// Pins the reference instant all trailing windows end at.
    pub fn with_as_of(mut self, as_of: OffsetDateTime) -> Self {
        self.config.as_of = Some(as_of);
        self
    }

    /// Enables metrics tracking.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.track_metrics = enabled;
        self
    }

    /// Builds the dataset with an RNG seeded from the configuration (entropy if unseeded).
    pub fn build(&self) -> Dataset {
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.build_data(&mut rng)
    }

    /// Builds the dataset drawing from the supplied RNG.
    ///
    /// Stages always run, and draw from `rng`, in the same order: customers, companies,
    /// accounts, employers, transactions, duplicates, fraud rings.
    pub fn build_data(&self, rng: &mut impl Rng) -> Dataset {
        let start_time = if self.track_metrics {
            Some(Instant::now())
        } else {
            None
        };

        // Resolve once so every stage shares the same reference instant
        let mut config = self.config.clone();
        let as_of = config.reference_time();
        config.as_of = Some(as_of);

        info!(
            "Generating dataset: industry={} customers={} companies={} transactions={} fraud={}",
            config.industry,
            config.n_customers,
            config.n_companies,
            config.n_transactions,
            config.include_fraud
        );

        // Entities
        let entity_gen = EntityGenerator::with_config(EntityGenConfig::from(&config));
        let customers = entity_gen.generate_customers(config.n_customers, rng);
        let companies = entity_gen.generate_companies(config.n_companies, rng);
        let accounts = entity_gen.generate_accounts(&customers, rng);

        // Relationships
        let rel_builder = RelationshipBuilder::with_config(RelationshipConfig::from(&config));
        let customers = rel_builder.assign_employers(&customers, &companies, rng);
        let transactions = rel_builder.generate_transactions(&accounts, config.n_transactions, rng);

        // Anomalies
        let organic_customers = customers.len();
        let organic_transactions = transactions.len();
        let (customers, transactions) = if config.include_fraud {
            let injector = ScenarioInjector::with_config(ScenarioConfig {
                fallback_time: as_of,
                ..Default::default()
            });
            let customers =
                injector.add_duplicate_customers(&customers, config.fraud.duplicate_ratio, rng);
            let transactions = injector.add_structured_fraud_transactions(
                &transactions,
                &accounts,
                config.fraud.n_rings,
                config.fraud.ring_size,
                rng,
            );
            (customers, transactions)
        } else {
            (customers, transactions)
        };

        let edges = build_edges(&customers, &companies, &accounts, &transactions);

        info!(
            "Generated {} customers, {} companies, {} accounts, {} transactions, {} edges",
            customers.len(),
            companies.len(),
            accounts.len(),
            transactions.len(),
            edges.len()
        );

        let metrics = start_time.map(|start| DatasetMetrics {
            generation_time_ms: start.elapsed().as_millis() as u64,
            customer_count: customers.len(),
            company_count: companies.len(),
            account_count: accounts.len(),
            transaction_count: transactions.len(),
            edge_count: edges.len(),
            duplicate_customer_count: customers.len() - organic_customers,
            fraud_transaction_count: transactions.len() - organic_transactions,
        });

        Dataset {
            customers,
            companies,
            accounts,
            transactions,
            edges,
            metrics,
        }
    }
}

/// Runs a complete generation for `config`.
pub fn generate(config: &GenerationConfig) -> Dataset {
    DatasetBuilder::from_config(config.clone()).build()
}

/// Preset datasets for common testing needs.
impl DatasetBuilder {
    /// Small, anomaly-free dataset for quick checks.
    ///
    /// - 10 customers with exactly one account each
    /// - 3 companies
    /// - 5 transactions
    pub fn smoke_test() -> Self {
        Self::new()
            .with_customers(10)
            .with_companies(3)
            .with_accounts_per_customer(1, 1)
            .with_transactions(5)
            .with_fraud(false)
    }

    /// Dataset with dense anomalies for exercising detection pipelines.
    ///
    /// - 200 customers, 10% near-duplicates
    /// - 10 layering rings of 6 accounts
    /// - Metrics tracking enabled
    pub fn fraud_heavy() -> Self {
        Self::new()
            .with_customers(200)
            .with_companies(20)
            .with_accounts_per_customer(1, 4)
            .with_transactions(2_000)
            .with_fraud(true)
            .with_fraud_config(FraudConfig {
                duplicate_ratio: 0.1,
                n_rings: 10,
                ring_size: 6,
            })
            .with_metrics(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    const AS_OF: OffsetDateTime = datetime!(2024-06-01 0:00 UTC);

    #[test]
    fn test_smoke_test_counts() {
        let dataset = DatasetBuilder::smoke_test().with_as_of(AS_OF).build();

        assert_eq!(dataset.customers.len(), 10);
        assert_eq!(dataset.companies.len(), 3);
        assert_eq!(dataset.accounts.len(), 10);
        assert_eq!(dataset.transactions.len(), 5);

        let employed = dataset
            .customers
            .iter()
            .filter(|c| c.employer_company_id.is_some())
            .count();
        assert_eq!(dataset.edges.len(), 10 + employed + 5);
        assert!((15..=25).contains(&dataset.edges.len()));
    }

    #[test]
    fn test_fraud_stage_toggle() {
        let base = DatasetBuilder::new()
            .with_customers(100)
            .with_companies(5)
            .with_transactions(50)
            .with_fraud(false)
            .with_as_of(AS_OF)
            .with_seed(3)
            .with_metrics(true);

        let clean = base.build();
        let metrics = clean.metrics.unwrap();
        assert_eq!(metrics.duplicate_customer_count, 0);
        assert_eq!(metrics.fraud_transaction_count, 0);
        assert_eq!(clean.customers.len(), 100);

        let dirty = DatasetBuilder::from_config(base.config().clone())
            .with_fraud(true)
            .with_metrics(true)
            .build();
        let metrics = dirty.metrics.unwrap();
        assert_eq!(metrics.duplicate_customer_count, 2);
        assert_eq!(metrics.fraud_transaction_count, 15);
        assert_eq!(dirty.transactions.len(), 65);
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = DatasetBuilder::smoke_test().with_seed(9).with_as_of(AS_OF).build();
        let b = DatasetBuilder::smoke_test().with_seed(9).with_as_of(AS_OF).build();

        assert_eq!(a.customers, b.customers);
        assert_eq!(a.accounts, b.accounts);
        assert_eq!(a.transactions, b.transactions);
        assert_eq!(a.edges, b.edges);
    }

    #[test]
    fn test_preset_fraud_heavy() {
        let builder = DatasetBuilder::fraud_heavy();
        assert_eq!(builder.config.n_customers, 200);
        assert_eq!(builder.config.fraud.n_rings, 10);
        assert!(builder.config.include_fraud);
        assert!(builder.track_metrics);
    }

    #[test]
    fn test_metrics_tracking() {
        let without = DatasetBuilder::smoke_test().with_as_of(AS_OF).build();
        assert!(without.metrics.is_none());

        let with = DatasetBuilder::smoke_test()
            .with_as_of(AS_OF)
            .with_metrics(true)
            .build();
        let metrics = with.metrics.unwrap();
        assert_eq!(metrics.customer_count, 10);
        assert_eq!(metrics.account_count, 10);
        assert_eq!(metrics.edge_count, with.edges.len());
    }
}

//! Configuration types for dataset generation.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Time};

/// Industry template. Only affects the company `sector` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Industry {
    Banking,
    Insurance,
    Telco,
    Retail,
    /// Any label without a dedicated mapping.
    Other,
}

impl Industry {
    /// Parses an industry label. Matching is case-insensitive; unknown labels map to `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "banking" => Industry::Banking,
            "insurance" => Industry::Insurance,
            "telco" => Industry::Telco,
            "retail" => Industry::Retail,
            _ => Industry::Other,
        }
    }

    /// Returns the sector label written onto generated companies.
    pub fn sector_label(&self) -> &'static str {
        match self {
            Industry::Banking => "Banking",
            Industry::Insurance => "Insurance",
            Industry::Telco => "Telecommunications",
            Industry::Retail => "Retail",
            Industry::Other => "Generic",
        }
    }
}

/// How customers are linked to employers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmploymentModel {
    /// Uniform over every company plus a single "no employer" outcome.
    /// The unemployed rate is therefore 1 / (companies + 1).
    #[default]
    UniformWithNone,
    /// Explicit probability that a customer has no employer; employed
    /// customers pick a company uniformly.
    Rate {
        /// Probability (0.0-1.0) of no employer.
        unemployed: f64,
    },
}

/// Parameters for the anomaly injection stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Fraction of customers cloned as near-duplicates.
    pub duplicate_ratio: f64,
    /// Number of circular layering rings.
    pub n_rings: usize,
    /// Accounts per ring.
    pub ring_size: usize,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            duplicate_ratio: 0.02,
            n_rings: 3,
            ring_size: 5,
        }
    }
}

/// Configuration for a single generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Industry label (see [`Industry::from_label`]).
    pub industry: String,

    /// Number of customers to generate.
    pub n_customers: usize,

    /// Number of companies to generate.
    pub n_companies: usize,

    /// Accounts per customer, inclusive (min, max).
    pub accounts_per_customer: (usize, usize),

    /// Number of organic transactions.
    pub n_transactions: usize,

    /// Whether to run the anomaly injection stage.
    pub include_fraud: bool,

    /// Seed for reproducible runs. `None` seeds from entropy.
    pub random_seed: Option<u64>,

    /// Currency code stamped on accounts and transactions.
    pub currency: String,

    pub employment: EmploymentModel,

    pub fraud: FraudConfig,

    /// Reference instant for all trailing windows. `None` means today at midnight UTC.
    #[serde(with = "time::serde::rfc3339::option")]
    pub as_of: Option<OffsetDateTime>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            industry: "banking".to_string(),
            n_customers: 500,
            n_companies: 100,
            accounts_per_customer: (1, 3),
            n_transactions: 10_000,
            include_fraud: true,
            random_seed: Some(42),
            currency: "GBP".to_string(),
            employment: EmploymentModel::default(),
            fraud: FraudConfig::default(),
            as_of: None,
        }
    }
}

impl GenerationConfig {
    /// Returns the parsed industry template.
    pub fn industry(&self) -> Industry {
        Industry::from_label(&self.industry)
    }

    /// Resolves the reference instant.
    ///
    /// Without an explicit `as_of` this truncates the current UTC time to midnight so that
    /// seeded runs on the same day stay byte-identical.
    pub fn reference_time(&self) -> OffsetDateTime {
        self.as_of
            .unwrap_or_else(|| OffsetDateTime::now_utc().replace_time(Time::MIDNIGHT))
    }
}

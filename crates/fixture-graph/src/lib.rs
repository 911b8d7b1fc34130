//! Synthetic fixture generation for graph and analytics pipelines.
//!
//! This crate generates internally consistent customers, companies, accounts and
//! account-to-account transactions, optionally injects near-duplicate identities and
//! circular layering rings, and flattens everything into a relationship edge list.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fixture_graph::prelude::*;
//!
//! let dataset = DatasetBuilder::new()
//!     .with_industry("banking")
//!     .with_customers(500)
//!     .with_companies(100)
//!     .with_accounts_per_customer(1, 3)
//!     .with_transactions(10_000)
//!     .with_fraud(true)
//!     .with_seed(42)
//!     .build();
//!
//! Exporter::new("./output")?.export_dataset(&dataset)?;
//! ```

pub mod builders;
pub mod config;
pub mod edges;
pub mod export;
pub mod generators;
pub mod identity;
pub mod ids;
pub mod scenarios;

use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{Dataset, DatasetBuilder, DatasetMetrics, generate};
    pub use crate::config::{EmploymentModel, FraudConfig, GenerationConfig, Industry};
    pub use crate::edges::{Edge, RelationshipType, build_edges};
    pub use crate::export::{ExportError, Exporter};
    pub use crate::generators::{
        Account, Company, Customer, EntityGenerator, RelationshipBuilder, Transaction,
    };
    pub use crate::identity::{FakeIdentity, IdentityProvider};
    pub use crate::scenarios::ScenarioInjector;
}

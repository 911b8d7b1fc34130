//! Entity and relationship generators.
//!
//! This module provides the organic (anomaly-free) population:
//! - [`EntityGenerator`]: Generate customers, companies and accounts
//! - [`RelationshipBuilder`]: Assign employers and generate transactions

pub mod entity;
pub mod relationship;

pub use entity::{Account, Company, Customer, EntityGenConfig, EntityGenerator};
pub use relationship::{RelationshipBuilder, RelationshipConfig, Transaction};

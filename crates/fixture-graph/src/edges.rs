//! Edge list flattening for graph ingestion.
//!
//! - CUSTOMER -> ACCOUNT (`owns_account`)
//! - CUSTOMER -> COMPANY (`employed_by`)
//! - ACCOUNT -> ACCOUNT (`transaction`)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::generators::{Account, Company, Customer, Transaction};

/// Relationship kind carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    OwnsAccount,
    EmployedBy,
    Transaction,
}

impl RelationshipType {
    /// Returns the serialized label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::OwnsAccount => "owns_account",
            RelationshipType::EmployedBy => "employed_by",
            RelationshipType::Transaction => "transaction",
        }
    }
}

/// One row of the edge list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source_id: String,
    pub target_id: String,
    pub relationship_type: RelationshipType,
}

/// Derives the edge list from already generated tables. Performs no sampling.
///
/// Rows are ordered ownership, then employment, then transactions, each in the row order of
/// its source table. Employment links to a company missing from `companies` are dropped so
/// every endpoint resolves.
pub fn build_edges(
    customers: &[Customer],
    companies: &[Company],
    accounts: &[Account],
    transactions: &[Transaction],
) -> Vec<Edge> {
    let company_ids: HashSet<&str> = companies.iter().map(|c| c.company_id.as_str()).collect();

    let ownership = accounts.iter().map(|a| Edge {
        source_id: a.customer_id.clone(),
        target_id: a.account_id.clone(),
        relationship_type: RelationshipType::OwnsAccount,
    });

    let mut dangling = 0usize;
    let employment: Vec<Edge> = customers
        .iter()
        .filter_map(|c| {
            let employer = c.employer_company_id.as_deref()?;
            if !company_ids.contains(employer) {
                dangling += 1;
                return None;
            }
            Some(Edge {
                source_id: c.customer_id.clone(),
                target_id: employer.to_string(),
                relationship_type: RelationshipType::EmployedBy,
            })
        })
        .collect();

    if dangling > 0 {
        warn!("Dropped {} employment links to unknown companies", dangling);
    }

    let transfers = transactions.iter().map(|t| Edge {
        source_id: t.src_account_id.clone(),
        target_id: t.dst_account_id.clone(),
        relationship_type: RelationshipType::Transaction,
    });

    let edges: Vec<Edge> = ownership.chain(employment).chain(transfers).collect();

    debug!("Built {} edges", edges.len());
    edges
}

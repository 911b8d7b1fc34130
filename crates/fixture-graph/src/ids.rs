//! Identifier formatting for generated entities.
//!
//! Identifiers are prefixed, zero-padded sequence numbers (`CUST_000001`, `ACC_000000001`).
//! Fraud ring transactions live in their own `FRD_RING_<ring>_<member>` namespace so they
//! never collide with organic `TXN_` ids.

pub const CUSTOMER_PREFIX: &str = "CUST_";
pub const COMPANY_PREFIX: &str = "COMP_";
pub const ACCOUNT_PREFIX: &str = "ACC_";
pub const TRANSACTION_PREFIX: &str = "TXN_";
pub const FRAUD_RING_PREFIX: &str = "FRD_RING_";

pub fn customer_id(seq: u64) -> String {
    format!("{CUSTOMER_PREFIX}{seq:06}")
}

pub fn company_id(seq: u64) -> String {
    format!("{COMPANY_PREFIX}{seq:06}")
}

pub fn account_id(seq: u64) -> String {
    format!("{ACCOUNT_PREFIX}{seq:09}")
}

pub fn transaction_id(seq: u64) -> String {
    format!("{TRANSACTION_PREFIX}{seq:09}")
}

pub fn fraud_ring_transaction_id(ring: u64, member: usize) -> String {
    format!("{FRAUD_RING_PREFIX}{ring}_{member}")
}

/// Parses the trailing run of ASCII digits, e.g. `CUST_000042` -> 42.
pub fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.len() - id.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    id[id.len() - digits..].parse().ok()
}

/// Extracts the ring number from a fraud ring transaction id.
pub fn fraud_ring_number(id: &str) -> Option<u64> {
    let rest = id.strip_prefix(FRAUD_RING_PREFIX)?;
    let (ring, _member) = rest.split_once('_')?;
    ring.parse().ok()
}

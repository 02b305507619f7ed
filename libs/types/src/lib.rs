//! Types library for the token ledger
//!
//! Shared identifier and quantity types used by the ledger contract and by
//! any host that embeds it.
//!
//! # Modules
//! - `ids`: Account identifiers and allowance keys
//! - `numeric`: Whole-unit amounts and checked arithmetic helpers

pub mod ids;
pub mod numeric;

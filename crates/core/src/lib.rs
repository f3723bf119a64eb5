//! Domain logic for the AgroNexo farm ledger.
//!
//! Everything in this crate is pure: parsing of loosely-typed client input,
//! the reproductive status table, liquidation and expense split math, and
//! the CSV writer used by the spreadsheet export. Persistence lives in
//! `agronexo_db`, transport in `agronexo_api`.

pub mod entity;
pub mod error;
pub mod export;
pub mod fanout;
pub mod grain;
pub mod liquidation;
pub mod livestock;
pub mod parsing;
pub mod period;
pub mod reproduction;
pub mod types;

//! financas-core: domain types shared by the ingestion pipeline, the API
//! client, and the CLI.

pub mod transaction;

pub use transaction::{BalanceAccount, Direction, PaymentMethod, Transaction};

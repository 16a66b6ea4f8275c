//! financas-api: HTTP client for the remote persistence API.
//!
//! The backend owns accounts, transactions, and goals; this crate only
//! speaks its JSON dialect with a bearer token. Retry and backoff belong
//! to the transport/backend side, not here.

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{
    Account, ApiTransaction, Goal, LoginResponse, MonthlySummary, NewTransaction, User,
};

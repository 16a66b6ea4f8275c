//! Wire types for the persistence API (camelCase JSON).

use financas_core::{BalanceAccount, Direction, PaymentMethod, Transaction};
use serde::{Deserialize, Serialize};

/// Body of `POST /transactions`. Field names are the backend's, not ours:
/// the rail goes out as `type`, the direction as `category`, and the
/// target balance as `balanceType`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub method: PaymentMethod,
    #[serde(rename = "category")]
    pub direction: Direction,
    pub amount: f64,
    pub description: String,
    pub category_tag: String,
    pub is_automatic: bool,
    #[serde(rename = "balanceType")]
    pub balance_account: BalanceAccount,
}

impl From<&Transaction> for NewTransaction {
    fn from(txn: &Transaction) -> Self {
        Self {
            method: txn.method,
            direction: txn.direction,
            amount: txn.amount,
            description: txn.description.clone(),
            category_tag: txn.category_tag.clone(),
            is_automatic: txn.is_automatic,
            balance_account: txn.balance_account,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// `GET /accounts` payload (unwrapped from its `account` envelope).
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub main_balance: f64,
    pub savings_balance: f64,
}

/// `GET /accounts/summary` payload (unwrapped from `summary`).
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

/// A stored transaction as the backend returns it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiTransaction {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub method: PaymentMethod,
    #[serde(rename = "category")]
    pub direction: Direction,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_automatic: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub current_amount: f64,
    pub target_amount: f64,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Goal {
    /// Progress toward the target, clamped to 0..=100.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }
}

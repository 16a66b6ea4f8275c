//! Transaction types produced by the notification pipeline

use serde::{Deserialize, Serialize};

/// Payment rail inferred from notification text
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "debit")]
    Debit,
    #[serde(rename = "credit")]
    Credit,
}

/// Cash-flow direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl Direction {
    /// Label mirrored into `Transaction::category_tag`
    pub fn category_tag(&self) -> &'static str {
        match self {
            Direction::Income => "Income",
            Direction::Expense => "Expense",
        }
    }
}

/// Which balance a transaction settles against. Automatic transactions
/// only ever touch the main account; savings moves are manual.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BalanceAccount {
    #[serde(rename = "main")]
    Main,
}

/// A fully-populated transaction extracted from a bank notification.
///
/// Either every field is set consistently or the record does not exist;
/// the classifier never hands out partial records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub method: PaymentMethod,
    pub direction: Direction,
    /// Always positive; `direction` carries the sign
    pub amount: f64,
    pub description: String,
    /// Agrees with `direction` ("Income"/"Expense")
    pub category_tag: String,
    /// True when extracted from a notification rather than entered by hand
    pub is_automatic: bool,
    pub balance_account: BalanceAccount,
}

impl Transaction {
    /// Build an automatically-extracted transaction. `category_tag`,
    /// `is_automatic`, and `balance_account` are derived, never passed in.
    pub fn automatic(
        method: PaymentMethod,
        direction: Direction,
        amount: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            method,
            direction,
            amount,
            description: description.into(),
            category_tag: direction.category_tag().to_string(),
            is_automatic: true,
            balance_account: BalanceAccount::Main,
        }
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Expense
    }
}

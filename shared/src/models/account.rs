//! Account and balance models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::{Address, TokenAmount};

/// A holder of tranche tokens
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Address,
    /// Balance ids, formatted `<account>-<tranche>` in lowercase
    pub balance_ids: Vec<String>,
}

impl Account {
    pub fn balance_count(&self) -> usize {
        self.balance_ids.len()
    }
}

impl Entity for Account {
    const SINGULAR: &'static str = "account";
    const COLLECTION: &'static str = "accounts";
    const FIELDS: &'static [&'static str] = &["id", "balances"];
    const SELECTION: &'static str = "id, balances { id }";
}

/// An account's holding of one tranche
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountBalance {
    pub id: String,
    pub account: Address,
    pub tranche: Address,
    pub amount: TokenAmount,
    /// Block of the last modification
    pub block: u64,
    pub modified: DateTime<Utc>,
    /// Hash of the last modifying transaction
    pub transaction: String,
}

impl Entity for AccountBalance {
    const SINGULAR: &'static str = "accountBalance";
    const COLLECTION: &'static str = "accountBalances";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "account",
        "tranche",
        "amount",
        "block",
        "modified",
        "transaction",
    ];
    const SELECTION: &'static str =
        "id, account { id }, tranche { id }, amount, block, modified, transaction";
}

/// Build the balance id the subgraph uses for an account's tranche holding
pub fn balance_id(account: &Address, tranche: &Address) -> String {
    format!("{}-{}", account.to_lowercase_hex(), tranche.to_lowercase_hex())
}

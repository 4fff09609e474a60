//! Account service: an account's tranche balances

use futures::future::try_join_all;
use serde::Serialize;
use shared::Address;

use crate::error::{AppError, AppResult};
use crate::external::SubgraphClient;

/// Account service
#[derive(Clone)]
pub struct AccountService {
    subgraph: SubgraphClient,
}

/// A balance whose tranche and token were both found
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedBalance {
    pub balance_id: String,
    pub tranche: Address,
    pub token: Address,
    pub token_symbol: String,
    /// Balance divided by the token's decimals
    pub amount: String,
}

/// One entry of the account page
///
/// A balance that cannot be resolved is reported inline instead of failing
/// the page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BalanceEntry {
    Resolved(ResolvedBalance),
    Unresolved { balance_id: String, problem: String },
}

/// Account page data
#[derive(Debug, Clone, Serialize)]
pub struct AccountDetail {
    pub account: Address,
    pub balances: Vec<BalanceEntry>,
}

impl AccountService {
    pub fn new(subgraph: SubgraphClient) -> Self {
        Self { subgraph }
    }

    pub async fn get_account_detail(&self, id: &Address) -> AppResult<AccountDetail> {
        let account = self
            .subgraph
            .account(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Account({})", id)))?;

        let balances = try_join_all(
            account
                .balance_ids
                .iter()
                .map(|balance_id| self.resolve_balance(balance_id)),
        )
        .await?;

        Ok(AccountDetail {
            account: account.id,
            balances,
        })
    }

    /// Balance -> tranche -> token; upstream failures still propagate
    async fn resolve_balance(&self, balance_id: &str) -> AppResult<BalanceEntry> {
        let unresolved = |problem: String| BalanceEntry::Unresolved {
            balance_id: balance_id.to_string(),
            problem,
        };

        let Some(balance) = self.subgraph.account_balance(balance_id).await? else {
            return Ok(unresolved(format!(
                "No accountBalance found for id: {}",
                balance_id
            )));
        };

        let Some(tranche) = self.subgraph.tranche(&balance.tranche).await? else {
            return Ok(unresolved(format!(
                "Tranche {} not found for accountBalance {}",
                balance.tranche, balance_id
            )));
        };

        let Some(token) = self.subgraph.token(&tranche.token).await? else {
            return Ok(unresolved(format!(
                "Token {} not found for accountBalance {}",
                tranche.token, balance_id
            )));
        };

        Ok(BalanceEntry::Resolved(ResolvedBalance {
            balance_id: balance_id.to_string(),
            tranche: tranche.id,
            token: token.id,
            amount: balance.amount.display_scaled(token.decimals),
            token_symbol: token.symbol,
        }))
    }
}

//! Landing page service: account and token overviews

use serde::Serialize;
use shared::{Address, OrderDirection};

use crate::error::{AppError, AppResult};
use crate::external::{ListQuery, SubgraphClient};

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    subgraph: SubgraphClient,
}

/// Number of distinct tranche balances held by an account
#[derive(Debug, Clone, Serialize)]
pub struct AccountActivity {
    pub account: Address,
    pub balance_count: usize,
}

/// A token and its scaled total supply
#[derive(Debug, Clone, Serialize)]
pub struct TokenSupply {
    pub token: Address,
    pub symbol: String,
    pub total_supply: String,
    #[serde(skip)]
    pub chart_value: f64,
}

/// Landing page data
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    /// Most diversified accounts first
    pub accounts: Vec<AccountActivity>,
    /// Largest total supply first
    pub tokens: Vec<TokenSupply>,
}

impl DashboardService {
    pub fn new(subgraph: SubgraphClient) -> Self {
        Self { subgraph }
    }

    pub async fn get_overview(&self, top_tokens: u32) -> AppResult<DashboardOverview> {
        let accounts_query = ListQuery::new().order_by("id", OrderDirection::Desc);
        let tokens_query = ListQuery::new()
            .first(top_tokens)
            .order_by("totalSupply", OrderDirection::Desc);

        let (accounts, tokens) = tokio::try_join!(
            self.subgraph.accounts(&accounts_query),
            self.subgraph.tokens(&tokens_query),
        )?;

        if accounts.is_empty() {
            return Err(AppError::NotFound("accounts".to_string()));
        }
        if tokens.is_empty() {
            return Err(AppError::NotFound("tokens".to_string()));
        }

        let mut accounts: Vec<AccountActivity> = accounts
            .into_iter()
            .map(|account| AccountActivity {
                balance_count: account.balance_count(),
                account: account.id,
            })
            .collect();
        sort_by_activity(&mut accounts);

        let tokens = tokens
            .into_iter()
            .map(|token| TokenSupply {
                total_supply: token.display_supply(),
                chart_value: token.total_supply.to_f64_scaled(token.decimals),
                token: token.id,
                symbol: token.symbol,
            })
            .collect();

        Ok(DashboardOverview { accounts, tokens })
    }
}

/// Most balances first; ties keep subgraph order
fn sort_by_activity(accounts: &mut [AccountActivity]) {
    accounts.sort_by(|a, b| b.balance_count.cmp(&a.balance_count));
}

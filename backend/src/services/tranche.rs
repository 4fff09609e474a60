//! Tranche service: tranche details and holder breakdowns

use serde::Serialize;
use shared::{Address, OrderDirection, Token, TokenAmount, Tranche, MAX_PAGE_SIZE};

use crate::error::{AppError, AppResult};
use crate::external::{ListQuery, SubgraphClient};

/// Tranche service
#[derive(Clone)]
pub struct TrancheService {
    subgraph: SubgraphClient,
}

/// One account holding a tranche
#[derive(Debug, Clone, Serialize)]
pub struct Holder {
    pub account: Address,
    /// Raw on-chain balance
    pub balance: TokenAmount,
    /// Balance divided by the token's decimals
    pub amount: String,
    #[serde(skip)]
    pub chart_value: f64,
}

/// Tranche page data
#[derive(Debug, Clone, Serialize)]
pub struct TrancheDetail {
    pub tranche: Tranche,
    pub token: Token,
    pub holders: Vec<Holder>,
}

/// Holders of `tranche`, largest balance first, scaled by `decimals`
pub(crate) async fn load_holders(
    subgraph: &SubgraphClient,
    tranche: &Address,
    decimals: u32,
) -> AppResult<Vec<Holder>> {
    let query = ListQuery::new()
        .first(MAX_PAGE_SIZE)
        .order_by("amount", OrderDirection::Desc)
        .filter("tranche", *tranche);

    let balances = subgraph.account_balances(&query).await?;

    Ok(balances
        .into_iter()
        .map(|balance| Holder {
            account: balance.account,
            amount: balance.amount.display_scaled(decimals),
            chart_value: balance.amount.to_f64_scaled(decimals),
            balance: balance.amount,
        })
        .collect())
}

impl TrancheService {
    pub fn new(subgraph: SubgraphClient) -> Self {
        Self { subgraph }
    }

    /// Tranche, its token and its holders
    pub async fn get_tranche_detail(&self, id: &Address) -> AppResult<TrancheDetail> {
        let tranche = self
            .subgraph
            .tranche(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tranche({})", id)))?;

        let token = self
            .subgraph
            .token(&tranche.token)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Token({})", tranche.token)))?;

        let holders = load_holders(&self.subgraph, &tranche.id, token.decimals).await?;

        Ok(TrancheDetail {
            tranche,
            token,
            holders,
        })
    }
}

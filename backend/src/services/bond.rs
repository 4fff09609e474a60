//! Bond service: bond listings and per-tranche holder breakdowns

use std::collections::HashMap;

use futures::future::try_join_all;
use serde::Serialize;
use shared::{Address, Bond, OrderDirection, Token};

use super::tranche::{load_holders, Holder};
use crate::error::{AppError, AppResult};
use crate::external::{ListQuery, SubgraphClient};

/// Bond service
#[derive(Clone)]
pub struct BondService {
    subgraph: SubgraphClient,
}

/// A bond together with its collateral token
#[derive(Debug, Clone, Serialize)]
pub struct BondSummary {
    pub bond: Bond,
    pub collateral: Token,
}

/// Holders of one tranche of a bond
#[derive(Debug, Clone, Serialize)]
pub struct TrancheHolders {
    pub tranche: Address,
    pub holders: Vec<Holder>,
}

/// Bond page data
#[derive(Debug, Clone, Serialize)]
pub struct BondDetail {
    pub bond: Bond,
    pub collateral: Token,
    pub tranches: Vec<TrancheHolders>,
}

impl BondService {
    pub fn new(subgraph: SubgraphClient) -> Self {
        Self { subgraph }
    }

    async fn collateral_token(&self, id: &Address) -> AppResult<Token> {
        self.subgraph
            .token(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Token({})", id)))
    }

    /// All bonds, active ones first, each with its collateral token
    pub async fn list_bonds(&self) -> AppResult<Vec<BondSummary>> {
        let query = ListQuery::new().order_by("isMature", OrderDirection::Asc);
        let bonds = self.subgraph.bonds(&query).await?;
        if bonds.is_empty() {
            return Err(AppError::NotFound("bonds".to_string()));
        }

        // Bonds commonly share collateral; fetch each token once
        let mut unique: Vec<Address> = bonds.iter().map(|b| b.collateral).collect();
        unique.sort();
        unique.dedup();

        let tokens = try_join_all(unique.iter().map(|id| self.collateral_token(id))).await?;
        let by_id: HashMap<Address, Token> = tokens.into_iter().map(|t| (t.id, t)).collect();

        bonds
            .into_iter()
            .map(|bond| {
                let collateral = by_id
                    .get(&bond.collateral)
                    .cloned()
                    .ok_or_else(|| AppError::NotFound(format!("Token({})", bond.collateral)))?;
                Ok(BondSummary { bond, collateral })
            })
            .collect()
    }

    /// Bond, collateral and the holders of every tranche
    ///
    /// Holder amounts are scaled by the collateral's decimals; tranche
    /// tokens are minted with the collateral's precision.
    pub async fn get_bond_detail(&self, id: &Address) -> AppResult<BondDetail> {
        let bond = self
            .subgraph
            .bond(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Bond({})", id)))?;

        let collateral = self.collateral_token(&bond.collateral).await?;
        let decimals = collateral.decimals;

        let tranches = try_join_all(bond.tranches.iter().map(|tranche| async move {
            let holders = load_holders(&self.subgraph, tranche, decimals).await?;
            Ok::<_, AppError>(TrancheHolders {
                tranche: *tranche,
                holders,
            })
        }))
        .await?;

        Ok(BondDetail {
            bond,
            collateral,
            tranches,
        })
    }
}

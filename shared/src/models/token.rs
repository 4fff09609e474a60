//! ERC-20 token model

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::{Address, TokenAmount};

/// An ERC-20 token, either a bond's collateral or a tranche token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub id: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    pub total_supply: TokenAmount,
}

impl Token {
    /// Total supply divided by the token's decimals
    pub fn display_supply(&self) -> String {
        self.total_supply.display_scaled(self.decimals)
    }
}

impl Entity for Token {
    const SINGULAR: &'static str = "token";
    const COLLECTION: &'static str = "tokens";
    const FIELDS: &'static [&'static str] = &["id", "symbol", "name", "decimals", "totalSupply"];
    const SELECTION: &'static str = "id, symbol, name, decimals, totalSupply";
}

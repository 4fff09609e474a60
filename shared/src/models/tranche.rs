//! Tranche model

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::{Address, TokenAmount};

/// One risk segment of a bond, represented by its own token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tranche {
    pub id: Address,
    pub bond: Address,
    pub token: Address,
    /// Share of the bond's collateral, out of 1000
    pub ratio: TokenAmount,
    /// Seniority, 0 is the most senior
    pub index: u32,
    pub total_collateral: TokenAmount,
}

impl Entity for Tranche {
    const SINGULAR: &'static str = "tranche";
    const COLLECTION: &'static str = "tranches";
    const FIELDS: &'static [&'static str] =
        &["id", "bond", "token", "ratio", "index", "totalCollateral"];
    const SELECTION: &'static str =
        "id, bond { id }, token { id }, ratio, index, totalCollateral";
}

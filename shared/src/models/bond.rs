//! Bond model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::{Address, TokenAmount};

/// A bond: a pool of collateral split into tranches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bond {
    pub id: Address,
    pub owners: Vec<Address>,
    /// Collateral token
    pub collateral: Address,
    /// Tranche contracts, ordered by seniority
    pub tranches: Vec<Address>,
    pub maturity_date: DateTime<Utc>,
    pub is_mature: bool,
    pub total_debt: TokenAmount,
    pub total_collateral: TokenAmount,
}

impl Bond {
    pub fn maturity_status(&self) -> &'static str {
        if self.is_mature {
            "Mature"
        } else {
            "Active"
        }
    }
}

impl Entity for Bond {
    const SINGULAR: &'static str = "bond";
    const COLLECTION: &'static str = "bonds";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "owners",
        "collateral",
        "tranches",
        "maturityDate",
        "isMature",
        "totalDebt",
        "totalCollateral",
    ];
    const SELECTION: &'static str = "id, owners, collateral { id }, tranches { id }, \
        maturityDate, isMature, totalDebt, totalCollateral";
}

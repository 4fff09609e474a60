//! Bond factory model

use serde::{Deserialize, Serialize};

use super::Entity;
use crate::types::Address;

/// A bond factory contract
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Factory {
    pub id: Address,
    pub bond_count: u64,
}

impl Entity for Factory {
    const SINGULAR: &'static str = "factory";
    const COLLECTION: &'static str = "factories";
    const FIELDS: &'static [&'static str] = &["id", "bondCount"];
    const SELECTION: &'static str = "id, bondCount";
}

//! Subgraph entity models for the Tranche Monitor

mod account;
mod bond;
mod factory;
mod token;
mod tranche;

pub use account::*;
pub use bond::*;
pub use factory::*;
pub use token::*;
pub use tranche::*;

/// Metadata describing how an entity is addressed in the subgraph schema
pub trait Entity {
    /// Singular query field, used for lookups by id (e.g. `bond`)
    const SINGULAR: &'static str;

    /// Plural query field, used for list queries (e.g. `bonds`)
    const COLLECTION: &'static str;

    /// Top-level fields of the selection set; order and filter keys must be one of these
    const FIELDS: &'static [&'static str];

    /// GraphQL selection set requested for this entity
    const SELECTION: &'static str;
}

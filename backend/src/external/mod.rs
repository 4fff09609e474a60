//! External API integrations

pub mod query;
pub mod subgraph;

pub use query::{FilterValue, ListQuery};
pub use subgraph::{IndexingStatus, SubgraphClient};

//! Token listing service

use shared::Token;

use crate::error::AppResult;
use crate::external::{ListQuery, SubgraphClient};

/// Token service
#[derive(Clone)]
pub struct TokenService {
    subgraph: SubgraphClient,
}

impl TokenService {
    pub fn new(subgraph: SubgraphClient) -> Self {
        Self { subgraph }
    }

    pub async fn list_tokens(&self, query: &ListQuery) -> AppResult<Vec<Token>> {
        self.subgraph.tokens(query).await
    }
}

//! Tranche subgraph client
//!
//! Sends GraphQL documents to the hosted subgraph and converts the wire
//! entities into the shared models.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared::{
    parse_u64, timestamp_from_secs, Account, AccountBalance, Address, Bond, Entity, Factory,
    Token, TokenAmount, Tranche,
};

use super::query::{by_id_document, list_document, ListQuery};
use crate::config::SubgraphConfig;
use crate::error::{AppError, AppResult};

/// Subgraph API client
#[derive(Clone)]
pub struct SubgraphClient {
    client: Client,
    url: String,
}

/// Indexing progress reported by the subgraph's `_meta` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingStatus {
    pub block_number: u64,
    pub has_indexing_errors: bool,
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Nested relation, selected as `{ id }`
#[derive(Debug, Deserialize)]
struct IdRef {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlFactory {
    id: String,
    bond_count: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlToken {
    id: String,
    symbol: String,
    name: String,
    decimals: Value,
    total_supply: TokenAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlBond {
    id: String,
    #[serde(default)]
    owners: Vec<String>,
    collateral: IdRef,
    #[serde(default)]
    tranches: Vec<IdRef>,
    maturity_date: Value,
    is_mature: bool,
    total_debt: TokenAmount,
    total_collateral: TokenAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlTranche {
    id: String,
    bond: IdRef,
    token: IdRef,
    ratio: TokenAmount,
    index: Value,
    total_collateral: TokenAmount,
}

#[derive(Debug, Deserialize)]
struct GqlAccount {
    id: String,
    #[serde(default)]
    balances: Vec<IdRef>,
}

#[derive(Debug, Deserialize)]
struct GqlAccountBalance {
    id: String,
    account: IdRef,
    tranche: IdRef,
    amount: TokenAmount,
    block: Value,
    modified: Value,
    transaction: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GqlMeta {
    block: GqlMetaBlock,
    #[serde(default)]
    has_indexing_errors: bool,
}

#[derive(Debug, Deserialize)]
struct GqlMetaBlock {
    number: Value,
}

/// Entities the client knows how to decode
trait WireEntity: Entity + Sized {
    type Raw: DeserializeOwned;

    /// Name used in parse error messages
    const KIND: &'static str;

    fn from_raw(raw: Self::Raw) -> Result<Self, String>;
}

fn address(field: &str, value: &str) -> Result<Address, String> {
    value
        .parse()
        .map_err(|e| format!("{} '{}': {}", field, value, e))
}

fn integer(field: &str, value: &Value) -> Result<u64, String> {
    parse_u64(value).ok_or_else(|| format!("{} is not an integer: {}", field, value))
}

fn small_integer(field: &str, value: &Value) -> Result<u32, String> {
    let n = integer(field, value)?;
    u32::try_from(n).map_err(|_| format!("{} out of range: {}", field, n))
}

fn timestamp(field: &str, value: &Value) -> Result<chrono::DateTime<chrono::Utc>, String> {
    let secs = integer(field, value)?;
    timestamp_from_secs(secs).ok_or_else(|| format!("{} out of range: {}", field, secs))
}

impl WireEntity for Factory {
    type Raw = GqlFactory;
    const KIND: &'static str = "Factory";

    fn from_raw(raw: GqlFactory) -> Result<Self, String> {
        Ok(Factory {
            id: address("id", &raw.id)?,
            bond_count: integer("bondCount", &raw.bond_count)?,
        })
    }
}

impl WireEntity for Token {
    type Raw = GqlToken;
    const KIND: &'static str = "Token";

    fn from_raw(raw: GqlToken) -> Result<Self, String> {
        Ok(Token {
            id: address("id", &raw.id)?,
            symbol: raw.symbol,
            name: raw.name,
            decimals: small_integer("decimals", &raw.decimals)?,
            total_supply: raw.total_supply,
        })
    }
}

impl WireEntity for Bond {
    type Raw = GqlBond;
    const KIND: &'static str = "Bond";

    fn from_raw(raw: GqlBond) -> Result<Self, String> {
        Ok(Bond {
            id: address("id", &raw.id)?,
            owners: raw
                .owners
                .iter()
                .map(|owner| address("owners", owner))
                .collect::<Result<_, _>>()?,
            collateral: address("collateral", &raw.collateral.id)?,
            tranches: raw
                .tranches
                .iter()
                .map(|tranche| address("tranches", &tranche.id))
                .collect::<Result<_, _>>()?,
            maturity_date: timestamp("maturityDate", &raw.maturity_date)?,
            is_mature: raw.is_mature,
            total_debt: raw.total_debt,
            total_collateral: raw.total_collateral,
        })
    }
}

impl WireEntity for Tranche {
    type Raw = GqlTranche;
    const KIND: &'static str = "Tranche";

    fn from_raw(raw: GqlTranche) -> Result<Self, String> {
        Ok(Tranche {
            id: address("id", &raw.id)?,
            bond: address("bond", &raw.bond.id)?,
            token: address("token", &raw.token.id)?,
            ratio: raw.ratio,
            index: small_integer("index", &raw.index)?,
            total_collateral: raw.total_collateral,
        })
    }
}

impl WireEntity for Account {
    type Raw = GqlAccount;
    const KIND: &'static str = "Account";

    fn from_raw(raw: GqlAccount) -> Result<Self, String> {
        Ok(Account {
            id: address("id", &raw.id)?,
            balance_ids: raw.balances.into_iter().map(|b| b.id).collect(),
        })
    }
}

impl WireEntity for AccountBalance {
    type Raw = GqlAccountBalance;
    const KIND: &'static str = "AccountBalance";

    fn from_raw(raw: GqlAccountBalance) -> Result<Self, String> {
        Ok(AccountBalance {
            id: raw.id,
            account: address("account", &raw.account.id)?,
            tranche: address("tranche", &raw.tranche.id)?,
            amount: raw.amount,
            block: integer("block", &raw.block)?,
            modified: timestamp("modified", &raw.modified)?,
            transaction: raw.transaction,
        })
    }
}

fn decode<T: WireEntity>(raw: Value) -> AppResult<Option<Vec<T>>> {
    let parse_failed = |detail: String| {
        AppError::SubgraphParse(format!("Parsing to {} failed: {}", T::KIND, detail))
    };

    let raws: Vec<T::Raw> = match raw {
        Value::Null => return Ok(None),
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(|e| parse_failed(e.to_string()))?,
        single => vec![serde_json::from_value(single).map_err(|e| parse_failed(e.to_string()))?],
    };

    raws.into_iter()
        .map(|raw| T::from_raw(raw).map_err(&parse_failed))
        .collect::<AppResult<Vec<T>>>()
        .map(Some)
}

impl SubgraphClient {
    /// Create a new SubgraphClient
    pub fn new(config: &SubgraphConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tranche-monitor/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// POST a GraphQL document and return its `data` payload
    pub async fn execute(&self, document: &str) -> AppResult<Value> {
        let started = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "query": document }))
            .send()
            .await
            .map_err(|e| AppError::SubgraphUnavailable(format!("Subgraph request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), body = %body, "Subgraph request rejected");
            return Err(AppError::Subgraph(format!("HTTP {}", status)));
        }

        let payload: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| AppError::SubgraphParse(format!("Invalid JSON response: {}", e)))?;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Subgraph query completed"
        );

        if !payload.errors.is_empty() {
            let messages = payload
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::Subgraph(messages));
        }

        payload
            .data
            .ok_or_else(|| AppError::SubgraphParse("Response has no data".to_string()))
    }

    async fn list<T: WireEntity>(&self, query: &ListQuery) -> AppResult<Vec<T>> {
        query.check(T::FIELDS)?;

        let document = list_document(T::COLLECTION, T::SELECTION, query);
        tracing::debug!(collection = T::COLLECTION, "Querying subgraph: {}", document);

        let mut data = self.execute(&document).await?;
        let raw = data.get_mut(T::COLLECTION).map(Value::take).unwrap_or(Value::Null);
        Ok(decode::<T>(raw)?.unwrap_or_default())
    }

    async fn by_id<T: WireEntity>(&self, id: &str) -> AppResult<Option<T>> {
        let document = by_id_document(T::SINGULAR, id, T::SELECTION);
        tracing::debug!(entity = T::SINGULAR, "Querying subgraph: {}", document);

        let mut data = self.execute(&document).await?;
        let raw = data.get_mut(T::SINGULAR).map(Value::take).unwrap_or(Value::Null);
        Ok(decode::<T>(raw)?.and_then(|mut items| items.pop()))
    }

    // ------------------------------------------------------------------
    // List queries
    // ------------------------------------------------------------------

    pub async fn tokens(&self, query: &ListQuery) -> AppResult<Vec<Token>> {
        self.list(query).await
    }

    pub async fn accounts(&self, query: &ListQuery) -> AppResult<Vec<Account>> {
        self.list(query).await
    }

    pub async fn account_balances(&self, query: &ListQuery) -> AppResult<Vec<AccountBalance>> {
        self.list(query).await
    }

    pub async fn tranches(&self, query: &ListQuery) -> AppResult<Vec<Tranche>> {
        self.list(query).await
    }

    pub async fn bonds(&self, query: &ListQuery) -> AppResult<Vec<Bond>> {
        self.list(query).await
    }

    // ------------------------------------------------------------------
    // Lookups by id
    // ------------------------------------------------------------------

    pub async fn factory(&self, id: &Address) -> AppResult<Option<Factory>> {
        self.by_id(&id.to_lowercase_hex()).await
    }

    pub async fn token(&self, id: &Address) -> AppResult<Option<Token>> {
        self.by_id(&id.to_lowercase_hex()).await
    }

    pub async fn bond(&self, id: &Address) -> AppResult<Option<Bond>> {
        self.by_id(&id.to_lowercase_hex()).await
    }

    pub async fn tranche(&self, id: &Address) -> AppResult<Option<Tranche>> {
        self.by_id(&id.to_lowercase_hex()).await
    }

    pub async fn account(&self, id: &Address) -> AppResult<Option<Account>> {
        self.by_id(&id.to_lowercase_hex()).await
    }

    /// Balance ids have the form `<account>-<tranche>`
    pub async fn account_balance(&self, id: &str) -> AppResult<Option<AccountBalance>> {
        self.by_id(id).await
    }

    /// Latest block the subgraph has indexed
    pub async fn indexing_status(&self) -> AppResult<IndexingStatus> {
        let mut data = self
            .execute("query { _meta { block { number } hasIndexingErrors } }")
            .await?;
        let raw = data.get_mut("_meta").map(Value::take).unwrap_or(Value::Null);
        let meta: GqlMeta = serde_json::from_value(raw)
            .map_err(|e| AppError::SubgraphParse(format!("Parsing _meta failed: {}", e)))?;

        Ok(IndexingStatus {
            block_number: integer("block.number", &meta.block.number)
                .map_err(AppError::SubgraphParse)?,
            has_indexing_errors: meta.has_indexing_errors,
        })
    }
}

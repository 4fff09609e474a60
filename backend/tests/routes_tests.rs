//! Router tests: pages and JSON API served against a mocked subgraph

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use tranche_monitor::{create_app, AppState, Config};

const BOND: &str = "0x8b3ea6492d25796346aa8a2c2e63da3e9e0ef75a";
const BOND_CHECKSUM: &str = "0x8B3ea6492d25796346Aa8a2C2e63Da3E9e0EF75A";
const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
const TRANCHE_A: &str = "0xaaa35282144c902d908a8a93dbc1e2bf36a6f5c7";
const TRANCHE_B: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
const ACCOUNT: &str = "0xd6f3804860f1cca51dae87a714ddb1a1ec60a619";
const OTHER_ACCOUNT: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";

fn app(subgraph_url: String) -> Router {
    let state = AppState::new(Config::for_subgraph(subgraph_url)).unwrap();
    create_app(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, String, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

fn token_json(id: &str, symbol: &str) -> Value {
    json!({
        "id": id,
        "symbol": symbol,
        "name": symbol,
        "decimals": 18,
        "totalSupply": "4000000000000000000"
    })
}

fn balance_json(account: &str, tranche: &str, amount: &str) -> Value {
    json!({
        "id": format!("{}-{}", account, tranche),
        "account": { "id": account },
        "tranche": { "id": tranche },
        "amount": amount,
        "block": "14000000",
        "modified": "1650000000",
        "transaction": "0xabc"
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_reports_indexed_block() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("_meta");
            then.status(200).json_body(json!({
                "data": { "_meta": { "block": { "number": 14250000 }, "hasIndexingErrors": false } }
            }));
        })
        .await;

    let (status, _, body) = get(app(server.url("/subgraph")), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["subgraph"], "connected");
    assert_eq!(health["indexed_block"], 14250000);
}

#[tokio::test]
async fn test_health_degraded_when_subgraph_unreachable() {
    let (status, _, body) = get(app("http://127.0.0.1:1/subgraph".to_string()), "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "degraded");
    assert_eq!(health["subgraph"], "unreachable");
    assert!(health["indexed_block"].is_null());
}

// ============================================================================
// Input validation
// ============================================================================

#[tokio::test]
async fn test_invalid_address_page_is_rejected_without_upstream_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph");
            then.status(200).json_body(json!({ "data": {} }));
        })
        .await;

    let (status, content_type, body) = get(app(server.url("/subgraph")), "/bond/not-an-address").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("ERROR: Given id could not be formatted to Ethereum Address"));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_invalid_address_api_returns_json_error() {
    let (status, _, body) = get(app("http://127.0.0.1:1/subgraph".to_string()), "/api/v1/accounts/0x1234").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"]["code"], "INVALID_ADDRESS");
}

#[tokio::test]
async fn test_token_page_size_is_validated() {
    let (status, _, body) = get(app("http://127.0.0.1:1/subgraph".to_string()), "/api/v1/tokens?first=0").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_token_order_field_is_validated() {
    let (status, _, body) = get(
        app("http://127.0.0.1:1/subgraph".to_string()),
        "/api/v1/tokens?order_by=price",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"]["code"], "INVALID_QUERY");
    assert_eq!(error["error"]["message"], "Invalid query: price not a field");
}

#[tokio::test]
async fn test_malformed_token_query_returns_json_error() {
    for uri in ["/api/v1/tokens?direction=up", "/api/v1/tokens?first=abc"] {
        let (status, content_type, body) =
            get(app("http://127.0.0.1:1/subgraph".to_string()), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(content_type.starts_with("application/json"), "{}", uri);
        let error: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    }
}

// ============================================================================
// Upstream failures
// ============================================================================

#[tokio::test]
async fn test_missing_bond_is_not_found_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("bond(id:");
            then.status(200).json_body(json!({ "data": { "bond": null } }));
        })
        .await;

    let (status, _, body) = get(app(server.url("/subgraph")), &format!("/bond/{}", BOND)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(&format!("ERROR: Bond({}) not found", BOND_CHECKSUM)));
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph");
            then.status(500).body("indexer exploded");
        })
        .await;

    let (status, _, body) = get(app(server.url("/subgraph")), "/api/v1/bonds").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"]["code"], "SUBGRAPH_ERROR");
    assert!(!body.contains("indexer exploded"));
}

#[tokio::test]
async fn test_graphql_errors_render_error_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph");
            then.status(200)
                .json_body(json!({ "errors": [{ "message": "indexing_error" }] }));
        })
        .await;

    let (status, _, body) = get(app(server.url("/subgraph")), "/bonds").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("indexing_error"));
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_index_page_orders_accounts_by_balance_count() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("accounts(");
            then.status(200).json_body(json!({
                "data": {
                    "accounts": [
                        { "id": OTHER_ACCOUNT, "balances": [{ "id": "x" }] },
                        { "id": ACCOUNT, "balances": [{ "id": "y" }, { "id": "z" }] }
                    ]
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("tokens(");
            then.status(200).json_body(json!({
                "data": { "tokens": [token_json(WETH, "WETH")] }
            }));
        })
        .await;

    let (status, _, body) = get(app(server.url("/subgraph")), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Accounts with most different balances"));
    assert!(body.contains("Tokens with highest total supply"));
    assert!(body.contains("[\"WETH\"]"));

    let busiest = body.find("0xd6F3804860f1cCa51dAE87A714dDB1A1EC60a619\",").unwrap();
    let quieter = body.find("0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359\"").unwrap();
    assert!(busiest < quieter);
}

#[tokio::test]
async fn test_bond_page_renders_tranche_holders() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("bond(id:");
            then.status(200).json_body(json!({
                "data": {
                    "bond": {
                        "id": BOND,
                        "owners": [ACCOUNT],
                        "collateral": { "id": WETH },
                        "tranches": [{ "id": TRANCHE_A }, { "id": TRANCHE_B }],
                        "maturityDate": "1650000000",
                        "isMature": false,
                        "totalDebt": "1000000000000000000",
                        "totalCollateral": "2000000000000000000"
                    }
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("token(id:");
            then.status(200)
                .json_body(json!({ "data": { "token": token_json(WETH, "WETH") } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/subgraph")
                .body_contains("accountBalances(")
                .body_contains(TRANCHE_A);
            then.status(200).json_body(json!({
                "data": { "accountBalances": [balance_json(ACCOUNT, TRANCHE_A, "1500000000000000000")] }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/subgraph")
                .body_contains("accountBalances(")
                .body_contains(TRANCHE_B);
            then.status(200)
                .json_body(json!({ "data": { "accountBalances": [] } }));
        })
        .await;

    let (status, content_type, body) = get(app(server.url("/subgraph")), &format!("/bond/{}", BOND_CHECKSUM)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("Collateral: WETH"));
    assert!(body.contains("Total collateral: 2 WETH, total debt: 1"));
    assert!(body.contains("type: 'pie'"));
    assert!(body.contains("/account/0xd6F3804860f1cCa51dAE87A714dDB1A1EC60a619"));
    assert!(body.contains("No owners found to tranche"));
    assert!(body.contains("[1.5]"));
}

#[tokio::test]
async fn test_account_page_reports_missing_balance_inline() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("account(id:");
            then.status(200).json_body(json!({
                "data": {
                    "account": {
                        "id": ACCOUNT,
                        "balances": [
                            { "id": format!("{}-{}", ACCOUNT, TRANCHE_A) },
                            { "id": format!("{}-{}", ACCOUNT, TRANCHE_B) }
                        ]
                    }
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/subgraph")
                .body_contains("accountBalance(id:")
                .body_contains(TRANCHE_A);
            then.status(200).json_body(json!({
                "data": { "accountBalance": balance_json(ACCOUNT, TRANCHE_A, "1500000000000000000") }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/subgraph")
                .body_contains("accountBalance(id:")
                .body_contains(TRANCHE_B);
            then.status(200)
                .json_body(json!({ "data": { "accountBalance": null } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("tranche(id:");
            then.status(200).json_body(json!({
                "data": {
                    "tranche": {
                        "id": TRANCHE_A,
                        "bond": { "id": BOND },
                        "token": { "id": TRANCHE_A },
                        "ratio": "200",
                        "index": 0,
                        "totalCollateral": "0"
                    }
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("token(id:");
            then.status(200)
                .json_body(json!({ "data": { "token": token_json(TRANCHE_A, "TRANCHE-A") } }));
        })
        .await;

    let (status, _, body) = get(app(server.url("/subgraph")), &format!("/account/{}", ACCOUNT)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("AccountBalance 0:"));
    assert!(body.contains("Token: TRANCHE-A"));
    assert!(body.contains("Amount: 1.5"));
    assert!(body.contains(&format!(
        "No accountBalance found for id: {}-{}",
        ACCOUNT, TRANCHE_B
    )));
}

#[tokio::test]
async fn test_tranche_holders_api() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("tranche(id:");
            then.status(200).json_body(json!({
                "data": {
                    "tranche": {
                        "id": TRANCHE_A,
                        "bond": { "id": BOND },
                        "token": { "id": TRANCHE_A },
                        "ratio": "200",
                        "index": 0,
                        "totalCollateral": "0"
                    }
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/subgraph").body_contains("token(id:");
            then.status(200)
                .json_body(json!({ "data": { "token": token_json(TRANCHE_A, "TRANCHE-A") } }));
        })
        .await;
    let holders_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/subgraph")
                .body_contains("accountBalances(first: 1000, orderBy: amount, orderDirection: desc");
            then.status(200).json_body(json!({
                "data": {
                    "accountBalances": [
                        balance_json(ACCOUNT, TRANCHE_A, "3000000000000000000"),
                        balance_json(OTHER_ACCOUNT, TRANCHE_A, "1000000000000000000")
                    ]
                }
            }));
        })
        .await;

    let (status, _, body) = get(
        app(server.url("/subgraph")),
        &format!("/api/v1/tranches/{}/holders", TRANCHE_A),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    holders_mock.assert_async().await;
    let holders: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(holders.as_array().unwrap().len(), 2);
    assert_eq!(holders[0]["account"], "0xd6F3804860f1cCa51dAE87A714dDB1A1EC60a619");
    assert_eq!(holders[0]["amount"], "3");
    assert_eq!(holders[0]["balance"], "3000000000000000000");
}

//! HTTP API server and dashboard page
//!
//! Routes are organized into modules:
//! - routes::transactions: transaction query endpoint, summary, dashboard page
//! - routes::settings: configuration display

pub mod error;
pub mod routes;

use axum::{http::Uri, routing::get, Router};
use paydash_config::Config;
use paydash_core::{CoreError, CoreResult, SortSpec, SourceRef};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub source: SourceRef,
    /// Parsed `dashboard.default_sort`
    pub default_sort: SortSpec,
}

impl AppState {
    /// Build state, checking the configured default sort
    pub fn new(config: Config, source: SourceRef) -> CoreResult<Self> {
        let default_sort = config
            .dashboard
            .default_sort
            .parse::<SortSpec>()
            .map_err(|e| {
                let allowed = match e {
                    CoreError::InvalidParameter { allowed, .. } => allowed.join(", "),
                    _ => String::new(),
                };
                CoreError::ConfigError {
                    message: format!(
                        "dashboard.default_sort {:?} is not a sortable field. Use one of: {}, prefixed with '-' for descending.",
                        config.dashboard.default_sort, allowed
                    ),
                }
            })?;

        Ok(Self {
            config,
            source,
            default_sort,
        })
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::settings::api_settings;
    use routes::transactions::{api_summary, api_transactions, page_dashboard};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/summary", get(api_summary))
        .route("/api/settings", get(api_settings))
        // Page routes
        .route("/", get(page_dashboard))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        resource: uri.path().to_string(),
    }
}

/// Bind the configured address and serve until the server stops
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = state.config.bind_address();
    log::info!("Serving transactions from {}", state.source.describe());

    let router = create_router(state);
    let listener = TcpListener::bind(&addr).await?;

    log::info!("Starting Paydash server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /api/transactions?q=&status=&method=&sort=");
    log::info!("  - /api/summary?q=&status=&method=&sort=");
    log::info!("  - /api/settings, /api/health");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use paydash_core::{
        FixedTransactionSource, PaymentMethod, SortField, Transaction, TransactionStatus,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn record(id: &str, name: &str, amount: u64, status: TransactionStatus, hour: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount_in_paise: amount,
            currency: "INR".to_string(),
            customer_name: name.to_string(),
            method: PaymentMethod::Card,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap(),
            status,
        }
    }

    fn test_state() -> AppState {
        let items = vec![
            record("txn_100000", "Aarav Sharma", 500, TransactionStatus::Success, 9),
            record("txn_100001", "Diya Patel", 200, TransactionStatus::Failed, 10),
        ];
        AppState::new(Config::default(), Arc::new(FixedTransactionSource::new(items))).unwrap()
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = create_router(test_state())
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get_ids(uri: &str) -> Vec<String> {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        json["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_app_state_rejects_bad_default_sort() {
        let mut config = Config::default();
        config.dashboard.default_sort = "-status".to_string();
        let source: SourceRef = Arc::new(FixedTransactionSource::new(vec![]));
        let err = AppState::new(config, source).err().unwrap();
        assert!(matches!(err, CoreError::ConfigError { .. }));

        let details = err.to_details();
        assert!(details.message.contains("dashboard.default_sort"));
        assert!(details.suggestions[0].contains("amountInPaise"));
    }

    #[test]
    fn test_app_state_parses_default_sort() {
        let mut config = Config::default();
        config.dashboard.default_sort = "id".to_string();
        let source: SourceRef = Arc::new(FixedTransactionSource::new(vec![]));
        let state = AppState::new(config, source).unwrap();
        assert_eq!(state.default_sort, SortSpec::ascending(SortField::Id));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (status, body) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_transactions_default_sort_newest_first() {
        assert_eq!(get_ids("/api/transactions").await, vec!["txn_100001", "txn_100000"]);
    }

    #[tokio::test]
    async fn test_transactions_sort_by_amount_ascending() {
        assert_eq!(
            get_ids("/api/transactions?sort=amountInPaise").await,
            vec!["txn_100001", "txn_100000"]
        );
        assert_eq!(
            get_ids("/api/transactions?sort=-amountInPaise").await,
            vec!["txn_100000", "txn_100001"]
        );
    }

    #[tokio::test]
    async fn test_transactions_status_filter() {
        assert_eq!(get_ids("/api/transactions?status=failed").await, vec!["txn_100001"]);
    }

    #[tokio::test]
    async fn test_transactions_search() {
        assert_eq!(get_ids("/api/transactions?q=100000").await, vec!["txn_100000"]);
        assert_eq!(get_ids("/api/transactions?q=DIYA").await, vec!["txn_100001"]);
        assert!(get_ids("/api/transactions?q=nobody").await.is_empty());
    }

    #[tokio::test]
    async fn test_transactions_empty_params_are_ignored() {
        assert_eq!(
            get_ids("/api/transactions?q=&status=&method=&sort=").await,
            vec!["txn_100001", "txn_100000"]
        );
    }

    #[tokio::test]
    async fn test_transactions_item_shape() {
        let (_, body) = get("/api/transactions?status=success").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let item = &json["items"][0];
        assert_eq!(item["amountInPaise"], 500);
        assert_eq!(item["currency"], "INR");
        assert_eq!(item["customerName"], "Aarav Sharma");
        assert_eq!(item["method"], "card");
        assert_eq!(item["createdAt"], "2024-03-01T09:00:00.000Z");
    }

    #[tokio::test]
    async fn test_transactions_rejects_unknown_values() {
        for uri in [
            "/api/transactions?status=refunded",
            "/api/transactions?method=cash",
            "/api/transactions?sort=-currency",
        ] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["success"], false);
            assert_eq!(json["error"]["code"], "INVALID_PARAMETER");
        }
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let (status, body) = get("/api/summary").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["totalCount"], 2);
        assert_eq!(json["totalAmountInPaise"], 700);
        assert_eq!(json["totalAmountDisplay"], "₹7");
        assert_eq!(json["byStatus"]["failed"], 1);

        let (_, body) = get("/api/summary?status=success").await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["totalAmountInPaise"], 500);

        let (status, _) = get("/api/summary?method=cheque").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_settings_endpoint() {
        let (status, body) = get("/api/settings").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["server"]["port"], 8081);
        assert_eq!(json["dashboard"]["default_sort"], "-createdAt");
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (status, body) = get("/?status=failed").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("txn_100001"));
        assert!(!body.contains("txn_100000"));
        assert!(body.contains("₹2"));
    }

    #[tokio::test]
    async fn test_dashboard_page_invalid_params() {
        let (status, body) = get("/?sort=bogus").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid value for &#39;sort&#39;"));
    }

    #[tokio::test]
    async fn test_dashboard_page_invalid_params_keeps_form() {
        let (status, body) = get("/?q=diya&status=bogus&method=upi").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Invalid value for &#39;status&#39;"));
        assert!(body.contains("name='q' value='diya'"));
        assert!(body.contains("<option value='upi' selected>UPI</option>"));
        assert!(body.contains("<option value='' selected>All Status</option>"));
    }

    #[tokio::test]
    async fn test_search_leading_space_matches_nothing() {
        assert!(get_ids("/api/transactions?q=%20aarav").await.is_empty());
        assert_eq!(get_ids("/api/transactions?q=aarav").await, vec!["txn_100000"]);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, body) = get("/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("NOT_FOUND"));
    }
}

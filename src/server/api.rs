use crate::error::AppError;
use crate::models::{NormalizedSymbol, NotSupportedCryptos, SymbolStatistic};
use crate::server::AppState;
use crate::services::CryptoService;
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

impl AppError {
    /// HTTP status a failure maps to at the request boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedSymbol(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::FileNotFound(_) | AppError::EmptyResultSet(_) => StatusCode::NOT_FOUND,
            AppError::DivisionByZero(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Parse(_) | AppError::Overflow(_) | AppError::Io(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            warn!(kind = self.kind(), error = %self, "Request rejected");
        }

        (
            status,
            Json(serde_json::json!({
                "error": self.to_string(),
                "kind": self.kind(),
            })),
        )
            .into_response()
    }
}

/// Run a blocking service call off the async runtime
async fn run_blocking<T, F>(service: CryptoService, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&CryptoService) -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| AppError::Io(format!("Worker task failed: {}", e)))?
}

/// Query parameters for /api/v1/crypto/maxNormalizedRange
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Calendar day, YYYY-MM-DD
    pub date: NaiveDate,
}

/// GET /api/v1/crypto - Supported cryptos ranked by normalized range, highest first
#[instrument(skip(app_state))]
pub async fn list_normalized_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<NormalizedSymbol>>, AppError> {
    let ranked = run_blocking(app_state.service, |s| s.list_normalized_symbols()).await?;
    info!(count = ranked.len(), "Returning normalized ranking");
    Ok(Json(ranked))
}

/// GET /api/v1/crypto/maxNormalizedRange?date=2022-01-04
#[instrument(skip(app_state))]
pub async fn max_normalized_range_handler(
    State(app_state): State<AppState>,
    Query(params): Query<DateQuery>,
) -> Result<Json<NormalizedSymbol>, AppError> {
    let date = params.date;
    let best = run_blocking(app_state.service, move |s| s.max_normalized_symbol_for_date(date)).await?;
    info!(%date, name = %best.name, range = %best.normalized_range, "Returning max normalized range");
    Ok(Json(best))
}

/// GET /api/v1/crypto/statistic/{cryptoName}
#[instrument(skip(app_state))]
pub async fn statistic_handler(
    State(app_state): State<AppState>,
    Path(crypto_name): Path<String>,
) -> Result<Json<SymbolStatistic>, AppError> {
    let stat = run_blocking(app_state.service, move |s| s.statistic_for_symbol(&crypto_name)).await?;
    debug!(name = %stat.name, "Returning statistic");
    Ok(Json(stat))
}

/// GET /api/v1/crypto/statistic - One statistic per supported crypto
#[instrument(skip(app_state))]
pub async fn all_statistics_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<SymbolStatistic>>, AppError> {
    let stats = run_blocking(app_state.service, |s| s.all_statistics()).await?;
    info!(count = stats.len(), "Returning statistics");
    Ok(Json(stats))
}

/// GET /api/v1/crypto/notSupported
#[instrument(skip(app_state))]
pub async fn list_not_supported_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let symbols = run_blocking(app_state.service, |s| s.list_excluded_symbols()).await?;
    Ok(Json(symbols))
}

/// POST /api/v1/crypto/notSupported - Replace the whole exclusion list
#[instrument(skip(app_state))]
pub async fn replace_not_supported_handler(
    State(app_state): State<AppState>,
    Json(body): Json<NotSupportedCryptos>,
) -> Result<StatusCode, AppError> {
    let symbols = body.not_supported_cryptos.unwrap_or_default();
    run_blocking(app_state.service, move |s| s.add_excluded_symbols(symbols)).await?;
    Ok(StatusCode::OK)
}

/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::router;
    use crate::services::FilePriceStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Method, Request};
    use serde_json::Value;
    use std::fs;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    /// Data directory with BTC, ETH and XRP files plus an empty exclusion list
    fn fixture() -> (TempDir, AppState) {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("statistic");
        fs::create_dir(&data_dir).unwrap();

        // 2022-01-01 00:00, 2022-01-01 12:00, 2022-01-02 00:00 UTC
        fs::write(
            data_dir.join("BTC_values.csv"),
            "timestamp,symbol,price\n\
             1640995200000,BTC,100\n\
             1641038400000,BTC,300\n\
             1641081600000,BTC,200\n",
        )
        .unwrap();
        fs::write(
            data_dir.join("ETH_values.csv"),
            "timestamp,symbol,price\n\
             1640995200000,ETH,10\n\
             1641038400000,ETH,14\n\
             1641081600000,ETH,40\n",
        )
        .unwrap();
        fs::write(
            data_dir.join("XRP_values.csv"),
            "timestamp,symbol,price\n\
             1640995200000,XRP,0.8\n\
             1641038400000,XRP,1.0\n",
        )
        .unwrap();

        let not_supported = dir.path().join("not-supported-cryptos.csv");
        fs::write(&not_supported, "").unwrap();

        let store = FilePriceStore::new(data_dir, not_supported);
        let service = CryptoService::new(Arc::new(store), chrono_tz::UTC);
        (dir, AppState::new(service))
    }

    async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_list_normalized() {
        let (_dir, state) = fixture();

        let (status, json) = send(&state, Method::GET, "/api/v1/crypto", None).await;
        assert_eq!(status, StatusCode::OK);

        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["ETH", "BTC", "XRP"]);
        assert_eq!(json[0]["normalizedRange"], 3.0);
        assert_eq!(json[1]["normalizedRange"], 2.0);
        assert_eq!(json[2]["normalizedRange"], 0.25);
    }

    #[tokio::test]
    async fn test_max_normalized_range_for_date() {
        let (_dir, state) = fixture();

        let (status, json) = send(
            &state,
            Method::GET,
            "/api/v1/crypto/maxNormalizedRange?date=2022-01-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "BTC");
        assert_eq!(json["normalizedRange"], 2.0);
    }

    #[tokio::test]
    async fn test_max_normalized_range_without_data() {
        let (_dir, state) = fixture();

        let (status, json) = send(
            &state,
            Method::GET,
            "/api/v1/crypto/maxNormalizedRange?date=2023-06-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["kind"], "empty_result_set");
    }

    #[tokio::test]
    async fn test_max_normalized_range_bad_date() {
        let (_dir, state) = fixture();

        let (status, _) = send(
            &state,
            Method::GET,
            "/api/v1/crypto/maxNormalizedRange?date=01-01-2022",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_statistic_for_symbol() {
        let (_dir, state) = fixture();

        let (status, json) = send(&state, Method::GET, "/api/v1/crypto/statistic/btc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["name"], "BTC");
        assert_eq!(json["oldest"], 100.0);
        assert_eq!(json["newest"], 200.0);
        assert_eq!(json["min"], 100.0);
        assert_eq!(json["max"], 300.0);
    }

    #[tokio::test]
    async fn test_statistic_for_unknown_symbol() {
        let (_dir, state) = fixture();

        let (status, json) = send(&state, Method::GET, "/api/v1/crypto/statistic/LTC", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["kind"], "file_not_found");
    }

    #[tokio::test]
    async fn test_exclusion_flow() {
        let (_dir, state) = fixture();

        let (status, json) = send(
            &state,
            Method::POST,
            "/api/v1/crypto/notSupported",
            Some(serde_json::json!({ "notSupportedCryptos": ["eth", "xrp"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, Value::Null);

        let (_, json) = send(&state, Method::GET, "/api/v1/crypto/notSupported", None).await;
        assert_eq!(json, serde_json::json!(["ETH", "XRP"]));

        let (status, json) = send(&state, Method::GET, "/api/v1/crypto/statistic/ETH", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["kind"], "unsupported_symbol");

        let (_, json) = send(&state, Method::GET, "/api/v1/crypto/statistic", None).await;
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["BTC"]);

        let (_, json) = send(&state, Method::GET, "/api/v1/crypto", None).await;
        assert_eq!(json.as_array().unwrap().len(), 1);

        // Posting a new list replaces the old one
        send(
            &state,
            Method::POST,
            "/api/v1/crypto/notSupported",
            Some(serde_json::json!({ "notSupportedCryptos": [] })),
        )
        .await;
        let (_, json) = send(&state, Method::GET, "/api/v1/crypto/notSupported", None).await;
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_all_statistics() {
        let (_dir, state) = fixture();

        let (status, json) = send(&state, Method::GET, "/api/v1/crypto/statistic", None).await;
        assert_eq!(status, StatusCode::OK);

        let stats = json.as_array().unwrap();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[1]["name"], "ETH");
        assert_eq!(stats[1]["oldest"], 10.0);
        assert_eq!(stats[1]["newest"], 40.0);
    }

    #[tokio::test]
    async fn test_malformed_file_fails_listing() {
        let (dir, state) = fixture();
        fs::write(
            dir.path().join("statistic").join("BAD_values.csv"),
            "timestamp,symbol,price\nnot-a-time,BAD,1\n",
        )
        .unwrap();

        let (status, json) = send(&state, Method::GET, "/api/v1/crypto/statistic", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["kind"], "parse_error");
    }

    #[tokio::test]
    async fn test_health() {
        let (_dir, state) = fixture();
        let (status, json) = send(&state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::UnsupportedSymbol("BTC".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::EmptyResultSet("none".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::DivisionByZero("min".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Overflow("max / min".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Io("disk".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

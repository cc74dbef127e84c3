//! HTTP request handlers for the payroll summary API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregation::aggregate;
use crate::error::EngineError;
use crate::ingest::{ExportFormat, read_export};
use crate::models::{AggregationResult, PayRecord};
use crate::report::render_html;

use super::request::{RecordsUpload, ReportQuery, UploadQuery};
use super::response::{ApiError, ApiErrorResponse, TablesResponse, UploadResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(upload_export_handler))
        .route("/records", post(upload_records_handler))
        .route("/tables", get(tables_handler))
        .route("/summary", get(summary_handler))
        .route("/report", get(report_handler))
        .with_state(state)
}

/// Handler for POST /upload endpoint.
///
/// Accepts an `.xlsx` or CSV payroll export as the raw request body and
/// replaces the target table with its records. The format follows the
/// `filename` extension.
async fn upload_export_handler(
    State(state): State<AppState>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export upload");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_error(correlation_id, rejection),
    };

    let Some(format) = ExportFormat::from_filename(&query.filename) else {
        warn!(
            correlation_id = %correlation_id,
            filename = %query.filename,
            "Rejected upload with unsupported file type"
        );
        return ApiErrorResponse::bad_request(ApiError::unsupported_file(&query.filename))
            .into_response();
    };

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Upload body could not be read"
            );
            return (
                rejection.status(),
                Json(ApiError::unreadable_body(body_text)),
            )
                .into_response();
        }
    };

    if body.iter().all(u8::is_ascii_whitespace) {
        warn!(correlation_id = %correlation_id, "Rejected empty upload");
        return ApiErrorResponse::bad_request(ApiError::empty_upload()).into_response();
    }

    match read_export(&body, format) {
        Ok(records) => {
            replace_table(&state, correlation_id, &query.table, Some(format), records).await
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /records endpoint.
///
/// Accepts pay records as JSON and replaces the target table with them.
async fn upload_records_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordsUpload>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing JSON record upload");

    // Handle JSON parsing errors
    let upload = match payload {
        Ok(Json(upload)) => upload,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return ApiErrorResponse::bad_request(error).into_response();
        }
    };

    let records: Vec<PayRecord> = upload.records.into_iter().map(Into::into).collect();
    for (position, record) in records.iter().enumerate() {
        if let Err(err) = record.validate(position + 1) {
            return engine_error(correlation_id, err);
        }
    }

    replace_table(&state, correlation_id, &upload.table, None, records).await
}

/// Handler for GET /tables endpoint.
///
/// Lists the stored tables with their record counts.
async fn tables_handler(State(state): State<AppState>) -> Response {
    let tables = state.store().read().await.tables();
    (StatusCode::OK, Json(TablesResponse { tables })).into_response()
}

/// Handler for GET /summary endpoint.
///
/// Returns the aggregation result, totals and audit trace as JSON.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_error(correlation_id, rejection),
    };

    match run_report(&state, &query, correlation_id).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /report endpoint.
///
/// Returns the filterable HTML report.
async fn report_handler(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing HTML report request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_error(correlation_id, rejection),
    };

    match run_report(&state, &query, correlation_id).await {
        Ok(result) => {
            let html = render_html(&result.rows, state.config().report_settings());
            (StatusCode::OK, Html(html)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Aggregates the requested table as of the requested (or current) date.
async fn run_report(
    state: &AppState,
    query: &ReportQuery,
    correlation_id: Uuid,
) -> Result<AggregationResult, EngineError> {
    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let table = query.table();

    let store = state.store().read().await;
    let records = store.records(table)?;

    let start_time = Instant::now();
    let result = aggregate(records, as_of, &state.config().policy())?;
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        table = %table,
        as_of = %as_of,
        raw_records = result.totals.raw_records,
        employees_included = result.totals.employees_included,
        employees_excluded = result.totals.employees_excluded,
        duration_us = duration.as_micros(),
        "Aggregation completed successfully"
    );

    Ok(result)
}

async fn replace_table(
    state: &AppState,
    correlation_id: Uuid,
    table: &str,
    format: Option<ExportFormat>,
    records: Vec<PayRecord>,
) -> Response {
    let count = records.len();
    let replaced = state.store().write().await.replace_table(table, records);

    info!(
        correlation_id = %correlation_id,
        table = %table,
        format = ?format,
        records = count,
        replaced = ?replaced,
        "Record table replaced"
    );

    (
        StatusCode::OK,
        Json(UploadResponse {
            table: table.to_string(),
            format,
            records: count,
            replaced,
        }),
    )
        .into_response()
}

fn query_error(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text)).into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    api_error.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/payroll.yaml").expect("Failed to load config");
        AppState::new(config)
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    fn csv_upload(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "text/csv")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    const EXPORT: &str = "Employee_Name,Pay_Date,Week_1,Week_2,Store_Name\n\
                          Jane Doe,2026-10-09,10,5,main st\n\
                          Jane Doe,2026-10-09,2,0,main st\n";

    #[tokio::test]
    async fn test_upload_then_summary() {
        let state = create_test_state();

        let (status, body) = send(
            create_router(state.clone()),
            csv_upload("/upload?filename=october.csv", EXPORT),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ack: UploadResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(ack.table, "payroll");
        assert_eq!(ack.format, Some(ExportFormat::Csv));
        assert_eq!(ack.records, 2);

        let (status, body) = send(
            create_router(state),
            Request::builder()
                .uri("/summary?as_of=2026-10-18")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let result: AggregationResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].summary.ytd_hours.to_string(), "17.00");
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_filename() {
        let (status, body) = send(
            create_router(create_test_state()),
            csv_upload("/upload?filename=october.xls", EXPORT),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "UNSUPPORTED_FILE");
    }

    #[tokio::test]
    async fn test_upload_with_invalid_utf8_returns_json_error() {
        let mut body = EXPORT.as_bytes().to_vec();
        body.extend_from_slice(b"\xff\xfe Doe,2026-10-09,1,1,main st\n");

        let (status, body) = send(
            create_router(create_test_state()),
            Request::builder()
                .method("POST")
                .uri("/upload?filename=october.csv")
                .header("Content-Type", "text/csv")
                .body(Body::from(body))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_RECORD");
        assert!(error.message.contains("row 3"));
    }

    #[tokio::test]
    async fn test_tables_lists_uploads() {
        let state = create_test_state();

        let (_, body) = send(
            create_router(state.clone()),
            Request::builder().uri("/tables").body(Body::empty()).unwrap(),
        )
        .await;
        let listing: TablesResponse = serde_json::from_slice(&body).unwrap();
        assert!(listing.tables.is_empty());

        send(
            create_router(state.clone()),
            csv_upload("/upload?table=north&filename=north.csv", EXPORT),
        )
        .await;

        let (status, body) = send(
            create_router(state),
            Request::builder().uri("/tables").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let listing: TablesResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(listing.tables.len(), 1);
        assert_eq!(listing.tables[0].name, "north");
        assert_eq!(listing.tables[0].records, 2);
    }

    #[tokio::test]
    async fn test_upload_requires_filename() {
        let (status, body) = send(
            create_router(create_test_state()),
            csv_upload("/upload", EXPORT),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_body() {
        let (status, body) = send(
            create_router(create_test_state()),
            csv_upload("/upload?filename=october.csv", "  \n"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "EMPTY_UPLOAD");
    }

    #[tokio::test]
    async fn test_summary_for_unknown_table_returns_404() {
        let (status, body) = send(
            create_router(create_test_state()),
            Request::builder()
                .uri("/summary?table=archive&as_of=2026-10-18")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "TABLE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_summary_rejects_bad_as_of() {
        let (status, _) = send(
            create_router(create_test_state()),
            Request::builder()
                .uri("/summary?as_of=yesterday")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

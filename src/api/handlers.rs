//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::{PAYROLL_ROLE, has_permission, role_from_headers};
use crate::engine::PayrollEngine;
use crate::error::EngineResult;
use crate::models::{PayrollCalculation, PayrollInput};

use super::request::{PreviewRequest, ProcessRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/payroll/preview", post(preview_handler))
        .route("/payroll/process", post(process_handler))
        .with_state(state)
}

/// Handler for GET /health.
async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// Handler for POST /payroll/preview.
///
/// Computes payroll for a salary supplied in the request body.
async fn preview_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll preview request");

    if let Err(response) = authorize(&headers, correlation_id) {
        return response;
    }

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let input: PayrollInput = request.into();
    run_engine(state, correlation_id, move |engine| engine.preview(&input)).await
}

/// Handler for POST /payroll/process.
///
/// Computes payroll for an employee from their stored salary.
async fn process_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run request");

    if let Err(response) = authorize(&headers, correlation_id) {
        return response;
    }

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    run_engine(state, correlation_id, move |engine| {
        engine.calculate(
            &request.employee_id,
            &request.period_id,
            request.working_days,
            request.days_worked,
        )
    })
    .await
}

/// Runs an engine call on the blocking pool.
///
/// Repositories may read files or databases synchronously.
async fn run_engine<F>(state: AppState, correlation_id: Uuid, call: F) -> Response
where
    F: FnOnce(&PayrollEngine) -> EngineResult<PayrollCalculation> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || call(state.engine())).await {
        Ok(result) => calculation_response(result, correlation_id),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation task failed"
            );
            ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CALCULATION_ERROR", "Calculation failed"),
            )
            .into_response()
        }
    }
}

fn authorize(headers: &HeaderMap, correlation_id: Uuid) -> Result<(), Response> {
    let role = role_from_headers(headers);
    if has_permission(role, PAYROLL_ROLE) {
        return Ok(());
    }

    warn!(
        correlation_id = %correlation_id,
        role = %role,
        required = %PAYROLL_ROLE,
        "Insufficient role for payroll request"
    );
    Err(ApiErrorResponse::new(StatusCode::FORBIDDEN, ApiError::forbidden(role, PAYROLL_ROLE))
        .into_response())
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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

    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

fn calculation_response(
    result: EngineResult<PayrollCalculation>,
    correlation_id: Uuid,
) -> Response {
    match result {
        Ok(calculation) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %calculation.calculation_id,
                gross_salary = %calculation.result.gross_salary,
                net_salary = %calculation.result.net_salary,
                warnings = calculation.audit_trace.warnings.len(),
                duration_us = calculation.audit_trace.duration_us,
                "Calculation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(calculation),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

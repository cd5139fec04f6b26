//! Base fee rule REST API handlers (administrative surface)
//!
//! Every successful write invalidates the resolver's default-fee memo.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::super::AppState;
use super::dto::{BaseFeeRuleRequest, BaseFeeRuleResponse};
use crate::domain::{BaseFeeRule, BaseFeeRuleRepository, City, VehicleType};
use crate::interfaces::http::common::{ApiResponse, EmptyData, ValidatedJson};

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(message.into())),
    )
}

fn internal_error(e: impl std::fmt::Display) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(e.to_string())),
    )
}

fn not_found(id: i32) -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error(format!("Base fee rule {} not found", id))),
    )
}

/// Parse and validate the request body into a domain rule.
fn to_domain_rule(id: i32, req: BaseFeeRuleRequest) -> Result<BaseFeeRule, HandlerError> {
    let city: City = req.city.parse().map_err(bad_request)?;
    let vehicle_type: VehicleType = req.vehicle_type.parse().map_err(bad_request)?;

    let now = Utc::now();
    let rule = BaseFeeRule {
        id,
        city,
        vehicle_type,
        fee: req.fee,
        valid_from: req.valid_from,
        valid_to: req.valid_to,
        created_at: now,
        updated_at: now,
    };
    rule.validate().map_err(bad_request)?;
    Ok(rule)
}

#[utoipa::path(
    get,
    path = "/api/v1/rules/base-fees",
    tag = "Base Fee Rules",
    responses(
        (status = 200, description = "Rule list", body = ApiResponse<Vec<BaseFeeRuleResponse>>)
    )
)]
pub async fn list_base_fee_rules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BaseFeeRuleResponse>>>, HandlerError> {
    let rules = state.repos.base_fees().find_all().await.map_err(internal_error)?;
    let responses: Vec<BaseFeeRuleResponse> = rules.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rules/base-fees/{id}",
    tag = "Base Fee Rules",
    params(("id" = i32, Path, description = "Rule ID")),
    responses(
        (status = 200, description = "Rule details", body = ApiResponse<BaseFeeRuleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_base_fee_rule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BaseFeeRuleResponse>>, HandlerError> {
    match state.repos.base_fees().find_by_id(id).await.map_err(internal_error)? {
        Some(rule) => Ok(Json(ApiResponse::success(rule.into()))),
        None => Err(not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/rules/base-fees",
    tag = "Base Fee Rules",
    request_body = BaseFeeRuleRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<BaseFeeRuleResponse>),
        (status = 400, description = "Invalid rule")
    )
)]
pub async fn create_base_fee_rule(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<BaseFeeRuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BaseFeeRuleResponse>>), HandlerError> {
    let rule = to_domain_rule(0, req)?;
    let saved = state.repos.base_fees().save(rule).await.map_err(internal_error)?;
    state.resolver.invalidate_defaults();

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(saved.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/rules/base-fees/{id}",
    tag = "Base Fee Rules",
    params(("id" = i32, Path, description = "Rule ID")),
    request_body = BaseFeeRuleRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<BaseFeeRuleResponse>),
        (status = 400, description = "Invalid rule"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_base_fee_rule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<BaseFeeRuleRequest>,
) -> Result<Json<ApiResponse<BaseFeeRuleResponse>>, HandlerError> {
    if state
        .repos
        .base_fees()
        .find_by_id(id)
        .await
        .map_err(internal_error)?
        .is_none()
    {
        return Err(not_found(id));
    }

    let rule = to_domain_rule(id, req)?;
    state.repos.base_fees().update(rule.clone()).await.map_err(internal_error)?;
    state.resolver.invalidate_defaults();

    Ok(Json(ApiResponse::success(rule.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rules/base-fees/{id}",
    tag = "Base Fee Rules",
    params(("id" = i32, Path, description = "Rule ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_base_fee_rule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmptyData>>, HandlerError> {
    match state.repos.base_fees().delete(id).await {
        Ok(()) => {
            state.resolver.invalidate_defaults();
            Ok(Json(ApiResponse::success(EmptyData {})))
        }
        Err(crate::domain::DomainError::NotFound { .. }) => Err(not_found(id)),
        Err(e) => Err(internal_error(e)),
    }
}

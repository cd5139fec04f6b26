//! Extra fee rule REST API handlers (administrative surface)
//!
//! Every successful write invalidates the resolver's default-fee memo.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::super::AppState;
use super::dto::{ExtraFeeRuleRequest, ExtraFeeRuleResponse};
use crate::domain::{
    ExtraFeeRule, ExtraFeeRuleRepository, FeeKind, PhenomenonCategory, VehicleType,
};
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
        Json(ApiResponse::error(format!("Extra fee rule {} not found", id))),
    )
}

fn to_domain_rule(id: i32, req: ExtraFeeRuleRequest) -> Result<ExtraFeeRule, HandlerError> {
    let kind: FeeKind = req.fee_kind.parse().map_err(bad_request)?;
    let vehicle_type: VehicleType = req.vehicle_type.parse().map_err(bad_request)?;
    let phenomenon_category: Option<PhenomenonCategory> = req
        .phenomenon_category
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(bad_request)?;

    let now = Utc::now();
    let rule = ExtraFeeRule {
        id,
        kind,
        vehicle_type,
        min_value: req.min_value,
        max_value: req.max_value,
        phenomenon_category,
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
    path = "/api/v1/rules/extra-fees",
    tag = "Extra Fee Rules",
    responses(
        (status = 200, description = "Rule list", body = ApiResponse<Vec<ExtraFeeRuleResponse>>)
    )
)]
pub async fn list_extra_fee_rules(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ExtraFeeRuleResponse>>>, HandlerError> {
    let rules = state.repos.extra_fees().find_all().await.map_err(internal_error)?;
    let responses: Vec<ExtraFeeRuleResponse> = rules.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rules/extra-fees/{id}",
    tag = "Extra Fee Rules",
    params(("id" = i32, Path, description = "Rule ID")),
    responses(
        (status = 200, description = "Rule details", body = ApiResponse<ExtraFeeRuleResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_extra_fee_rule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ExtraFeeRuleResponse>>, HandlerError> {
    match state.repos.extra_fees().find_by_id(id).await.map_err(internal_error)? {
        Some(rule) => Ok(Json(ApiResponse::success(rule.into()))),
        None => Err(not_found(id)),
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/rules/extra-fees",
    tag = "Extra Fee Rules",
    request_body = ExtraFeeRuleRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<ExtraFeeRuleResponse>),
        (status = 400, description = "Invalid rule")
    )
)]
pub async fn create_extra_fee_rule(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ExtraFeeRuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExtraFeeRuleResponse>>), HandlerError> {
    let rule = to_domain_rule(0, req)?;
    let saved = state.repos.extra_fees().save(rule).await.map_err(internal_error)?;
    state.resolver.invalidate_defaults();

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(saved.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/rules/extra-fees/{id}",
    tag = "Extra Fee Rules",
    params(("id" = i32, Path, description = "Rule ID")),
    request_body = ExtraFeeRuleRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<ExtraFeeRuleResponse>),
        (status = 400, description = "Invalid rule"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_extra_fee_rule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<ExtraFeeRuleRequest>,
) -> Result<Json<ApiResponse<ExtraFeeRuleResponse>>, HandlerError> {
    if state
        .repos
        .extra_fees()
        .find_by_id(id)
        .await
        .map_err(internal_error)?
        .is_none()
    {
        return Err(not_found(id));
    }

    let rule = to_domain_rule(id, req)?;
    state.repos.extra_fees().update(rule.clone()).await.map_err(internal_error)?;
    state.resolver.invalidate_defaults();

    Ok(Json(ApiResponse::success(rule.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rules/extra-fees/{id}",
    tag = "Extra Fee Rules",
    params(("id" = i32, Path, description = "Rule ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<EmptyData>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_extra_fee_rule(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmptyData>>, HandlerError> {
    match state.repos.extra_fees().delete(id).await {
        Ok(()) => {
            state.resolver.invalidate_defaults();
            Ok(Json(ApiResponse::success(EmptyData {})))
        }
        Err(crate::domain::DomainError::NotFound { .. }) => Err(not_found(id)),
        Err(e) => Err(internal_error(e)),
    }
}

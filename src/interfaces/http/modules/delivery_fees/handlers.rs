//! Delivery fee REST API handlers

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use super::super::AppState;
use super::dto::{QuoteRequestBody, QuoteResponse};
use crate::domain::{City, DeliveryFeeResult, QuoteRequest, VehicleType};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

type HandlerError = (StatusCode, Json<ApiResponse<()>>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(message.into())),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/delivery-fees/quote",
    tag = "Delivery Fees",
    request_body = QuoteRequestBody,
    responses(
        (status = 200, description = "Fee quoted", body = ApiResponse<QuoteResponse>),
        (status = 400, description = "Invalid request, vehicle forbidden, or weather unavailable")
    )
)]
pub async fn quote_delivery_fee(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<QuoteRequestBody>,
) -> Result<Json<ApiResponse<QuoteResponse>>, HandlerError> {
    let city: City = body.city.parse().map_err(bad_request)?;
    let vehicle_type: VehicleType = body.vehicle_type.parse().map_err(bad_request)?;

    let request = QuoteRequest {
        city,
        vehicle_type,
        timestamp: body.timestamp,
    };

    info!(%city, %vehicle_type, timestamp = ?body.timestamp, "Quote requested");

    let result = state.calculator.calculate(&request).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(format!("Failed to calculate fee: {}", e))),
        )
    })?;

    match result {
        DeliveryFeeResult::Refused(reason) => Err(bad_request(reason.to_string())),
        DeliveryFeeResult::Quoted { total, breakdown } => Ok(Json(ApiResponse::success(
            QuoteResponse {
                fee: total,
                breakdown: breakdown.into(),
            },
        ))),
    }
}

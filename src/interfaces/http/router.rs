//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{DeliveryFeeCalculator, FeeResolver};
use crate::domain::RepositoryProvider;

use super::modules::{base_fees, delivery_fees, extra_fees, health, AppState};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Delivery fees
        delivery_fees::handlers::quote_delivery_fee,
        // Base fee rules
        base_fees::handlers::list_base_fee_rules,
        base_fees::handlers::get_base_fee_rule,
        base_fees::handlers::create_base_fee_rule,
        base_fees::handlers::update_base_fee_rule,
        base_fees::handlers::delete_base_fee_rule,
        // Extra fee rules
        extra_fees::handlers::list_extra_fee_rules,
        extra_fees::handlers::get_extra_fee_rule,
        extra_fees::handlers::create_extra_fee_rule,
        extra_fees::handlers::update_extra_fee_rule,
        extra_fees::handlers::delete_extra_fee_rule,
    ),
    components(schemas(
        delivery_fees::dto::QuoteRequestBody,
        delivery_fees::dto::QuoteResponse,
        delivery_fees::dto::FeeBreakdownResponse,
        base_fees::dto::BaseFeeRuleRequest,
        base_fees::dto::BaseFeeRuleResponse,
        extra_fees::dto::ExtraFeeRuleRequest,
        extra_fees::dto::ExtraFeeRuleResponse,
        health::handlers::HealthResponse,
    )),
    tags(
        (name = "Delivery Fees", description = "Delivery fee quotes from city, vehicle and weather"),
        (name = "Base Fee Rules", description = "Time-versioned regional base fee management"),
        (name = "Extra Fee Rules", description = "Time-versioned weather extra fee management"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Delivery Fee Service API",
        description = "Courier delivery fee calculation based on regional base fees and weather conditions",
    )
)]
pub struct ApiDoc;

/// Build the API router with all routes and middleware.
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    resolver: Arc<FeeResolver>,
    calculator: Arc<DeliveryFeeCalculator>,
) -> Router {
    let state = AppState {
        repos,
        resolver,
        calculator,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health::handlers::health_check))
        .route(
            "/api/v1/delivery-fees/quote",
            post(delivery_fees::handlers::quote_delivery_fee),
        )
        .route(
            "/api/v1/rules/base-fees",
            get(base_fees::handlers::list_base_fee_rules)
                .post(base_fees::handlers::create_base_fee_rule),
        )
        .route(
            "/api/v1/rules/base-fees/{id}",
            get(base_fees::handlers::get_base_fee_rule)
                .put(base_fees::handlers::update_base_fee_rule)
                .delete(base_fees::handlers::delete_base_fee_rule),
        )
        .route(
            "/api/v1/rules/extra-fees",
            get(extra_fees::handlers::list_extra_fee_rules)
                .post(extra_fees::handlers::create_extra_fee_rule),
        )
        .route(
            "/api/v1/rules/extra-fees/{id}",
            get(extra_fees::handlers::get_extra_fee_rule)
                .put(extra_fees::handlers::update_extra_fee_rule)
                .delete(extra_fees::handlers::delete_extra_fee_rule),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Order placement and lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::extract::Payload;
use crate::state::AppState;
use shopfront_core::Order;
use shopfront_db::PlaceOrderRequest;

/// `POST /api/orders`
pub async fn place_order(
    State(state): State<AppState>,
    Payload(request): Payload<PlaceOrderRequest>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    let order = state.orders.place_order(&request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders/{id}`
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Order>> {
    state.db.orders().get_by_id(id).await?.map(Json).ok_or_else(|| {
        ApiError::new(
            ErrorCode::NotFound,
            format!("The searched Order with ID {}, could not be found", id),
        )
    })
}

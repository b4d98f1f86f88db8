//! Customer registration, login and lookup.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::extract::Payload;
use crate::state::AppState;
use shopfront_core::validation::{validate_customer_name, validate_email, validate_password};
use shopfront_core::Customer;
use shopfront_db::DbError;

const CLIENT_ID_HEADER: &str = "x-client-id";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomer {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/customers/register`
pub async fn register(
    State(state): State<AppState>,
    Payload(body): Payload<RegisterCustomer>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let name = body.name.trim();
    let email = body.email.trim();

    validate_customer_name(name)?;
    validate_email(email)?;
    validate_password(&body.password)?;

    let customers = state.db.customers();
    if customers.email_exists(email).await? {
        return Err(duplicate_email());
    }

    let customer = customers
        .register(name, email, &body.password)
        .await
        .map_err(|err| match err {
            DbError::UniqueViolation { .. } => duplicate_email(),
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(customer)))
}

/// `POST /api/customers/login`
///
/// Checks credentials only; no session or token is issued.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Payload(body): Payload<LoginRequest>,
) -> ApiResult<Json<Value>> {
    let client_id = headers
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::validation("Missing X-Client-ID header, Client Unauthorized"))?;

    let customer = state
        .db
        .customers()
        .verify_credentials(body.email.trim(), &body.password)
        .await?;

    match customer {
        Some(customer) => {
            info!(customer_id = customer.id, client_id, "Customer authenticated");
            Ok(Json(json!({ "message": "Authentication successful." })))
        }
        None => {
            warn!(client_id, "Failed login attempt");
            Err(ApiError::unauthorized("Invalid email and password"))
        }
    }
}

/// `GET /api/customers/{id}`
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Customer>> {
    state
        .db
        .customers()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Customer", id))
}

fn duplicate_email() -> ApiError {
    ApiError::validation("Customer with email already exist")
}

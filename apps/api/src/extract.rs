//! Request body extractor accepting JSON or URL-encoded forms.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Deserializes the body as a form when the request says so, otherwise as
/// JSON. Rejections become 400 [`ApiError`]s.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            Ok(Payload(value))
        }
    }
}

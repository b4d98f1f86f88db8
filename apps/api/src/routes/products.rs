//! Catalog endpoints: listing, paging, create, price update, image upload.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::extract::Payload;
use crate::state::AppState;
use shopfront_core::validation::{
    validate_category, validate_page, validate_price_cents, validate_product_name, validate_stock,
};
use shopfront_core::{NewProduct, Product, ProductFilter};
use shopfront_db::ProductPage;

const DEFAULT_PAGE_NUMBER: i64 = 1;
const DEFAULT_PAGE_SIZE: i64 = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price_cents: i64,
    pub stock: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrice {
    pub price_cents: i64,
}

/// `GET /api/products?name=&category=&minPriceCents=&maxPriceCents=`
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<Product>>> {
    let Query(filter) = query?;
    let products = state.db.products().list(&filter).await?;
    Ok(Json(products))
}

/// `GET /api/products/paged?pageNumber=1&pageSize=5`
pub async fn paged_products(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<ProductPage>> {
    let Query(page) = query?;
    let page_number = page.page_number.unwrap_or(DEFAULT_PAGE_NUMBER);
    let page_size = page.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    validate_page(page_number, page_size)?;

    let page = state.db.products().page(page_number, page_size).await?;
    Ok(Json(page))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    Payload(body): Payload<CreateProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let name = body.name.trim().to_string();
    let category = body.category.trim().to_string();

    validate_product_name(&name)?;
    validate_category(&category)?;
    validate_price_cents(body.price_cents)?;
    validate_stock(body.stock)?;

    let product = state
        .db
        .products()
        .insert(&NewProduct {
            name,
            description: body.description.filter(|d| !d.trim().is_empty()),
            category,
            price_cents: body.price_cents,
            stock: body.stock,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}/price`
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Payload(body): Payload<UpdatePrice>,
) -> ApiResult<StatusCode> {
    validate_price_cents(body.price_cents)?;
    state.db.products().update_price(id, body.price_cents).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/products/{id}/upload`
///
/// Accepts a multipart `file` field and acknowledges it. The image is not
/// stored.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> ApiResult<Json<Value>> {
    let mut upload: Option<(String, usize)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(base_name).unwrap_or_default();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;
        upload = Some((file_name, bytes.len()));
    }

    let (file_name, size) = match upload {
        Some(upload) if upload.1 > 0 => upload,
        _ => return Err(ApiError::validation("No file uploaded")),
    };

    if state.db.products().get_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Product", id));
    }

    info!(product_id = id, file_name = %file_name, size, "Product image received");

    Ok(Json(json!({
        "message": "Image uploaded successfully",
        "fileName": file_name,
    })))
}

/// Strips any client-side directory from an uploaded file name.
fn base_name(name: &str) -> String {
    name.rsplit(['/', '\\']).next().unwrap_or(name).to_string()
}

#[cfg(test)]
mod tests {
    use super::base_name;
    use crate::routes::test_support::{get, json_request, send, test_app};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("laptop.png"), "laptop.png");
        assert_eq!(base_name("C:\\photos\\laptop.png"), "laptop.png");
        assert_eq!(base_name("/tmp/laptop.png"), "laptop.png");
    }

    #[tokio::test]
    async fn test_list_and_filter() {
        let app = test_app().await;

        let (status, body) = send(&app, get("/api/products")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (_, body) = send(&app, get("/api/products?category=Accessories")).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Headphones");

        let (_, body) = send(&app, get("/api/products?minPriceCents=80000")).await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, _) = send(&app, get("/api/products?minPriceCents=cheap")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_paged() {
        let app = test_app().await;

        let (status, body) = send(&app, get("/api/products/paged?pageNumber=2&pageSize=2")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["totalCount"], 3);

        let (_, body) = send(&app, get("/api/products/paged")).await;
        assert_eq!(body["pageSize"], 5);
        assert_eq!(body["items"].as_array().unwrap().len(), 3);

        let (status, _) = send(&app, get("/api/products/paged?pageNumber=0")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&app, get("/api/products/paged?pageSize=500")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/products",
                json!({ "name": "Mouse", "category": "Accessories", "priceCents": 2500, "stock": 100 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, get(&format!("/api/products/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["priceCents"], 2500);

        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/products",
                json!({ "name": "Free", "category": "X", "priceCents": 0, "stock": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, get("/api/products/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_price() {
        let app = test_app().await;

        let (status, _) = send(
            &app,
            json_request("PUT", "/api/products/1/price", json!({ "priceCents": 110000 })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, get("/api/products/1")).await;
        assert_eq!(body["priceCents"], 110000);

        let (status, _) = send(
            &app,
            json_request("PUT", "/api/products/999/price", json!({ "priceCents": 100 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            json_request("PUT", "/api/products/1/price", json!({ "priceCents": -5 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    fn multipart_upload(uri: &str, field: &str, file_name: &str, content: &str) -> Request<Body> {
        let boundary = "shopfront-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: image/png\r\n\r\n\
             {content}\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_image() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            multipart_upload("/api/products/1/upload", "file", "laptop.png", "PNGDATA"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Image uploaded successfully");
        assert_eq!(body["fileName"], "laptop.png");

        let (status, body) = send(
            &app,
            multipart_upload("/api/products/1/upload", "file", "empty.png", ""),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No file uploaded");

        let (status, _) = send(
            &app,
            multipart_upload("/api/products/1/upload", "other", "laptop.png", "PNGDATA"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            multipart_upload("/api/products/999/upload", "file", "laptop.png", "PNGDATA"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

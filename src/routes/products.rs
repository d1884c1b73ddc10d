use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::product::{NewProduct, ProductPatch};
use crate::error::ApiError;
use crate::state::AppState;

const REQUIRED_FIELDS_MSG: &str = "Invalid request data: Title, Price, and Type are required";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct CreateProduct {
    title: String,
    subtitle: Option<String>,
    desc: Option<String>,
    price: i64,
    guru_info: Option<String>,
    #[serde(rename = "type")]
    product_type: String,
    related_stock: Option<String>,
    expected_return: Option<String>,
}

async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload.map_err(|_| ApiError::Validation(REQUIRED_FIELDS_MSG))?;
    if payload.title.is_empty() || payload.product_type.is_empty() || payload.price < 0 {
        return Err(ApiError::Validation(REQUIRED_FIELDS_MSG));
    }

    state
        .products
        .insert(NewProduct {
            title: payload.title,
            subtitle: payload.subtitle,
            description: payload.desc,
            price: payload.price,
            guru_info: payload.guru_info,
            product_type: payload.product_type,
            related_stock: payload.related_stock,
            expected_return: payload.expected_return,
        })
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to create product"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Product created successfully" })),
    ))
}

async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let products = state
        .products
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to get products"))?;
    Ok(Json(json!({ "products": products })))
}

async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let product = state
        .products
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to get product"))?
        .ok_or(ApiError::NotFound("Product not found"))?;
    Ok(Json(json!({ "product": product })))
}

async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let mut product = state
        .products
        .get(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update product"))?
        .ok_or(ApiError::NotFound("Product not found"))?;

    let Json(patch) = payload.map_err(|_| ApiError::Validation(REQUIRED_FIELDS_MSG))?;
    if patch.price.is_some_and(|p| p < 0) {
        return Err(ApiError::Validation(REQUIRED_FIELDS_MSG));
    }

    patch.apply(&mut product);
    state
        .products
        .save(&product)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to update product"))?;

    Ok(Json(json!({ "message": "Product updated successfully" })))
}

async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state
        .products
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to delete product"))?;
    if !deleted {
        return Err(ApiError::NotFound("Product not found"));
    }
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::InvalidId("Invalid product ID"))
}

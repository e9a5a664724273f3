use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    models::ProductInput,
    AppState,
};

// ── Body parsing ──────────────────────────────────────────────────────────────

/// Parse a create/update body. Empty bodies and "empty" JSON values (`null`,
/// `{}`, `""`, `0`, `false`, `[]`) carry no data.
fn parse_body(body: &[u8]) -> AppResult<ProductInput> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::NoData);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let empty = match &value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if empty {
        return Err(AppError::NoData);
    }
    if !value.is_object() {
        return Err(AppError::BadRequest("expected a JSON object".to_string()));
    }

    serde_json::from_value(value).map_err(|e| AppError::BadRequest(e.to_string()))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Value>)> {
    let input = parse_body(&body)?;
    let product = state.store.write().await.create(&input)?;

    info!(id = %product.id, title = %product.title, "Created product");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product created successfully",
            "product": product,
        })),
    ))
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Value>)> {
    let store = state.store.read().await;
    let products = store.list();

    info!(count = products.len(), "Listed products");

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Products retrieved successfully",
            "products": products,
            "count": products.len(),
        })),
    ))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let store = state.store.read().await;
    let product = store.get(&id)?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Product retrieved successfully",
            "product": product,
        })),
    ))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Value>)> {
    let input = parse_body(&body)?;
    let product = state.store.write().await.update(&id, &input)?;

    info!(id = %product.id, "Updated product");

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Product updated successfully",
            "product": product,
        })),
    ))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let product = state.store.write().await.delete(&id)?;

    info!(id = %product.id, "Deleted product");

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Product deleted successfully",
            "deleted_product": product,
        })),
    ))
}

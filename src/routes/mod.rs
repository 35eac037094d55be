use crate::app_state::AppState;
use crate::data_models::{Category, CategoryPayload, Product, ProductPayload};
use crate::errors::AppErrors;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Result};
use tracing::info;
use validator::Validate;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.db.is_healthy().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppErrors> {
    let products = state.db.all_products().await?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, AppErrors> {
    let Json(payload) = payload?;
    let product = state.db.create_product(payload).await?;
    info!("created product {}", product.id);
    Ok(Json(product))
}

pub async fn replace_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<Product>, AppErrors> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let product = state.db.replace_product(id, payload).await?;
    info!("replaced product {id}");
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppErrors> {
    let Path(id) = id?;
    state.db.delete_product(id).await?;
    info!("deleted product {id}");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, AppErrors> {
    let categories = state.db.all_categories().await?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> Result<Json<Category>, AppErrors> {
    let Json(payload) = payload?;
    let payload = payload.cleaned();
    payload.validate()?;
    let category = state.db.create_category(payload).await?;
    info!("created category {}", category.id);
    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppErrors> {
    let Path(id) = id?;
    state.db.delete_category(id).await?;
    info!("deleted category {id}");
    Ok(StatusCode::NO_CONTENT)
}

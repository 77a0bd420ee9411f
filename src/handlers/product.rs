/// 상품 핸들러
/// 생성/수정 시 카테고리 토픽으로 푸시 알림을 보낸다.
// region:    --- Imports
use super::{ok_empty, ok_json, parse_body, RequestParams, ID};
use crate::error::{ApiError, ApiResult};
use crate::models::{new_id, Product};
use crate::notification::Target;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use tracing::info;
// endregion: --- Imports

pub const ADDED_MESSAGE: &str = "Just added and available for bidding.";
pub const UPDATED_MESSAGE: &str = "Just updated and available for bidding.";

// region:    --- Product Handlers

/// 상품 목록 조회
pub async fn handle_get_products(State(state): State<AppState>) -> ApiResult<Response> {
    info!("{:<12} --> 상품 목록 조회", "Product");
    let products = state.products.list().await?;
    info!("{:<12} --> 상품 {}건 조회", "Product", products.len());
    Ok(ok_json(products))
}

/// 상품 조회
pub async fn handle_get_product(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    info!("{:<12} --> 상품 조회 id: {}", "Product", id);
    let product = state.products.get(id).await?;
    info!("{:<12} --> 상품 존재 여부: {}", "Product", product.is_some());
    product.map(ok_json).ok_or(ApiError::NotFound)
}

/// 상품 등록
pub async fn handle_create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Response> {
    let mut product: Product = parse_body(&body)?;
    product.id = new_id();
    product.created_timestamp = Some(Utc::now());

    info!("{:<12} --> 상품 저장 id: {}", "Product", product.id);
    state.products.put(&product).await?;

    if !product.id.trim().is_empty() {
        info!("{:<12} --> 상품 카테고리: {}", "Product", product.category);
        let payload = serde_json::to_value(&product).ok();
        state
            .notifications
            .notify(
                Target::topic(&product.category),
                &product.name,
                ADDED_MESSAGE,
                &product.image_url,
                payload,
            )
            .await;
    }

    Ok(ok_json(product))
}

/// 상품 수정 (전체 덮어쓰기, 본문의 Id는 경로 값으로 대체)
pub async fn handle_update_product(
    State(state): State<AppState>,
    params: RequestParams,
    body: Bytes,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    let mut product: Product = parse_body(&body)?;
    product.id = id.to_string();

    info!("{:<12} --> 상품 저장 id: {}", "Product", product.id);
    state.products.put(&product).await?;

    state
        .notifications
        .notify(
            Target::topic(&product.category),
            &product.name,
            UPDATED_MESSAGE,
            &product.image_url,
            None,
        )
        .await;

    Ok(ok_json(product))
}

/// 상품 삭제 (입찰은 함께 삭제하지 않음)
pub async fn handle_delete_product(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    info!("{:<12} --> 상품 삭제 id: {}", "Product", id);
    state.products.delete(id).await?;
    Ok(ok_empty())
}

// endregion: --- Product Handlers

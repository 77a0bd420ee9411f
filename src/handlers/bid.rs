// region:    --- Imports
use super::{ok_empty, ok_json, parse_body, RequestParams, ID, PRODUCT_ID};
use crate::error::{ApiError, ApiResult};
use crate::models::{new_id, Bid};
use crate::state::AppState;
use crate::store::ScanCondition;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use tracing::info;
// endregion: --- Imports

// region:    --- Bid Handlers

/// 입찰 목록 조회. ProductId가 주어지면 해당 상품의 입찰만 조회한다.
pub async fn handle_get_bids(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    if params.contains(PRODUCT_ID) {
        return get_bids_by_product(&state, &params).await;
    }

    info!("{:<12} --> 입찰 목록 조회", "Bid");
    let bids = state.bids.list().await?;
    info!("{:<12} --> 입찰 {}건 조회", "Bid", bids.len());
    Ok(ok_json(bids))
}

/// 상품별 입찰 조회. 결과가 없어도 404가 아니라 빈 배열이다.
async fn get_bids_by_product(state: &AppState, params: &RequestParams) -> ApiResult<Response> {
    let product_id = params.require(PRODUCT_ID)?;
    info!("{:<12} --> 상품 입찰 조회 product_id: {}", "Bid", product_id);
    let bids = state
        .bids
        .scan_equal(&[ScanCondition::equal(PRODUCT_ID, product_id)])
        .await?;
    info!("{:<12} --> 입찰 {}건 조회", "Bid", bids.len());
    Ok(ok_json(bids))
}

/// 입찰 조회
pub async fn handle_get_bid(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    info!("{:<12} --> 입찰 조회 id: {}", "Bid", id);
    let bid = state.bids.get(id).await?;
    info!("{:<12} --> 입찰 존재 여부: {}", "Bid", bid.is_some());
    bid.map(ok_json).ok_or(ApiError::NotFound)
}

/// 입찰 등록
pub async fn handle_create_bid(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Response> {
    let mut bid: Bid = parse_body(&body)?;
    bid.id = new_id();
    bid.created_timestamp = Some(Utc::now());

    info!(
        "{:<12} --> 입찰 저장 id: {}, product_id: {}, amount: {}",
        "Bid", bid.id, bid.product_id, bid.amount
    );
    state.bids.put(&bid).await?;
    Ok(ok_json(bid))
}

/// 입찰 삭제
pub async fn handle_delete_bid(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    info!("{:<12} --> 입찰 삭제 id: {}", "Bid", id);
    state.bids.delete(id).await?;
    Ok(ok_empty())
}

// endregion: --- Bid Handlers

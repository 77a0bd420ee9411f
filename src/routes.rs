// region:    --- Imports
use crate::handlers::{self, bid, product, user};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
// endregion: --- Imports

const BODY_LIMIT: usize = 1024 * 1024;

// region:    --- Router
/// 전체 라우터 구성
pub fn create_router(state: AppState) -> Router {
    // 브라우저 클라이언트를 위한 cors 설정 (preflight 응답 포함)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::handle_health))
        .route(
            "/products",
            get(product::handle_get_products).post(product::handle_create_product),
        )
        .route(
            "/products/:Id",
            get(product::handle_get_product)
                .put(product::handle_update_product)
                .delete(product::handle_delete_product),
        )
        .route(
            "/bids",
            get(bid::handle_get_bids).post(bid::handle_create_bid),
        )
        .route(
            "/bids/:Id",
            get(bid::handle_get_bid).delete(bid::handle_delete_bid),
        )
        .route(
            "/users",
            get(user::handle_get_users).post(user::handle_create_user),
        )
        .route("/users/login", get(user::handle_login))
        .route(
            "/users/:Id",
            get(user::handle_get_user)
                .put(user::handle_update_user)
                .delete(user::handle_delete_user),
        )
        .layer(cors)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(state)
}
// endregion: --- Router

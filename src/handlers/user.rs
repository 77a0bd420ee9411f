/// 사용자 핸들러
/// 응답에는 항상 UserProfile을 사용해 비밀번호 정보를 내보내지 않는다.
// region:    --- Imports
use super::{ok_empty, ok_json, parse_body, RequestParams, ID, PASSWORD, USER_NAME};
use crate::error::{ApiError, ApiResult};
use crate::models::{new_id, UserInput, UserProfile};
use crate::state::AppState;
use crate::store::ScanCondition;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use tracing::info;
// endregion: --- Imports

// region:    --- User Handlers

/// 사용자 목록 조회
pub async fn handle_get_users(State(state): State<AppState>) -> ApiResult<Response> {
    info!("{:<12} --> 사용자 목록 조회", "User");
    let users = state.users.list().await?;
    info!("{:<12} --> 사용자 {}건 조회", "User", users.len());
    let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();
    Ok(ok_json(profiles))
}

/// 사용자 조회
pub async fn handle_get_user(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    info!("{:<12} --> 사용자 조회 id: {}", "User", id);
    let user = state.users.get(id).await?;
    info!("{:<12} --> 사용자 존재 여부: {}", "User", user.is_some());
    user.map(|u| ok_json(UserProfile::from(u)))
        .ok_or(ApiError::NotFound)
}

/// 로그인. UserName, Password 둘 다 필요하다.
pub async fn handle_login(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    let (Some(user_name), Some(password)) = (params.non_empty(USER_NAME), params.non_empty(PASSWORD))
    else {
        return Err(ApiError::MissingParameters(USER_NAME, PASSWORD));
    };

    info!("{:<12} --> 로그인 사용자 조회: {}", "User", user_name);
    let candidates = state
        .users
        .scan_equal(&[ScanCondition::equal(USER_NAME, user_name)])
        .await?;

    // 스캔 결과를 그대로 믿지 않고 이름과 비밀번호를 다시 확인
    let user = candidates
        .into_iter()
        .find(|u| u.user_name == user_name && u.verify_password(password));
    info!("{:<12} --> 로그인 일치 여부: {}", "User", user.is_some());

    user.map(|u| ok_json(UserProfile::from(u)))
        .ok_or(ApiError::NotFound)
}

/// 사용자 등록
/// 생성/수정 본문 파싱. 수정은 전체 덮어쓰기이므로 비밀번호가 비어 있으면 거부한다.
fn parse_user_input(body: &Bytes) -> ApiResult<UserInput> {
    let input: UserInput = parse_body(body)?;
    if input.password.is_empty() {
        return Err(ApiError::InvalidBody(format!("{} must not be empty", PASSWORD)));
    }
    Ok(input)
}

pub async fn handle_create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Response> {
    let input = parse_user_input(&body)?;
    let mut user = input
        .into_user(new_id())
        .map_err(|e| ApiError::PasswordHash(e.to_string()))?;
    user.created_timestamp = Some(Utc::now());

    info!("{:<12} --> 사용자 저장 id: {}", "User", user.id);
    state.users.put(&user).await?;
    Ok(ok_json(UserProfile::from(user)))
}

/// 사용자 수정 (전체 덮어쓰기, 본문의 Id는 경로 값으로 대체)
pub async fn handle_update_user(
    State(state): State<AppState>,
    params: RequestParams,
    body: Bytes,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    let input = parse_user_input(&body)?;
    let user = input
        .into_user(id.to_string())
        .map_err(|e| ApiError::PasswordHash(e.to_string()))?;

    info!("{:<12} --> 사용자 저장 id: {}", "User", user.id);
    state.users.put(&user).await?;
    Ok(ok_json(UserProfile::from(user)))
}

/// 사용자 삭제
pub async fn handle_delete_user(
    State(state): State<AppState>,
    params: RequestParams,
) -> ApiResult<Response> {
    let id = params.require(ID)?;
    info!("{:<12} --> 사용자 삭제 id: {}", "User", id);
    state.users.delete(id).await?;
    Ok(ok_empty())
}

// endregion: --- User Handlers

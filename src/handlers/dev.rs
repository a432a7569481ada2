//! 개발/운영 보조 핸들러
//!
//! - `GET /api/dev/token?userId=` : 기존 사용자에게 토큰 즉시 발급 (개발/테스트 환경 전용)
//! - `GET /api/admin/ping` : `ROLE_ADMIN` 전용 확인용 엔드포인트
use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::domain::dto::{ApiResponse, DevTokenQuery};
use crate::domain::models::auth::CurrentIdentity;
use crate::errors::AppError;
use crate::state::AppState;

#[get("/token")]
pub async fn dev_token(
    state: web::Data<AppState>,
    query: web::Query<DevTokenQuery>,
) -> Result<HttpResponse, AppError> {
    if !state.environment.allows_dev_endpoints() {
        return Err(AppError::NotFound("dev 엔드포인트".to_string()));
    }

    log::warn!("⚠️ 개발용 토큰 발급: user_id={}", query.user_id);
    let tokens = state.auth_service.issue_dev_tokens(query.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tokens)))
}

#[get("/ping")]
pub async fn admin_ping(current: CurrentIdentity) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(json!({
        "pong": true,
        "userId": current.identity_id(),
    })))
}

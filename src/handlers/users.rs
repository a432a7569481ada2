//! # User HTTP Handlers
//!
//! 인증된 사용자 본인에 대한 엔드포인트입니다. `/api/users` 스코프는 `RequireAuth`로 보호되며,
//! 핸들러는 토큰 대신 [`CurrentIdentity`]로 사용자 ID만 받습니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/api/users/me` | 현재 사용자 조회 |
//! | `DELETE` | `/api/users/me` | 회원 탈퇴 |
use actix_web::{HttpResponse, delete, get, web};

use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::CurrentIdentity;
use crate::errors::AppError;
use crate::state::AppState;

#[get("/me")]
pub async fn get_me(
    state: web::Data<AppState>,
    current: CurrentIdentity,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.get_me(current.identity_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

#[delete("/me")]
pub async fn withdraw(
    state: web::Data<AppState>,
    current: CurrentIdentity,
) -> Result<HttpResponse, AppError> {
    state.user_service.withdraw(current.identity_id()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok()))
}

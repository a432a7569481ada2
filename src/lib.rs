//! 연합 소셜 로그인 인증 서비스
//!
//! Kakao, Google, Naver, Apple 계정으로 로그인한 사용자에게
//! 자체 세션 토큰(HMAC-SHA256 액세스/리프레시 토큰)을 발급하는 서비스입니다.
//!
//! # Features
//!
//! - **토큰 로그인**: 앱이 프로바이더 SDK로 받은 액세스 토큰으로 로그인
//! - **웹 로그인**: 인가 코드 흐름 (PKCE, Apple client secret 서명, Apple ID 토큰 검증)
//! - **세션 토큰**: 사용자당 하나의 리프레시 토큰 행, 재발급 시 교체
//! - **요청 단위 인증 결과**: 필터가 `AuthContext`를 남기고 인가 경계에서만 실패 응답
//! - **MongoDB**: 사용자와 리프레시 토큰 저장
//! - **Redis**: 인가 요청과 일회용 로그인 코드 (TTL)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Middlewares    │ ← AuthenticationFilter, RequireAuth
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 프로바이더 연동
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (MongoDB / 메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use federated_auth_service::state::{AppState, Providers, Stores};
//!
//! let state = AppState::new(Stores::memory(), Providers::from_config(None), token_provider, environment);
//! let response = state.auth_service.login(ProviderType::Kakao, "kakao-access-token").await?;
//! ```

pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod state;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

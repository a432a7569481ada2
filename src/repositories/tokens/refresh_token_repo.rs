//! # 리프레시 토큰 리포지토리
//!
//! 사용자당 하나의 리프레시 토큰 행을 유지합니다.
//! 저장은 항상 `_id`(사용자 ID) 기준 교체이므로 로그인과 재발급을 몇 번 반복해도 행은 하나입니다.

use async_trait::async_trait;
use mongodb::{
    Collection, IndexModel,
    bson::{DateTime, doc},
    options::{IndexOptions, ReplaceOptions},
};

use crate::db::Database;
use crate::domain::entities::tokens::RefreshToken;
use crate::errors::{AppError, AppResult};

const COLLECTION: &str = "refresh_tokens";

/// 리프레시 토큰 저장소
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// 사용자의 리프레시 토큰을 저장합니다. 기존 행이 있으면 값을 교체합니다.
    async fn save(&self, identity_id: i64, token: &str, expires_at: DateTime) -> AppResult<()>;

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>>;

    /// 행이 없어도 성공입니다.
    async fn delete_by_identity(&self, identity_id: i64) -> AppResult<()>;
}

/// MongoDB 리프레시 토큰 리포지토리
#[derive(Clone)]
pub struct MongoRefreshTokenStore {
    collection: Collection<RefreshToken>,
}

impl MongoRefreshTokenStore {
    pub async fn new(database: &Database) -> AppResult<Self> {
        let store = Self {
            collection: database.collection::<RefreshToken>(COLLECTION),
        };
        store.create_indexes().await?;
        Ok(store)
    }

    async fn create_indexes(&self) -> AppResult<()> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_unique".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([token_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl RefreshTokenStore for MongoRefreshTokenStore {
    async fn save(&self, identity_id: i64, token: &str, expires_at: DateTime) -> AppResult<()> {
        let row = RefreshToken::new(identity_id, token.to_string(), expires_at);
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "_id": identity_id }, &row)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshToken>> {
        self.collection
            .find_one(doc! { "token": token })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete_by_identity(&self, identity_id: i64) -> AppResult<()> {
        self.collection
            .delete_one(doc! { "_id": identity_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

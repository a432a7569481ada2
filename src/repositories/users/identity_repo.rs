//! # 사용자 리포지토리 구현
//!
//! 소셜 계정(Identity)의 데이터 액세스 계층입니다.
//! 로그인 흐름은 [`IdentityStore`] 트레이트에만 의존하고,
//! 운영에서는 [`MongoIdentityStore`], 로컬/테스트에서는 [`MemoryIdentityStore`](super::MemoryIdentityStore)를 주입합니다.
//!
//! ## 특징
//!
//! - **숫자 ID**: `counters` 컬렉션의 `$inc`로 발급
//! - **데이터 무결성**: `(provider_type, provider_subject_id)` 유니크 인덱스
//! - **동시 가입**: 같은 계정의 최초 로그인이 겹치면 먼저 만들어진 행을 반환

use async_trait::async_trait;
use mongodb::{
    Collection, IndexModel,
    bson::{DateTime, doc},
    error::{ErrorKind, WriteFailure},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};
use serde::Deserialize;

use crate::config::ProviderType;
use crate::db::Database;
use crate::domain::entities::users::{Identity, NewIdentity};
use crate::errors::{AppError, AppResult};

const COLLECTION: &str = "identities";
const COUNTERS: &str = "counters";
const IDENTITY_SEQUENCE: &str = "identity_id";

/// 사용자 저장소
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_provider(
        &self,
        provider: ProviderType,
        provider_subject_id: &str,
    ) -> AppResult<Option<Identity>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Identity>>;

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool>;

    /// 신규 사용자를 저장합니다.
    ///
    /// 같은 `(provider, subject)`가 이미 있으면 새로 만들지 않고 기존 행을 반환합니다.
    async fn create(&self, new: NewIdentity) -> AppResult<Identity>;

    /// 로그인 시각을 갱신하고, 프로바이더가 이메일을 보냈다면 함께 갱신합니다.
    async fn record_login(&self, id: i64, email: Option<&str>) -> AppResult<Option<Identity>>;

    /// 탈퇴 시 연결 해제에 사용할 프로바이더 자격 증명을 저장합니다.
    async fn update_social_revoke_token(&self, id: i64, token: &str) -> AppResult<()>;

    /// 소프트 삭제. 대상이 없으면 `false`
    async fn soft_delete(&self, id: i64) -> AppResult<bool>;
}

#[derive(Debug, Deserialize)]
struct Counter {
    seq: i64,
}

/// MongoDB 사용자 리포지토리
///
/// ## 인덱스
///
/// - `provider_unique`: `(provider_type, provider_subject_id)` 유니크
/// - `nickname_idx`: 닉네임 중복 확인용
#[derive(Clone)]
pub struct MongoIdentityStore {
    collection: Collection<Identity>,
    counters: Collection<Counter>,
}

impl MongoIdentityStore {
    /// 컬렉션 핸들을 만들고 인덱스를 보장합니다.
    pub async fn new(database: &Database) -> AppResult<Self> {
        let store = Self {
            collection: database.collection::<Identity>(COLLECTION),
            counters: database.collection::<Counter>(COUNTERS),
        };
        store.create_indexes().await?;
        Ok(store)
    }

    async fn create_indexes(&self) -> AppResult<()> {
        let provider_index = IndexModel::builder()
            .keys(doc! { "provider_type": 1, "provider_subject_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_unique".to_string())
                .build())
            .build();

        let nickname_index = IndexModel::builder()
            .keys(doc! { "nickname": 1 })
            .options(IndexOptions::builder()
                .name("nickname_idx".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([provider_index, nickname_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn next_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self.counters
            .find_one_and_update(
                doc! { "_id": IDENTITY_SEQUENCE },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError("ID 시퀀스 발급 실패".to_string()))?;

        Ok(counter.seq)
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

#[async_trait]
impl IdentityStore for MongoIdentityStore {
    async fn find_by_provider(
        &self,
        provider: ProviderType,
        provider_subject_id: &str,
    ) -> AppResult<Option<Identity>> {
        self.collection
            .find_one(doc! {
                "provider_type": provider.as_str(),
                "provider_subject_id": provider_subject_id,
            })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Identity>> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn exists_by_nickname(&self, nickname: &str) -> AppResult<bool> {
        let count = self.collection
            .count_documents(doc! { "nickname": nickname })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    async fn create(&self, new: NewIdentity) -> AppResult<Identity> {
        let provider = new.provider_type;
        let subject = new.provider_subject_id.clone();
        let identity = Identity::create(self.next_id().await?, new);

        match self.collection.insert_one(&identity).await {
            Ok(_) => Ok(identity),
            Err(e) if is_duplicate_key(&e) => {
                log::info!("동시 가입 감지, 기존 사용자 반환: {} {}", provider, subject);
                self.find_by_provider(provider, &subject)
                    .await?
                    .ok_or_else(|| AppError::DatabaseError(e.to_string()))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn record_login(&self, id: i64, email: Option<&str>) -> AppResult<Option<Identity>> {
        let now = DateTime::now();
        let mut update = doc! { "last_login_at": now, "updated_at": now };
        if let Some(email) = email {
            update.insert("email", email);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update_social_revoke_token(&self, id: i64, token: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "social_revoke_token": token, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn soft_delete(&self, id: i64) -> AppResult<bool> {
        let result = self.collection
            .update_one(
                doc! { "_id": id, "is_deleted": false },
                doc! { "$set": { "is_deleted": true, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(result.matched_count > 0)
    }
}

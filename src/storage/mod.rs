//! 영속 저장소 어댑터 모듈
//!
//! 현재 토큰, 리프레시 토큰, 사용자 레코드를 프로세스 재시작 후에도
//! 유지하기 위한 키/값 저장소 추상화입니다. 값은 미리 직렬화된 문자열이며
//! 어댑터는 인코딩에 관여하지 않습니다.
//!
//! # 구현체
//!
//! - [`memory::MemoryStore`] - 프로세스 메모리
//! - [`file::FileStore`] - JSON 파일
//! - [`redis::RedisStore`] - Redis 문자열 키
//!
//! # 키 레이아웃
//!
//! | 키 | 값 |
//! |----|----|
//! | `auth_token` | JSON 직렬화된 `AuthToken` |
//! | `user_data` | JSON 직렬화된 `User` |
//! | `refresh_token` | 리프레시 토큰 원문 |
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let store = build_store(&config.storage).await?;
//! store.set(AUTH_TOKEN_KEY, &serde_json::to_string(&token)?).await?;
//! let raw: Option<String> = store.get(AUTH_TOKEN_KEY).await?;
//! ```

pub mod file;
pub mod memory;
pub mod redis;

use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use crate::config::{StorageConfig, StoreBackend};
use crate::errors::AppResult;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use self::redis::RedisStore;

/// 직렬화된 `AuthToken` 키
pub const AUTH_TOKEN_KEY: &str = "auth_token";
/// 직렬화된 `User` 키
pub const USER_DATA_KEY: &str = "user_data";
/// 리프레시 토큰 원문 키
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// 세션이 사용하는 모든 키
pub const SESSION_KEYS: [&str; 3] = [AUTH_TOKEN_KEY, USER_DATA_KEY, REFRESH_TOKEN_KEY];

/// 키/값 영속 저장소
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// 키의 값을 조회합니다. 없으면 `None`입니다.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 키에 값을 저장합니다.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// 키를 삭제합니다. 없는 키를 삭제해도 성공입니다.
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// 설정에 맞는 저장소 구현체를 생성합니다.
///
/// # Errors
///
/// * `AppError::StorageError` - Redis 연결 실패
pub async fn build_store(config: &StorageConfig) -> AppResult<Arc<dyn StoreAdapter>> {
    let store: Arc<dyn StoreAdapter> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => Arc::new(FileStore::new(config.file_path.clone())),
        StoreBackend::Redis => {
            Arc::new(RedisStore::connect(&config.redis_url, &config.key_prefix).await?)
        }
    };

    info!("세션 저장소 준비 완료: {}", config.backend.as_str());
    Ok(store)
}

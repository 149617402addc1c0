//! 프로세스 메모리 저장소

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StoreAdapter;
use crate::errors::AppResult;

/// `HashMap` 기반 저장소
///
/// 프로세스가 종료되면 내용이 사라집니다. 개발/테스트 환경의 기본값입니다.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();

        assert_eq!(store.get("auth_token").await.unwrap(), None);

        store.set("auth_token", "{\"a\":1}").await.unwrap();
        assert_eq!(
            store.get("auth_token").await.unwrap().as_deref(),
            Some("{\"a\":1}")
        );

        store.remove("auth_token").await.unwrap();
        assert!(store.is_empty().await);
    }

    #[actix_web::test]
    async fn test_remove_missing_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.remove("refresh_token").await.is_ok());
    }
}

//! JSON 파일 저장소
//!
//! 하나의 JSON 객체 파일(`{"key": "value", ...}`)에 모든 키를 기록합니다.
//! 읽기-수정-쓰기 구간은 비동기 뮤텍스로 직렬화됩니다.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use tokio::fs;
use tokio::sync::Mutex;

use super::StoreAdapter;
use crate::errors::{AppError, AppResult};

/// 파일 기반 저장소
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// 파일 전체를 읽습니다. 파일이 없으면 빈 맵입니다.
    async fn load(&self) -> AppResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::StorageError(format!(
                    "손상된 저장소 파일 {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::StorageError(format!(
                "저장소 파일 읽기 실패 {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    /// 임시 파일에 쓴 뒤 이름을 바꿔 원자적으로 교체합니다.
    async fn save(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, serialized).await?;
        fs::rename(&tmp_path, &self.path).await?;

        debug!("저장소 파일 갱신: {} ({}개 키)", self.path.display(), entries.len());
        Ok(())
    }
}

#[async_trait]
impl StoreAdapter for FileStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

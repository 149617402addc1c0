//! 자격 증명 서비스 계약과 HTTP 구현
//!
//! 세션 관리자는 [`CredentialService`] trait에만 의존합니다.
//! 전송 실패(네트워크, 타임아웃, 잘못된 응답)는 `Err`로,
//! 자격 증명 거부는 `success: false` 응답으로 구분됩니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{CredentialBackend, CredentialConfig};
use crate::domain::dto::credential::{
    AuthenticateRequest, AuthenticateResponse, RefreshRequest, RefreshResponse,
};
use crate::errors::{AppError, AppResult, ErrorContext};
use crate::services::auth::mock_credential_service::MockCredentialService;
use crate::utils::clock::Clock;

/// 외부 인증 백엔드
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// 이메일/비밀번호로 인증합니다.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<AuthenticateResponse>;

    /// 리프레시 토큰으로 새 토큰을 발급받습니다.
    async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResponse>;
}

/// HTTP 기반 자격 증명 서비스
///
/// - `POST {base_url}/auth/login` `{"email", "password"}`
/// - `POST {base_url}/auth/refresh` `{"refreshToken"}`
///
/// 응답 본문은 상태 코드와 무관하게 `{success, data?, error?}` 형태로 해석합니다.
/// 본문을 해석할 수 없으면 `AppError::ExternalServiceError`입니다.
pub struct HttpCredentialService {
    client: Client,
    base_url: String,
}

impl HttpCredentialService {
    /// # Errors
    ///
    /// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> AppResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ExternalServiceError(format!("자격 증명 서비스 타임아웃: {}", url))
                } else {
                    AppError::ExternalServiceError(format!("자격 증명 서비스 요청 실패: {}", e))
                }
            })?;

        let status = response.status();
        debug!("자격 증명 서비스 응답 - {} {}", url, status);

        let text = response
            .text()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("응답 본문 읽기 실패: {}", e)))?;

        serde_json::from_str::<R>(&text).map_err(|e| {
            warn!("자격 증명 서비스 응답 해석 실패 - status: {}, error: {}", status, e);
            AppError::ExternalServiceError(format!(
                "잘못된 자격 증명 서비스 응답 (status {}): {}",
                status, e
            ))
        })
    }
}

#[async_trait]
impl CredentialService for HttpCredentialService {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<AuthenticateResponse> {
        let body = AuthenticateRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json("auth/login", &body).await
    }

    async fn refresh(&self, refresh_token: &str) -> AppResult<RefreshResponse> {
        let body = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };
        self.post_json("auth/refresh", &body).await
    }
}

/// 설정에 맞는 자격 증명 서비스를 생성합니다.
///
/// # Errors
///
/// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
pub fn build_credential_service(
    config: &CredentialConfig,
    clock: Arc<dyn Clock>,
) -> AppResult<Arc<dyn CredentialService>> {
    let service: Arc<dyn CredentialService> = match config.backend {
        CredentialBackend::Mock => Arc::new(
            MockCredentialService::with_demo_accounts(clock).with_token_ttl(config.mock_token_ttl),
        ),
        CredentialBackend::Http => Arc::new(HttpCredentialService::new(
            config.base_url.clone(),
            config.request_timeout,
        )?),
    };
    Ok(service)
}

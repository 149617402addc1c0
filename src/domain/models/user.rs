//! 사용자 신원 레코드
//!
//! 자격 증명 서비스의 인증 응답으로부터 생성되며, 세션 관리자 입장에서는
//! 불변입니다. 재로그인 시에만 통째로 교체됩니다.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 저장소와 API에는 소문자 문자열(`user`, `admin`, `moderator`)로 기록됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// 일반 사용자
    User,
    /// 관리자 - 모든 권한에 대한 암묵적 와일드카드
    Admin,
    /// 모더레이터
    Moderator,
}

impl UserRole {
    /// 역할의 소문자 문자열 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
            UserRole::Moderator => "moderator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 인증된 사용자 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// 안정적인 고유 ID
    pub id: String,
    /// 이메일
    pub email: String,
    /// 표시 이름
    pub name: String,
    /// 역할
    pub role: UserRole,
    /// 권한 태그 집합 (예: `quiz:read`)
    #[serde(default)]
    pub permissions: BTreeSet<String>,
    /// 마지막 로그인 시각
    pub last_login: DateTime<Utc>,
    /// 계정 활성화 여부
    pub is_active: bool,
}

impl User {
    /// 권한 보유 여부를 확인합니다.
    ///
    /// `admin` 역할은 모든 권한을 암묵적으로 보유합니다.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.role == UserRole::Admin || self.permissions.contains(permission)
    }

    /// 역할 문자열과 정확히 일치하는지 확인합니다.
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_str() == role
    }
}

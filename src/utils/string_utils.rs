//! # 문자열 유틸리티
//!
//! 식별자 정규화, 로그용 마스킹, 필수 값 검증 함수들입니다.

use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 문자열
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  quiz:read  ", "permission").unwrap(), "quiz:read");
/// assert!(validate_required_string("   ", "permission").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{} is required",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 속도 제한/계정 조회용 식별자 정규화
///
/// 앞뒤 공백을 제거하고 소문자로 변환합니다.
/// `" User@Quiz.LOCAL "`과 `"user@quiz.local"`은 같은 식별자입니다.
pub fn normalize_identifier(value: &str) -> String {
    value.trim().to_lowercase()
}

/// 로그 출력용 이메일 마스킹
///
/// 로컬 파트의 첫 글자만 남깁니다. `@`가 없으면 전체를 가립니다.
///
/// # 예제
/// ```rust,ignore
/// assert_eq!(mask_email("alice@quiz.local"), "a***@quiz.local");
/// assert_eq!(mask_email("not-an-email"), "***");
/// ```
pub fn mask_email(email: &str) -> String {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("admin", "role").unwrap(), "admin");
        assert_eq!(validate_required_string("  admin  ", "role").unwrap(), "admin");

        assert!(validate_required_string("", "role").is_err());
        assert!(validate_required_string("   ", "role").is_err());
        assert!(validate_required_string("\t\n", "role").is_err());
    }

    #[test]
    fn test_normalize_identifier() {
        assert_eq!(normalize_identifier(" User@Quiz.LOCAL "), "user@quiz.local");
        assert_eq!(normalize_identifier("203.0.113.7"), "203.0.113.7");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@quiz.local"), "a***@quiz.local");
        assert_eq!(mask_email("한글@quiz.local"), "한***@quiz.local");
        assert_eq!(mask_email("@quiz.local"), "***");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}

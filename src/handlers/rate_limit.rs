//! Rate Limit HTTP Handlers
use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::core::AppContext;
use crate::domain::dto::{ApiResponse, RateLimitStatus};
use crate::utils::request_utils::client_identifier;

/// 호출자의 API 속도 제한 현황
///
/// 이 요청 자체도 미들웨어에서 이미 계산된 상태입니다.
///
/// # Endpoint
/// `GET /api/v1/rate-limit`
#[get("/rate-limit")]
pub async fn rate_limit_status(context: web::Data<AppContext>, req: HttpRequest) -> HttpResponse {
    let identifier = client_identifier(&req, &context.trusted_proxies);
    let status = RateLimitStatus::for_identifier(&context.api_limiter, &identifier);

    HttpResponse::Ok().json(ApiResponse::success(status))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::TestContext;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Duration;
    use serde_json::Value;

    fn status_request(ip: &str) -> test::TestRequest {
        test::TestRequest::get()
            .uri("/api/v1/rate-limit")
            .peer_addr(format!("{}:5000", ip).parse().unwrap())
    }

    #[actix_web::test]
    async fn test_status_counts_current_request() {
        let ctx = TestContext::with_api_limit(5);
        let app = test_app!(ctx);

        let body: Value =
            test::call_and_read_body_json(&app, status_request("203.0.113.7").to_request()).await;
        assert_eq!(body["data"]["limit"], 5);
        assert_eq!(body["data"]["remaining"], 4);

        let body: Value =
            test::call_and_read_body_json(&app, status_request("203.0.113.7").to_request()).await;
        assert_eq!(body["data"]["remaining"], 3);
    }

    #[actix_web::test]
    async fn test_api_scope_refuses_after_limit_and_recovers() {
        let ctx = TestContext::with_api_limit(2);
        let app = test_app!(ctx);

        for _ in 0..2 {
            let resp = test::call_service(&app, status_request("203.0.113.7").to_request()).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let resp = test::call_service(&app, status_request("203.0.113.7").to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        ctx.clock.advance(Duration::minutes(15) + Duration::milliseconds(1));
        let resp = test::call_service(&app, status_request("203.0.113.7").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_rotating_forwarded_for_does_not_reset_limit() {
        let ctx = TestContext::with_api_limit(1);
        let app = test_app!(ctx);

        let mut admitted = 0;
        for i in 0..20 {
            let req = status_request("192.0.2.10")
                .insert_header(("X-Forwarded-For", format!("10.0.0.{}", i)))
                .to_request();
            if test::call_service(&app, req).await.status() == StatusCode::OK {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1);
    }

    #[actix_web::test]
    async fn test_trusted_proxy_limits_each_forwarded_client() {
        let mut ctx = TestContext::with_api_limit(1);
        ctx.context = ctx
            .context
            .clone()
            .with_trusted_proxies(vec!["10.0.0.1".parse().unwrap()]);
        let app = test_app!(ctx);

        let via_proxy = |client: &str| {
            status_request("10.0.0.1")
                .insert_header(("X-Forwarded-For", client.to_string()))
                .to_request()
        };

        let resp = test::call_service(&app, via_proxy("203.0.113.7")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let resp = test::call_service(&app, via_proxy("203.0.113.7")).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        let resp = test::call_service(&app, via_proxy("198.51.100.2")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_health_is_not_rate_limited() {
        let ctx = TestContext::with_api_limit(1);
        let app = test_app!(ctx);

        for _ in 0..3 {
            let req = test::TestRequest::get()
                .uri("/health")
                .peer_addr("203.0.113.7:5000".parse().unwrap())
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }
    }
}

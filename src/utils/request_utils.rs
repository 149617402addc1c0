//! HTTP 요청 헬퍼
//!
//! 속도 제한 식별자로 쓰는 클라이언트 주소를 추출합니다.
//!
//! 전달 헤더(`X-Forwarded-For`, `X-Real-IP`)는 클라이언트가 임의로 보낼 수 있으므로
//! 연결 상대(peer)가 신뢰하는 프록시일 때만 읽습니다. 그 외에는 peer 주소가 식별자입니다.

use std::net::IpAddr;

use actix_web::HttpRequest;

/// 주소를 알 수 없는 클라이언트의 식별자
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// HTTP 요청에서 클라이언트 IP 주소 추출
///
/// # 우선순위
/// 1. peer가 `trusted_proxies`에 없으면 peer 주소
/// 2. `X-Forwarded-For`에서 오른쪽부터 처음 나오는 신뢰하지 않는 주소
/// 3. `X-Real-IP`
/// 4. peer 주소
///
/// peer 주소가 없으면 헤더와 관계없이 `None`입니다.
pub fn extract_client_ip(req: &HttpRequest, trusted_proxies: &[IpAddr]) -> Option<String> {
    let peer = req.peer_addr()?.ip();

    if !trusted_proxies.contains(&peer) {
        return Some(peer.to_string());
    }

    if let Some(client) = forwarded_client(req, trusted_proxies) {
        return Some(client.to_string());
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Some(ip) = real_ip.to_str().ok().and_then(|s| s.trim().parse::<IpAddr>().ok()) {
            return Some(ip.to_string());
        }
    }

    Some(peer.to_string())
}

/// 프록시 체인의 마지막(가장 가까운) 신뢰하지 않는 홉
///
/// 체인의 왼쪽 값은 클라이언트가 위조할 수 있으므로 신뢰 프록시가 덧붙인
/// 오른쪽부터 거슬러 올라갑니다. 해석할 수 없는 값을 만나면 중단합니다.
fn forwarded_client(req: &HttpRequest, trusted_proxies: &[IpAddr]) -> Option<IpAddr> {
    let header = req.headers().get("X-Forwarded-For")?.to_str().ok()?;

    for hop in header.rsplit(',') {
        let ip = hop.trim().parse::<IpAddr>().ok()?;
        if !trusted_proxies.contains(&ip) {
            return Some(ip);
        }
    }
    None
}

/// 속도 제한 식별자. 주소를 알 수 없으면 [`ANONYMOUS_CLIENT`]입니다.
pub fn client_identifier(req: &HttpRequest, trusted_proxies: &[IpAddr]) -> String {
    extract_client_ip(req, trusted_proxies).unwrap_or_else(|| ANONYMOUS_CLIENT.to_string())
}

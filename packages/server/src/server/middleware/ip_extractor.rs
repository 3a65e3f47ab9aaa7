use axum::{
    extract::{ConnectInfo, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Extension key for storing extracted IP address
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientIp(pub IpAddr);

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn header_ip(headers: &HeaderMap, name: &str) -> Option<IpAddr> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Resolve the client address from proxy headers, then the socket.
///
/// Priority:
/// 1. CF-Connecting-IP (Cloudflare)
/// 2. X-Forwarded-For, first entry
/// 3. X-Real-IP (Nginx)
/// 4. Socket address (direct connection)
pub fn resolve_client_ip(headers: &HeaderMap, socket: Option<SocketAddr>) -> Option<IpAddr> {
    header_ip(headers, "cf-connecting-ip")
        .or_else(|| header_ip(headers, "x-forwarded-for"))
        .or_else(|| header_ip(headers, "x-real-ip"))
        .or_else(|| socket.map(|addr| addr.ip()))
}

/// Middleware to extract client IP address from request
pub async fn extract_client_ip(
    connect_info: Option<ConnectInfo<SocketAddr>>,
    mut request: Request,
    next: Next,
) -> Response {
    let socket = connect_info.map(|ConnectInfo(addr)| addr);

    if let Some(ip) = resolve_client_ip(request.headers(), socket) {
        request.extensions_mut().insert(ClientIp(ip));
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(*name, HeaderValue::from_static(*value));
        }
        headers
    }

    #[test]
    fn cloudflare_header_wins() {
        let headers = headers(&[
            ("cf-connecting-ip", "203.0.113.7"),
            ("x-forwarded-for", "198.51.100.1, 10.0.0.1"),
            ("x-real-ip", "192.0.2.9"),
        ]);
        assert_eq!(
            resolve_client_ip(&headers, None),
            Some("203.0.113.7".parse().unwrap())
        );
    }

    #[test]
    fn forwarded_for_uses_first_entry() {
        let headers = headers(&[("x-forwarded-for", "198.51.100.1, 10.0.0.1")]);
        assert_eq!(
            resolve_client_ip(&headers, None),
            Some("198.51.100.1".parse().unwrap())
        );
    }

    #[test]
    fn unparsable_header_falls_through() {
        let headers = headers(&[("x-forwarded-for", "garbage"), ("x-real-ip", "192.0.2.9")]);
        assert_eq!(
            resolve_client_ip(&headers, None),
            Some("192.0.2.9".parse().unwrap())
        );
    }

    #[test]
    fn socket_is_the_last_resort() {
        let socket: SocketAddr = "127.0.0.1:4000".parse().unwrap();
        assert_eq!(
            resolve_client_ip(&HeaderMap::new(), Some(socket)),
            Some(socket.ip())
        );
        assert_eq!(resolve_client_ip(&HeaderMap::new(), None), None);
    }
}

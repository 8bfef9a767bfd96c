//! Client identification utilities
//!
//! Reads who is calling from request headers: address, User-Agent and the
//! bearer credential.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Longest User-Agent kept on a session record
pub const MAX_USER_AGENT_LENGTH: usize = 512;

/// Caller metadata recorded on a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// From X-Forwarded-For or the direct connection
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientInfo {
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        Self {
            ip: extract_client_ip(headers, direct_ip),
            user_agent: extract_user_agent(headers),
        }
    }

    /// IP as string (for database storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For first (reverse proxy setups), then falls back to
/// the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    forwarded.or(direct_ip)
}

/// User-Agent, truncated to [`MAX_USER_AGENT_LENGTH`] characters
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty())
        .map(|ua| ua.chars().take(MAX_USER_AGENT_LENGTH).collect())
}

/// Credential from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. Anything else, including an
/// empty token, yields `None`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_bad_xff_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("unknown"));
        let direct: IpAddr = "127.0.0.1".parse().unwrap();

        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
        assert_eq!(extract_client_ip(&HeaderMap::new(), None), None);
    }

    #[test]
    fn test_client_info_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.5.0"));
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        let info = ClientInfo::from_headers(&headers, Some(direct));
        assert_eq!(info.user_agent.as_deref(), Some("curl/8.5.0"));
        assert_eq!(info.ip_string().as_deref(), Some("10.1.2.3"));
    }

    #[test]
    fn test_user_agent_truncated() {
        let long = "a".repeat(MAX_USER_AGENT_LENGTH + 50);
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_str(&long).unwrap());

        let ua = extract_user_agent(&headers).unwrap();
        assert_eq!(ua.len(), MAX_USER_AGENT_LENGTH);
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def"),
        );
        assert_eq!(extract_bearer_token(&headers), Some("abc.def"));

        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("bearer   abc.def "),
        );
        assert_eq!(extract_bearer_token(&headers), Some("abc.def"));
    }

    #[test]
    fn test_bearer_token_rejects_other_shapes() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer    ", "abc.def"] {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
            assert_eq!(extract_bearer_token(&headers), None, "{value}");
        }
    }
}

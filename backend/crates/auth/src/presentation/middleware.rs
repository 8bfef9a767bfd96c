//! Policy Gate Middleware
//!
//! Runs in front of every route. Rejections never reach the handler. On
//! forward, the verified [`Claims`] are placed in the request extensions and
//! mirrored into the `x-user-*` headers; whatever the client sent under
//! those names is dropped first.

use axum::body::Body;
use axum::extract::{MatchedPath, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use platform::client::extract_bearer_token;

use crate::application::PolicyGate;
use crate::domain::entity::claims::{Claims, headers};
use crate::domain::policy::PolicyEnforcer;
use crate::domain::repository::SessionRepository;

/// Route template if the router matched one, otherwise the raw path
fn resource_of(req: &Request<Body>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned())
}

fn strip_identity_headers(headers_map: &mut HeaderMap) {
    for name in [headers::USER_ID, headers::USER_ROLE, headers::SESSION_ID] {
        headers_map.remove(name);
    }
}

fn attach_claims(req: &mut Request<Body>, claims: Claims) {
    for (name, value) in claims.header_pairs() {
        if let Ok(value) = HeaderValue::from_str(&value) {
            req.headers_mut()
                .insert(HeaderName::from_static(name), value);
        }
    }
    req.extensions_mut().insert(claims);
}

/// Authorize the request against the session store and the policy oracle
pub async fn policy_gate<S, P>(
    State(gate): State<PolicyGate<S, P>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    S: SessionRepository + Send + Sync + 'static,
    P: PolicyEnforcer + Send + Sync + 'static,
{
    let resource = resource_of(&req);
    let action = req.method().as_str().to_owned();
    let bearer = extract_bearer_token(req.headers()).map(str::to_owned);

    let claims = match gate.authorize(bearer.as_deref(), &resource, &action).await {
        Ok(claims) => claims,
        Err(e) => return e.into_response(),
    };

    strip_identity_headers(req.headers_mut());

    if let Some(claims) = claims {
        tracing::debug!(
            user_id = %claims.sub,
            session_id = %claims.sid,
            role = claims.role.code(),
            path = %resource,
            method = %action,
            "Request authorized"
        );
        attach_claims(&mut req, claims);
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{SessionId, UserId, user_role::UserRole};

    #[test]
    fn test_strip_and_attach() {
        let mut req = Request::builder()
            .uri("/v1/auth/me")
            .header("x-user-id", "forged")
            .header("x-user-role", "super_admin")
            .body(Body::empty())
            .unwrap();

        strip_identity_headers(req.headers_mut());
        assert!(req.headers().get("x-user-id").is_none());
        assert!(req.headers().get("x-user-role").is_none());

        let claims = Claims::new(UserId::new(), UserRole::Client, SessionId::new(), 0, 10);
        attach_claims(&mut req, claims.clone());

        assert_eq!(
            req.headers().get("x-user-id").unwrap(),
            claims.sub.to_string().as_str()
        );
        assert_eq!(req.headers().get("x-user-role").unwrap(), "client");
        assert_eq!(req.extensions().get::<Claims>(), Some(&claims));
    }

    #[test]
    fn test_resource_falls_back_to_path() {
        let req = Request::builder()
            .uri("/v1/auth/me?x=1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(resource_of(&req), "/v1/auth/me");
    }
}

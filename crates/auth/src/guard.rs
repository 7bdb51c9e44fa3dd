//! Per-request access guard.
//!
//! `Pending -> Authorized | Rejected`. Public routes are authorized without a
//! principal; everything else needs a valid bearer token.

use std::sync::Arc;

use crate::error::AuthError;
use crate::policy::{RouteId, RoutePolicyRegistry};
use crate::principal::Principal;
use crate::token::TokenCodec;

/// Identity attached to an authorized request.
///
/// Holds no principal on public routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    principal: Option<Principal>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}

/// Terminal state of the guard for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Authorized(AuthContext),
    Rejected(AuthError),
}

#[derive(Debug, Clone)]
pub struct AccessGuard {
    registry: Arc<RoutePolicyRegistry>,
    codec: Arc<TokenCodec>,
}

impl AccessGuard {
    pub fn new(registry: Arc<RoutePolicyRegistry>, codec: Arc<TokenCodec>) -> Self {
        Self { registry, codec }
    }

    /// Decide one request.
    ///
    /// `route` is `None` when the request matched no known route; it is then
    /// treated like any other protected route. `authorization` is the raw
    /// `Authorization` header value, if present and valid UTF-8.
    pub fn check(&self, route: Option<&RouteId>, authorization: Option<&str>) -> GuardDecision {
        if route.is_some_and(|route| self.registry.is_public(route)) {
            return GuardDecision::Authorized(AuthContext::anonymous());
        }

        let Some(token) = authorization.and_then(parse_bearer) else {
            return GuardDecision::Rejected(AuthError::MissingToken);
        };

        match self.codec.validate(token) {
            Ok(claims) => GuardDecision::Authorized(AuthContext::authenticated(claims.principal())),
            Err(e) => GuardDecision::Rejected(e),
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively.
pub fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use gatehouse_core::UserId;

    use super::*;
    use crate::clock::{Clock, ManualClock, SystemClock};
    use crate::config::AuthConfig;

    fn alice() -> Principal {
        Principal {
            id: UserId::new(),
            login: "alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    fn codec(secret: &str, clock: Arc<dyn Clock>) -> Arc<TokenCodec> {
        Arc::new(TokenCodec::new(&AuthConfig::new(secret).unwrap(), clock))
    }

    fn guard_with(registry: RoutePolicyRegistry, codec: Arc<TokenCodec>) -> AccessGuard {
        AccessGuard::new(Arc::new(registry), codec)
    }

    fn public_health() -> RoutePolicyRegistry {
        let mut registry = RoutePolicyRegistry::new();
        registry.mark_public(RouteId::get("/health"));
        registry
    }

    #[test]
    fn unregistered_route_without_token_is_rejected() {
        let guard = guard_with(RoutePolicyRegistry::new(), codec("s", Arc::new(SystemClock)));

        let decision = guard.check(Some(&RouteId::get("/whoami")), None);
        assert_eq!(decision, GuardDecision::Rejected(AuthError::MissingToken));
    }

    #[test]
    fn unregistered_route_rejects_garbage_token() {
        let guard = guard_with(RoutePolicyRegistry::new(), codec("s", Arc::new(SystemClock)));

        let decision = guard.check(Some(&RouteId::get("/whoami")), Some("Bearer not.a.jwt"));
        assert_eq!(decision, GuardDecision::Rejected(AuthError::MalformedToken));
    }

    #[test]
    fn explicitly_protected_route_requires_token() {
        let mut registry = RoutePolicyRegistry::new();
        registry.register(RouteId::get("/whoami"), false);
        let guard = guard_with(registry, codec("s", Arc::new(SystemClock)));

        let decision = guard.check(Some(&RouteId::get("/whoami")), None);
        assert_eq!(decision, GuardDecision::Rejected(AuthError::MissingToken));
    }

    #[test]
    fn unmatched_route_is_protected() {
        let guard = guard_with(public_health(), codec("s", Arc::new(SystemClock)));
        assert_eq!(guard.check(None, None), GuardDecision::Rejected(AuthError::MissingToken));
    }

    #[test]
    fn public_route_needs_no_header() {
        let guard = guard_with(public_health(), codec("s", Arc::new(SystemClock)));

        let decision = guard.check(Some(&RouteId::get("/health")), None);
        let GuardDecision::Authorized(context) = decision else {
            panic!("expected public route to be authorized");
        };
        assert_eq!(context.principal(), None);
    }

    #[test]
    fn public_route_ignores_a_bad_token() {
        let guard = guard_with(public_health(), codec("s", Arc::new(SystemClock)));

        let decision = guard.check(Some(&RouteId::get("/health")), Some("Bearer garbage"));
        assert_eq!(decision, GuardDecision::Authorized(AuthContext::anonymous()));
    }

    #[test]
    fn valid_token_attaches_principal() {
        let codec = codec("s", Arc::new(SystemClock));
        let guard = guard_with(public_health(), codec.clone());
        let principal = alice();
        let token = codec.issue(&principal).unwrap();

        let header = format!("Bearer {}", token.as_str());
        let decision = guard.check(Some(&RouteId::get("/whoami")), Some(&header));

        assert_eq!(decision, GuardDecision::Authorized(AuthContext::authenticated(principal)));
    }

    #[test]
    fn foreign_secret_is_rejected_with_signature_error() {
        let guard = guard_with(public_health(), codec("ours", Arc::new(SystemClock)));
        let token = codec("theirs", Arc::new(SystemClock)).issue(&alice()).unwrap();

        let header = format!("Bearer {}", token.as_str());
        let decision = guard.check(Some(&RouteId::get("/whoami")), Some(&header));
        assert_eq!(decision, GuardDecision::Rejected(AuthError::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let codec = codec("s", clock.clone());
        let guard = guard_with(RoutePolicyRegistry::new(), codec.clone());
        let token = codec.issue(&alice()).unwrap();

        clock.advance(Duration::hours(25));
        let header = format!("Bearer {}", token.as_str());
        let decision = guard.check(Some(&RouteId::get("/whoami")), Some(&header));
        assert_eq!(decision, GuardDecision::Rejected(AuthError::TokenExpired));
    }

    #[test]
    fn wrong_scheme_counts_as_missing_token() {
        let codec = codec("s", Arc::new(SystemClock));
        let guard = guard_with(RoutePolicyRegistry::new(), codec.clone());
        let token = codec.issue(&alice()).unwrap();

        let header = format!("Basic {}", token.as_str());
        let decision = guard.check(Some(&RouteId::get("/whoami")), Some(&header));
        assert_eq!(decision, GuardDecision::Rejected(AuthError::MissingToken));
    }

    #[test]
    fn parse_bearer_cases() {
        assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("bearer abc"), Some("abc"));
        assert_eq!(parse_bearer("  Bearer   abc  "), Some("abc"));
        assert_eq!(parse_bearer("Bearer "), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Token abc"), None);
        assert_eq!(parse_bearer(""), None);
    }
}

//! Route policy registry: which routes skip authentication.
//!
//! Populated while the router is composed, then frozen behind an `Arc`.
//! Anything never registered is protected.

use std::collections::HashMap;

/// Route identity: HTTP method plus the router's path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteId {
    method: String,
    path: String,
}

impl RouteId {
    pub fn new(method: impl AsRef<str>, path: impl Into<String>) -> Self {
        Self {
            method: method.as_ref().to_ascii_uppercase(),
            path: path.into(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new("GET", path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new("POST", path)
    }
}

impl core::fmt::Display for RouteId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

#[derive(Debug, Default, Clone)]
pub struct RoutePolicyRegistry {
    entries: HashMap<RouteId, bool>,
}

impl RoutePolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether `route` is public. Re-registering overwrites.
    pub fn register(&mut self, route: RouteId, is_public: bool) -> &mut Self {
        if let Some(previous) = self.entries.insert(route.clone(), is_public) {
            if previous != is_public {
                tracing::debug!(%route, is_public, "route policy overwritten");
            }
        }
        self
    }

    pub fn mark_public(&mut self, route: RouteId) -> &mut Self {
        self.register(route, true)
    }

    /// `false` for any route that was never registered.
    pub fn is_public(&self, route: &RouteId) -> bool {
        self.entries.get(route).copied().unwrap_or(false)
    }

    pub fn public_routes(&self) -> impl Iterator<Item = &RouteId> {
        self.entries
            .iter()
            .filter(|(_, is_public)| **is_public)
            .map(|(route, _)| route)
    }
}

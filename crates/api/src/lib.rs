//! HTTP API: settings, routing, the access-guard middleware and
//! request/response mapping.

pub mod app;
pub mod context;
pub mod middleware;
pub mod settings;

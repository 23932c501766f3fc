//! Employee directory backend.
//!
//! A REST facade over an upstream employee service: records are fetched over
//! HTTP, mirrored into a local store, and served through search and ranking
//! queries. The crate follows a ports-and-adapters layout: `domain` holds
//! types, ports and the query service; `inbound` and `outbound` hold the
//! actix and reqwest/Diesel adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

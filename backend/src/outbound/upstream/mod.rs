//! Upstream employee service adapter.
//!
//! Thin HTTP implementation of the `EmployeeSource` port.

mod dto;
mod http_source;

pub use http_source::{UpstreamAuth, UpstreamHttpSource, UpstreamHttpSourceBuildError};

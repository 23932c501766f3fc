//! Prometheus request metrics, enabled with the `metrics` feature.
//!
//! [`prometheus_metrics`] builds the middleware once at startup; a failure
//! only disables metrics. [`MetricsLayer`] then wraps the app whether or not
//! metrics were built so the app type stays the same in both cases.

use std::sync::Arc;

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

/// Metric name prefix for every exported series.
pub const METRICS_NAMESPACE: &str = "employee_api";
/// Path serving the Prometheus exposition format.
pub const METRICS_ENDPOINT: &str = "/metrics";

/// Build request metrics for the employee API, or `None` when the registry
/// rejects them.
pub fn prometheus_metrics() -> Option<PrometheusMetrics> {
    initialize_metrics(|| {
        PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
            .endpoint(METRICS_ENDPOINT)
            .build()
    })
}

fn initialize_metrics<F, E>(build: F) -> Option<PrometheusMetrics>
where
    F: FnOnce() -> Result<PrometheusMetrics, E>,
    E: std::fmt::Display,
{
    build()
        .inspect_err(|error| warn!(%error, "Prometheus metrics disabled"))
        .ok()
}

/// Middleware that records metrics when configured and passes requests
/// through untouched otherwise.
#[derive(Clone)]
pub(crate) struct MetricsLayer(Option<Arc<PrometheusMetrics>>);

impl From<Option<PrometheusMetrics>> for MetricsLayer {
    fn from(metrics: Option<PrometheusMetrics>) -> Self {
        Self(metrics.map(Arc::new))
    }
}

type BoxedApp = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

impl<S, B> Transform<S, ServiceRequest> for MetricsLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedApp;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Some(metrics) = self.0.clone() else {
            let passthrough = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };
        let recording = Compat::new((*metrics).clone()).new_transform(service);
        Box::pin(async move { Ok(boxed::service(recording.await?)) })
    }
}

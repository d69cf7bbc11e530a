use crate::service::MovieService;
use axum::extract::FromRef;
use error_stack::Report;
use metrics_exporter_prometheus::PrometheusHandle;
use movies_core::MovieEngine;
use routing::metrics::{self, MetricsInitError};
use std::time::Duration;

#[derive(Clone)]
pub struct MovieAppState<E: MovieEngine> {
    pub service: MovieService<E>,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl<E: MovieEngine> MovieAppState<E> {
    /// Installs the process-wide prometheus recorder, so call this at most once per process.
    pub fn new_with_metrics(
        engine: E,
        operation_timeout: Duration,
    ) -> Result<Self, Report<MetricsInitError>> {
        Ok(Self {
            service: MovieService::with_operation_timeout(engine, operation_timeout),
            metrics_handle: Some(metrics::setup_recorder()?),
        })
    }

    pub fn new_without_metrics(engine: E, operation_timeout: Duration) -> Self {
        Self {
            service: MovieService::with_operation_timeout(engine, operation_timeout),
            metrics_handle: None,
        }
    }
}

impl<E: MovieEngine> FromRef<MovieAppState<E>> for MovieService<E> {
    fn from_ref(input: &MovieAppState<E>) -> Self {
        input.service.clone()
    }
}

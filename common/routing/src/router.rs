use std::fmt::Display;

use axum::{
    Router,
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::debug;
use utoipa::openapi::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::ErrorResponse;
use crate::metrics;

const DEFAULT_NOT_FOUND_MESSAGE: &str = "resource not found";
const METRICS_PATH: &str = "/metrics";
const SWAGGER_UI_PATH: &str = "/swagger-ui";
const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

struct Route {
    method: &'static str,
    path: String,
}

impl Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.method, self.path)
    }
}

/// Collects the routes of one resource. Paths given to `get`/`post` are relative to
/// `root_path` and joined verbatim, so `""` is the root itself and `"/"` is the root
/// with a trailing slash. Requests matching no route get a JSON 404.
pub struct RouterBuilder<S> {
    inner: OpenApiRouter<S>,
    root_path: &'static str,
    not_found_message: &'static str,
    routes: Vec<Route>,
}

impl<S> RouterBuilder<S>
where
    S: Send + Sync + Clone + 'static,
{
    pub fn new(root_path: &'static str) -> Self {
        Self {
            inner: OpenApiRouter::new(),
            root_path,
            not_found_message: DEFAULT_NOT_FOUND_MESSAGE,
            routes: Vec::new(),
        }
    }

    pub fn not_found_message(mut self, message: &'static str) -> Self {
        self.not_found_message = message;
        self
    }

    pub fn get<T, F>(mut self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        let path = self.full_path(path);
        self.inner = self.inner.route(&path, get(handler));
        self.routes.push(Route {
            method: "GET",
            path,
        });
        self
    }

    pub fn post<T, F>(mut self, path: &'static str, handler: F) -> Self
    where
        F: Handler<T, S>,
        T: 'static,
    {
        let path = self.full_path(path);
        self.inner = self.inner.route(&path, post(handler));
        self.routes.push(Route {
            method: "POST",
            path,
        });
        self
    }

    pub fn build_no_metrics(self, app_state: S, api_doc: OpenApi) -> Router {
        self.log_routes();
        let not_found_message = self.not_found_message;
        let main_router = self.inner.route(
            METRICS_PATH,
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Metrics endpoint is disabled. Metrics must be enabled and the service restarted",
                )
            }),
        );
        build(main_router, app_state, api_doc, not_found_message)
    }

    pub fn build_with_metrics(
        self,
        app_state: S,
        api_doc: OpenApi,
        metrics_handle: PrometheusHandle,
    ) -> Router {
        self.log_routes();
        let not_found_message = self.not_found_message;

        let main_router = self
            .inner
            .route(METRICS_PATH, get(|| async move { metrics_handle.render() }))
            .route_layer(middleware::from_fn(metrics::track_http));

        build(main_router, app_state, api_doc, not_found_message)
    }

    fn full_path(&self, path: &str) -> String {
        format!("{}{}", self.root_path, path)
    }

    fn log_routes(&self) {
        for route in &self.routes {
            debug!("Building route - {route}")
        }
    }
}

fn build<S>(
    main_router: OpenApiRouter<S>,
    app_state: S,
    api_doc: OpenApi,
    not_found_message: &'static str,
) -> Router
where
    S: Send + Sync + Clone + 'static,
{
    let main_routes = main_router.with_state(app_state);
    let (router, api) = OpenApiRouter::with_openapi(api_doc)
        .merge(main_routes)
        .split_for_parts();

    router
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, api))
        .fallback(move || async move { ErrorResponse::not_found(not_found_message) })
}

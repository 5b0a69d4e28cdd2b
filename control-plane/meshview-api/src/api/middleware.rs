use crate::api::extractors::QueryParams;
use axum::http::Request;
use tower::{
    ServiceBuilder,
    layer::util::{Identity, Stack},
};
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    trace::{MakeSpan, TraceLayer},
};
use tracing::{Span, info_span};

/// Request span carrying the route and the cluster the caller asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeApiSpan;

impl<B> MakeSpan<B> for MakeApiSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let params = QueryParams::from_uri(request.uri());
        info_span!(
            "api_request",
            method = %request.method(),
            path = %request.uri().path(),
            cluster = params.get("cluster").unwrap_or(""),
        )
    }
}

pub type ApiTraceLayer =
    TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeApiSpan>;

pub fn create_middleware_stack()
-> ServiceBuilder<Stack<CorsLayer, Stack<ApiTraceLayer, Identity>>> {
    ServiceBuilder::new()
        .layer(TraceLayer::new_for_http().make_span_with(MakeApiSpan))
        .layer(CorsLayer::permissive())
}

//! Access log over `tower_http::trace`: compact in production, verbose otherwise.

use crate::config::RunMode;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, HttpMakeClassifier, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

pub fn access_log(
    mode: RunMode,
) -> TraceLayer<HttpMakeClassifier, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse> {
    let verbose = !mode.is_production();
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(verbose))
        .on_request(DefaultOnRequest::new().level(if verbose { Level::INFO } else { Level::DEBUG }))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .include_headers(verbose)
                .latency_unit(if verbose { LatencyUnit::Micros } else { LatencyUnit::Millis }),
        )
}

use crate::api::AppState;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

/// GET /api/metrics
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                "Metrics not enabled".to_string(),
            )
        },
        |handle| {
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
                handle.render(),
            )
        },
    )
}

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// The `request` span opened by [`logging_middleware`], handed to inner
/// layers so they record fields on it rather than on whatever span is current.
#[derive(Clone)]
pub struct RequestSpan(pub tracing::Span);

impl RequestSpan {
    /// The logging span when the request carries one, else the current span.
    pub fn of(req: &Request) -> tracing::Span {
        req.extensions()
            .get::<Self>()
            .map_or_else(tracing::Span::current, |span| span.0.clone())
    }
}

/// Opens a `request` span per call, logs one finished event and records
/// the HTTP counters and latency histogram.
pub async fn logging_middleware(mut req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().to_string();
    let uri = req.uri().path().to_string();

    let matched_path = req
        .extensions()
        .get::<axum::extract::MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri,
        route = matched_path.clone(),
        user_id = tracing::field::Empty,
    );

    req.extensions_mut().insert(RequestSpan(span.clone()));

    async move {
        let response = next.run(req).await;

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status().as_u16();

        let outcome = match status {
            500.. => "error",
            400..=499 => "client_error",
            300..=399 => "redirect",
            _ => "success",
        };

        // Matched route keeps label cardinality bounded
        let metrics_path = matched_path.as_deref().unwrap_or("unmatched");

        let labels = [
            ("method", method.clone()),
            ("path", metrics_path.to_string()),
            ("status", status.to_string()),
        ];

        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms = duration_ms,
            status_code = status,
            outcome = %outcome,
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;
    use tower_http::trace::TraceLayer;
    use tracing::subscriber::DefaultGuard;

    fn debug_subscriber() -> DefaultGuard {
        tracing::subscriber::set_default(
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .with_test_writer()
                .finish(),
        )
    }

    fn declares_user_id(span: &tracing::Span) -> bool {
        span.metadata()
            .is_some_and(|meta| meta.fields().field("user_id").is_some())
    }

    async fn user_id_target(req: Request) -> StatusCode {
        let request_span = RequestSpan::of(&req);
        if declares_user_id(&request_span) && !declares_user_id(&tracing::Span::current()) {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    #[tokio::test]
    async fn inner_layers_reach_the_logging_span() {
        let _guard = debug_subscriber();
        let app = Router::new()
            .route("/whoami", get(user_id_target))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(logging_middleware));

        let response = app
            .oneshot(Request::builder().uri("/whoami").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn falls_back_to_current_span_without_extension() {
        let _guard = debug_subscriber();
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let outer = tracing::info_span!("outer", user_id = tracing::field::Empty);
        let _entered = outer.enter();
        assert!(outer.id().is_some());
        assert_eq!(RequestSpan::of(&req).id(), outer.id());
    }
}

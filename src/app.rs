use std::net::SocketAddr;

use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{auth, error::ApiError, measurements, state::AppState};

pub fn build_app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(measurements::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    let api = Router::new()
        .merge(auth::public_router())
        .route("/health", get(|| async { "ok" }))
        .merge(protected)
        .fallback(api_not_found)
        .layer(middleware::map_response(method_not_allowed_as_not_found));

    Router::new()
        .nest("/api", api)
        .fallback(frontend)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound
}

/// A known API path hit with the wrong method is answered like an unknown route.
async fn method_not_allowed_as_not_found(res: Response) -> Response {
    if res.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::NotFound.into_response();
    }
    res
}

/// Static bundle with `index.html` as the single-page-app fallback.
async fn frontend(State(state): State<AppState>, req: Request) -> Response {
    if !matches!(*req.method(), Method::GET | Method::HEAD) {
        return ApiError::NotFound.into_response();
    }
    let dir = &state.config.frontend_dir;
    let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
    match spa.oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

//! Route table, middleware stack and server loop.
//!
//! # Responsibility
//! - Register the book routes plus the static index and identity endpoints.
//! - Apply cross-origin policy, request logging and panic recovery.
//! - Serve until Ctrl+C.

use crate::handlers::{self, AppState};
use axum::extract::Request;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bookshelf_core::{core_version, BookRepository, BookService};
use log::{error, info};
use serde_json::{json, Value};
use std::any::Any;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Fixed listening port.
pub const LISTEN_PORT: u16 = 5000;

/// Browser origins allowed to call the API with credentials.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

const ENDPOINTS: [&str; 6] = [
    "GET /books",
    "GET /books/:id",
    "POST /books",
    "PUT /books/:id",
    "DELETE /books/:id",
    "GET /abarca",
];

/// Builds the full application router around `service`.
pub fn build_router<R: BookRepository + 'static>(service: BookService<R>) -> Router {
    let books = Router::new()
        .route(
            "/books",
            get(handlers::list_books::<R>).post(handlers::create_book::<R>),
        )
        .route(
            "/books/:id",
            get(handlers::get_book::<R>)
                .put(handlers::update_book::<R>)
                .delete(handlers::delete_book::<R>),
        )
        .with_state(AppState::new(service));

    let app = Router::new()
        .route("/", get(index))
        .route("/abarca", get(identity))
        .merge(books);

    with_middleware(app)
}

/// Wraps `router` in panic recovery, request logging and CORS, innermost first.
fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(log_request))
        .layer(cors_layer())
}

/// Serves `router` on `listener` until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(
        "event=server_start module=http status=ok address={} url=http://localhost:{}",
        addr,
        addr.port()
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=http status=ok");
    Ok(())
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .into_iter()
        .map(HeaderValue::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE)
}

fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    // The process panic hook already logged the payload and location.
    error!("event=http_panic module=http status=error error_code=handler_panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "internal server error"})),
    )
        .into_response()
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Books API is running",
        "version": core_version(),
        "endpoints": ENDPOINTS,
    }))
}

async fn identity() -> Json<Value> {
    Json(json!({
        "nombre_completo": "Wilver De Jesús Abarca Sánchez",
    }))
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http method={} path={} http_status={} duration_ms={}",
        method,
        path,
        response.status().as_u16(),
        started_at.elapsed().as_millis()
    );
    response
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            "event=server_stop module=http status=error error_code=signal_handler_failed error={}",
            err
        );
        std::future::pending::<()>().await;
    }
    info!("event=shutdown_signal module=http status=ok");
}

#[cfg(test)]
mod tests {
    use super::with_middleware;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("handler exploded");
    }

    #[tokio::test]
    async fn handler_panic_becomes_json_internal_error() {
        let router = with_middleware(Router::new().route("/explode", get(explode)));
        let request = Request::builder()
            .uri("/explode")
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "internal server error"}));
    }
}

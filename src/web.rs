use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::{RenderOutcome, Renderer};
use crate::loader::{parse_trip, read_source};

pub fn router(renderer: Arc<Renderer>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = renderer.config().server.static_dir.clone();

    Router::new()
        .route("/", get(index))
        .route("/data.json", get(trip_data))
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(renderer)
}

/// Fresh render per request
async fn index(State(renderer): State<Arc<Renderer>>) -> Response {
    match renderer.render().await {
        RenderOutcome::Rendered { html, .. } => Html(html).into_response(),
        RenderOutcome::LoadFailed { html } => {
            (StatusCode::SERVICE_UNAVAILABLE, Html(html)).into_response()
        }
    }
}

/// The document as stored, served only when it would also render
async fn trip_data(State(renderer): State<Arc<Renderer>>) -> Response {
    let source = renderer.source();
    let served = match read_source(&source, renderer.http()).await {
        Ok(body) => parse_trip(&body).map(|_| body),
        Err(e) => Err(e),
    };

    match served {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => {
            tracing::warn!("Serving trip data from {} failed: {}", source, e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn run(renderer: Renderer, port: u16) -> anyhow::Result<()> {
    let app = router(Arc::new(renderer));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await?;
    Ok(())
}

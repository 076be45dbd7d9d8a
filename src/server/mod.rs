use axum::extract::State;
use axum::http::{Method, Uri};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::profile::DetailAssembler;

pub mod api;
pub mod routes;

/// Every request goes through the [routes::route_request] table; axum only supplies
/// transport, shared state and request tracing.
pub fn router(assembler: DetailAssembler) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(assembler)
        .layer(TraceLayer::new_for_http())
}

async fn dispatch(
    State(assembler): State<DetailAssembler>,
    method: Method,
    uri: Uri,
) -> routes::HttpResponse {
    routes::route_request(&assembler, method.as_str(), uri.path()).await
}

pub async fn run_server(bind_addr: &str, assembler: DetailAssembler) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("dexprofile server listening on http://{bind_addr}");
    axum::serve(listener, router(assembler)).await
}

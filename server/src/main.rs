mod api;
mod sessions;
mod web;

use axum::extract::{DefaultBodyLimit, MatchedPath};
use axum::http::Request;
use axum::routing::get;
use axum::Router;
use platelens_core::llm::{create_provider_from_env, VisionProvider};
use platelens_core::MAX_FILE_SIZE;
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::Span;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa_swagger_ui::SwaggerUi;

use sessions::SessionStore;

/// Application state shared across all handlers
pub type AppState = Arc<ServerState>;

pub struct ServerState {
    pub sessions: SessionStore,
    pub provider: Box<dyn VisionProvider>,
}

fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() {
    init_telemetry();

    // Fail at startup, not on the first upload, if the provider is unusable
    let provider = create_provider_from_env().expect("vision provider must be configured");
    tracing::info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        "Vision provider configured"
    );

    let state: AppState = Arc::new(ServerState {
        sessions: SessionStore::default(),
        provider,
    });

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = Router::new()
        .route("/", get(web::index))
        .nest("/api/sessions", api::sessions::router())
        .merge(swagger_ui)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 1024 * 1024))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &Span| {
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        );

    let bind_addr = env::var("PLATELENS_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    tracing::info!("Server listening on {}", listener.local_addr().unwrap());
    tracing::info!("Swagger UI available at http://localhost:3000/swagger-ui/");
    tracing::info!("OpenAPI spec available at http://localhost:3000/api-docs/openapi.json");

    axum::serve(listener, app).await.unwrap();
}

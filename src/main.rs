use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stub_serving::api::{routes, ServingState};
use stub_serving::backend::{BackendConfig, ModelBackend, StubBackend};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stub_serving=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // A failed load keeps the server up with the model unready, the way
    // a host runtime keeps a broken model out of rotation.
    let backend: Option<Arc<dyn ModelBackend>> =
        match StubBackend::initialize(BackendConfig::default()).await {
            Ok(backend) => Some(Arc::new(backend)),
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize stub backend");
                None
            }
        };
    let state = Arc::new(ServingState::new(backend));

    let app = Router::new()
        .route(
            "/v2/models/:model/versions/:version/ready",
            get(routes::model_ready),
        )
        .route(
            "/v2/models/:model/versions/:version/infer",
            post(routes::infer),
        )
        .with_state(state);

    let listener = TcpListener::bind("0.0.0.0:8000").await.unwrap();
    tracing::debug!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}

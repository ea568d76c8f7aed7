use std::env;
use std::sync::Arc;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use solace_auth::client::AuthClient;
use solace_auth::session::{JwtSession, SessionProvider};
use solace_store::postgrest::PostgrestStore;
use solace_store::record::RecordStore;

mod error;
mod middleware;
mod observer;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let backend_url =
        env::var("SOLACE_BACKEND_URL").map_err(|_| eyre::eyre!("SOLACE_BACKEND_URL is not set"))?;
    let api_key =
        env::var("SOLACE_API_KEY").map_err(|_| eyre::eyre!("SOLACE_API_KEY is not set"))?;
    let bind = env::var("SOLACE_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let store: Arc<dyn RecordStore> = Arc::new(PostgrestStore::new(&backend_url, &api_key));

    // With the project JWT secret configured, sessions are validated locally;
    // otherwise every request round-trips to the auth service.
    let sessions: Arc<dyn SessionProvider> = match env::var("SOLACE_JWT_SECRET") {
        Ok(secret) => Arc::new(JwtSession::new(secret.into_bytes())),
        Err(_) => Arc::new(AuthClient::new(&backend_url, &api_key)),
    };

    let app_state = AppState { store, sessions };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route("/journal/mood", post(routes::journal::log_mood))
        .route("/journal/sleep", post(routes::journal::log_sleep))
        .route("/assignments", get(routes::assignments::list_assigned))
        .route("/assignments/{id}", get(routes::assignments::load_test))
        .route(
            "/assignments/{id}/submit",
            post(routes::assignments::submit_test),
        )
        .layer(axum_mw::from_fn_with_state(
            app_state.clone(),
            middleware::auth::require_auth,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(app_state);

    tracing::info!(%bind, "starting solace-api");
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

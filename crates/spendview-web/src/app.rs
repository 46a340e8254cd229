use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tera::Tera;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::handlers::{self, AppState};

/// Load page templates, from the configured directory or the bundled ones.
pub fn load_templates(config: &ServerConfig) -> tera::Result<Tera> {
    let mut tera = match &config.templates_dir {
        Some(dir) => Tera::new(&format!("{}/**/*", dir.display()))?,
        None => Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))?,
    };
    tera.autoescape_on(vec![".html"]);
    Ok(tera)
}

/// Build the router with all routes and the static file service.
pub fn build_router(state: Arc<AppState>) -> Router {
    // The chart lives in the configured static dir; bundled assets are the fallback.
    let static_files = ServeDir::new(&state.config.static_dir)
        .fallback(ServeDir::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")));

    Router::new()
        .route("/", get(handlers::home))
        .route("/report", post(handlers::report))
        .route("/api/files", get(handlers::api_files))
        .route("/api/report/:file", get(handlers::api_report))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

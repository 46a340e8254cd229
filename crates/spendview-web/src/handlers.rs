use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::Context as _;
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use spendview_core::{
    analyze, day_month_year, list_available_files, resolve_selection, AnalysisError,
    AnalysisResult,
};
use tera::{Context, Tera};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::{ServerConfig, CHART_FILE_NAME};
use crate::models::{ApiError, HomeQuery, ReportForm, ReportView};

/// Flash shown when the form is posted without a file.
pub const SELECT_FILE_MESSAGE: &str = "Please select a CSV file.";

/// Flash shown for any failure while building a report.
pub const PROCESS_FAILED_MESSAGE: &str = "Failed to process file. Please check the format.";

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    pub tera: Tera,
    /// Serializes report generation; every report writes the same chart file.
    pub report_lock: Mutex<()>,
    /// Bumped on every rendered chart, used to bust browser caches.
    pub chart_generation: AtomicU64,
}

impl AppState {
    pub fn new(config: ServerConfig, tera: Tera) -> Self {
        Self {
            config,
            tera,
            report_lock: Mutex::new(()),
            chart_generation: AtomicU64::new(0),
        }
    }
}

/// Redirect to the home page with a one-shot message.
fn flash_redirect(message: &str) -> Response {
    Redirect::to(&format!("/?flash={}", urlencoding::encode(message))).into_response()
}

fn render(tera: &Tera, template: &str, context: &Context) -> Response {
    match tera.render(template, context) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            warn!(template, error = ?e, "template rendering failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<h1>Template Error</h1><p>{e}</p>")),
            )
                .into_response()
        }
    }
}

/// Run the analysis for one resolved statement path.
///
/// Holds the report lock until the chart is written so concurrent requests
/// never interleave writes to it. Also returns the generation number of the
/// chart this run drew.
async fn run_analysis(
    state: &Arc<AppState>,
    path: PathBuf,
) -> anyhow::Result<(AnalysisResult, u64)> {
    let options = state.config.analysis_options();
    let _report_guard = state.report_lock.lock().await;

    let result = tokio::task::spawn_blocking(move || analyze(&path, &options))
        .await
        .context("analysis task panicked")??;

    let generation = state.chart_generation.fetch_add(1, Ordering::Relaxed) + 1;
    Ok((result, generation))
}

fn log_failure(file: &str, err: &anyhow::Error) {
    let stage = err
        .downcast_ref::<AnalysisError>()
        .map_or("task", AnalysisError::stage);
    warn!(file, stage, error = %format!("{err:#}"), "report generation failed");
}

/// Handler for the home page: statement picker plus any flash message.
pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HomeQuery>,
) -> Response {
    let mut context = Context::new();

    match list_available_files(&state.config.transactions_dir, &day_month_year) {
        Ok(entries) => {
            let files: Vec<String> = entries.into_iter().map(|e| e.name).collect();
            context.insert("csv_files", &files);
        }
        Err(e) => {
            warn!(error = %e, "could not list statements");
            context.insert("csv_files", &Vec::<String>::new());
            context.insert("catalog_error", "The transactions folder could not be read.");
        }
    }
    context.insert("flash", &query.flash.filter(|f| !f.is_empty()));

    render(&state.tera, "home.html", &context)
}

/// Handler for the report form.
pub async fn report(State(state): State<Arc<AppState>>, Form(form): Form<ReportForm>) -> Response {
    let Some(file) = form.csv_file.filter(|f| !f.trim().is_empty()) else {
        return flash_redirect(SELECT_FILE_MESSAGE);
    };

    let path = match resolve_selection(&state.config.transactions_dir, &file) {
        Ok(path) => path,
        Err(e) => {
            warn!(file = %file, error = %e, "rejected statement selection");
            return flash_redirect(PROCESS_FAILED_MESSAGE);
        }
    };

    let (result, generation) = match run_analysis(&state, path).await {
        Ok(ran) => ran,
        Err(e) => {
            log_failure(&file, &e);
            return flash_redirect(PROCESS_FAILED_MESSAGE);
        }
    };

    info!(
        file = %file,
        transactions = result.transactions.len(),
        dropped = result.dropped_rows,
        "report generated"
    );

    let chart_url = format!("/static/{CHART_FILE_NAME}?v={generation}");
    let view = ReportView::new(&file, result, chart_url);

    let mut context = Context::new();
    context.insert("report", &view);
    render(&state.tera, "report.html", &context)
}

/// API: statement file names in catalog order.
pub async fn api_files(State(state): State<Arc<AppState>>) -> Response {
    match list_available_files(&state.config.transactions_dir, &day_month_year) {
        Ok(entries) => {
            let files: Vec<String> = entries.into_iter().map(|e| e.name).collect();
            Json(files).into_response()
        }
        Err(e) => {
            warn!(error = %e, "could not list statements");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: "Could not list statements.".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// API: full analysis of one statement as JSON.
pub async fn api_report(
    State(state): State<Arc<AppState>>,
    AxumPath(file): AxumPath<String>,
) -> Response {
    let path = match resolve_selection(&state.config.transactions_dir, &file) {
        Ok(path) => path,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError {
                    error: e.to_string(),
                }),
            )
                .into_response();
        }
    };

    match run_analysis(&state, path).await {
        Ok((result, _)) => Json(result).into_response(),
        Err(e) => {
            log_failure(&file, &e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiError {
                    error: PROCESS_FAILED_MESSAGE.to_string(),
                }),
            )
                .into_response()
        }
    }
}

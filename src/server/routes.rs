//! HTTP routes
//!
//! Page routes render or redirect back to the page; every control on the
//! page is a plain form or link. API routes return JSON.

use crate::app::PageState;
use crate::error::Error;
use crate::geo::{GeoClient, LocationRecord};
use crate::server::state::AppState;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Where the rendered page lives after a state-changing request
const PAGE_PATH: &str = "/page";

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(load_handler))
        .route(PAGE_PATH, get(page_handler))
        .route("/search", post(search_handler))
        .route("/input", post(input_handler))
        .route("/dark-mode", post(dark_mode_handler))
        .route("/history/select", get(history_select_handler))
        .route("/history/remove", post(history_remove_handler))
        .route("/history/clear", post(history_clear_handler))
        .route("/api/lookup", get(lookup_handler))
        .route("/api/history", get(history_handler))
        .route("/api/state", get(state_handler))
        .nest_service("/static", ServeDir::new(static_dir()))
        .with_state(state)
}

/// Locate the stylesheet directory
///
/// Tries relative to cwd first, then next to the executable
fn static_dir() -> PathBuf {
    let local = PathBuf::from("static");
    if local.exists() {
        return local;
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
        .filter(|path| path.exists())
        .unwrap_or(local)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

type ApiResult<T> = std::result::Result<T, (StatusCode, Json<ApiError>)>;

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::Lookup(_) => "LOOKUP_ERROR",
            Error::Store(_) => "STORE_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

fn failure(err: Error) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        Error::Lookup(_) | Error::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiError::from(err)))
}

/// Address field submitted by forms and links
#[derive(Debug, Deserialize)]
pub struct IpForm {
    #[serde(default)]
    pub ip: String,
}

/// Page load: discover, look up and render
///
/// GET /
async fn load_handler(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    state.controller.load().await.map_err(failure)?;
    state.render().await.map(Html).map_err(failure)
}

/// Render the current state without any lookup
///
/// GET /page
async fn page_handler(State(state): State<Arc<AppState>>) -> ApiResult<Html<String>> {
    state.render().await.map(Html).map_err(failure)
}

/// POST /search
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IpForm>,
) -> ApiResult<Redirect> {
    state.controller.search(&form.ip).await.map_err(failure)?;
    Ok(Redirect::to(PAGE_PATH))
}

/// Input edits hide the error banner
///
/// POST /input
async fn input_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IpForm>,
) -> StatusCode {
    state.controller.edit_input(&form.ip).await;
    StatusCode::NO_CONTENT
}

/// POST /dark-mode
async fn dark_mode_handler(State(state): State<Arc<AppState>>) -> ApiResult<Redirect> {
    state.controller.toggle_dark_mode().await.map_err(failure)?;
    Ok(Redirect::to(PAGE_PATH))
}

/// GET /history/select?ip=
async fn history_select_handler(
    State(state): State<Arc<AppState>>,
    Query(form): Query<IpForm>,
) -> ApiResult<Redirect> {
    state.controller.select_history(&form.ip).await.map_err(failure)?;
    Ok(Redirect::to(PAGE_PATH))
}

/// POST /history/remove
async fn history_remove_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<IpForm>,
) -> ApiResult<Redirect> {
    state.controller.remove_history(&form.ip).await.map_err(failure)?;
    Ok(Redirect::to(PAGE_PATH))
}

/// POST /history/clear
async fn history_clear_handler(State(state): State<Arc<AppState>>) -> ApiResult<Redirect> {
    state.controller.clear_history().await.map_err(failure)?;
    Ok(Redirect::to(PAGE_PATH))
}

/// Lookup query; without `ip` the caller's own address is used
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub ip: Option<String>,
}

/// Look up an address without touching page state or history
///
/// GET /api/lookup
async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LookupQuery>,
) -> ApiResult<Json<LocationRecord>> {
    let client = state.controller.client();
    let ip = match query.ip {
        Some(ip) => ip,
        None => client.discover_self_ip().await.map_err(failure)?,
    };

    client.lookup(&ip).await.map(Json).map_err(failure)
}

/// History list response
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub entries: Vec<String>,
    pub count: usize,
}

/// GET /api/history
async fn history_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<HistoryResponse>> {
    let history = state.controller.history().await.map_err(failure)?;
    let count = history.len();

    Ok(Json(HistoryResponse {
        entries: history.into_entries(),
        count,
    }))
}

/// GET /api/state
async fn state_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let page: PageState = state.controller.page().await;
    Json(page)
}

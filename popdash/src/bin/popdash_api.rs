use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use popdash::io::sources::load_sources;
use popdash::io::svg::render_svg;
use popdash::{AgeChart, ChartConfig, DashboardEvent, UpdateOutcome};

#[derive(Clone)]
struct AppState {
    /// `None` when the panel data failed to load; the panel then stays unrendered.
    chart: Option<Arc<Mutex<AgeChart>>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data_dir = PathBuf::from(std::env::var("POPDASH_DATA_DIR").unwrap_or_else(|_| "assets".to_string()));
    let cfg = match std::env::var("POPDASH_CONFIG") {
        Ok(path) => ChartConfig::from_json_file(&path)?,
        Err(_) => ChartConfig::default(),
    };

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8000);

    // CSV parsing is blocking work; keep it off the runtime threads.
    let join = tokio::task::spawn_blocking(move || load_panel(data_dir, cfg));
    let chart = match join.await.context("panel load task failed")? {
        Ok(chart) => Some(Arc::new(Mutex::new(chart))),
        Err(e) => {
            error!("age-structure panel failed to initialize: {e:#}");
            None
        }
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/state", get(state))
        .route("/chart", get(chart_json))
        .route("/chart.svg", get(chart_svg))
        .route("/events", post(events))
        .with_state(AppState { chart });

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("invalid HOST/PORT: {}:{}", host, port))?;
    info!("popdash-api listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind failed on {addr}"))?;
    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}

fn load_panel(data_dir: PathBuf, cfg: ChartConfig) -> anyhow::Result<AgeChart> {
    let data = load_sources(&data_dir, &cfg)?;
    let mut chart = AgeChart::from_panel_data(data, cfg)?;
    chart.update();
    Ok(chart)
}

fn not_ready() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"error": "age-structure panel is not initialized"})),
    )
        .into_response()
}

async fn healthz(State(st): State<AppState>) -> impl IntoResponse {
    Json(json!({"ok": true, "panel_ready": st.chart.is_some()}))
}

async fn state(State(st): State<AppState>) -> Response {
    let Some(chart) = st.chart else { return not_ready() };
    let chart = chart.lock();
    Json(json!({
        "selection": chart.selection(),
        "stacked_enabled": chart.stacked_enabled(),
        "provinces": chart.provinces(),
        "generation": chart.animator().generation(),
    }))
    .into_response()
}

async fn chart_json(State(st): State<AppState>) -> Response {
    let Some(chart) = st.chart else { return not_ready() };
    let mut chart = chart.lock();
    if let Some(frame) = chart.last_frame() {
        return Json(UpdateOutcome::Rendered(Box::new(frame.clone()))).into_response();
    }
    Json(chart.update()).into_response()
}

async fn chart_svg(State(st): State<AppState>) -> Response {
    let Some(chart) = st.chart else { return not_ready() };
    let chart = chart.lock();
    match chart.last_frame() {
        Some(frame) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/svg+xml")],
            render_svg(frame, &chart.config().margins),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"error": "nothing rendered yet"}))).into_response(),
    }
}

async fn events(State(st): State<AppState>, Json(event): Json<DashboardEvent>) -> Response {
    let Some(chart) = st.chart else { return not_ready() };
    let outcome = chart.lock().dispatch(event);
    (StatusCode::OK, Json(outcome)).into_response()
}

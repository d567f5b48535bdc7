//! Route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use super::AppState;
use crate::coach::{ChatReply, ChatRequest, TurnAnalysis};
use crate::triage::transition::{suggest_handoff, transition_message, Handoff, PanelSignal};
use crate::types::Mode;

/// `GET /api/health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` when the process answers.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// `provider/model` spec in use.
    pub model: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model: state.coach.model_id().to_owned(),
        timestamp: Utc::now(),
    })
}

/// One entry of `GET /api/modes`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeInfo {
    /// Wire identifier.
    pub id: Mode,
    /// Turkish display name.
    pub name: &'static str,
    /// Badge icon.
    pub icon: &'static str,
    /// Badge colour.
    pub color: &'static str,
    /// Priority rank, 1 = highest.
    pub priority: u8,
    /// Announcement sentence used on entry.
    pub transition_message: &'static str,
}

/// Every mode in priority order.
pub fn mode_catalogue() -> Vec<ModeInfo> {
    Mode::ALL
        .iter()
        .map(|&mode| ModeInfo {
            id: mode,
            name: mode.display_name(),
            icon: mode.icon(),
            color: mode.color(),
            priority: mode.priority(),
            transition_message: transition_message(mode),
        })
        .collect()
}

pub(super) async fn modes() -> Json<Vec<ModeInfo>> {
    Json(mode_catalogue())
}

pub(super) async fn triage(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<TurnAnalysis>, AppError> {
    let Json(request) = payload?;
    Ok(Json(state.coach.prepare(&request).analysis))
}

pub(super) async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload?;
    let reply = state.coach.respond(request).await?;
    Ok(Json(reply))
}

/// `POST /api/handoff` body.
#[derive(Debug, Deserialize)]
pub struct HandoffRequest {
    /// Panel the student is in.
    pub current: Mode,
    /// What the UI observed.
    pub signal: PanelSignal,
}

/// `POST /api/handoff` reply; `handoff` is null when the student stays put.
#[derive(Debug, Serialize)]
pub struct HandoffResponse {
    /// Suggested move, if any.
    pub handoff: Option<Handoff>,
}

pub(super) async fn handoff(
    payload: Result<Json<HandoffRequest>, JsonRejection>,
) -> Result<Json<HandoffResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(HandoffResponse {
        handoff: suggest_handoff(request.current, request.signal),
    }))
}

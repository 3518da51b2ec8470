//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::{
        http::{HealthDto, RoomSummaryDto},
        websocket::RoomSnapshotDto,
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
        rooms: state.get_rooms_usecase.count_rooms().await,
        connections: state.gateway.count_connections().await,
    })
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.list().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get the full snapshot of one room
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomSnapshotDto>, StatusCode> {
    match state.get_rooms_usecase.get(&room_id).await {
        Some(snapshot) => Ok(Json(RoomSnapshotDto::from(&snapshot))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

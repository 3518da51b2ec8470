//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::GamePhaseDto;

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Number of live rooms
    pub rooms: usize,
    /// Number of open WebSocket connections
    pub connections: usize,
}

/// Room summary for the room list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub category_id: String,
    pub game_phase: GamePhaseDto,
    /// Player ids in join order
    pub players: Vec<String>,
    /// RFC 3339
    pub created_at: String,
}

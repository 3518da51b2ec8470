//! Players and leaderboard rows.

use super::value_object::{ConnectionId, PlayerId, PlayerName, Timestamp};

/// A player seated in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    /// Connection the player's messages are delivered to
    pub connection: ConnectionId,
    pub joined_at: Timestamp,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: PlayerName,
        connection: ConnectionId,
        joined_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            connection,
            joined_at,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub player_name: PlayerName,
    pub score: u32,
}

//! Session registry trait.
//!
//! Maps room ids to live rooms and connections to seated players. The
//! registry owns room lifecycle: a room exists only while at least one player
//! is seated in it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    error::RoomError,
    player::Player,
    room::{JoinKind, Room, RoomSnapshot},
    value_object::{CategoryId, ConnectionId, PlayerId, RoomId, Timestamp},
};

/// A room guarded by its own lock. All mutations of one room are serialized
/// through it.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Everything needed to seat a player.
#[derive(Debug, Clone)]
pub struct JoinRequest {
    pub room_id: RoomId,
    pub category_id: CategoryId,
    pub player: Player,
}

/// What a successful join changed.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// The room the player is now seated in
    pub room: SharedRoom,
    pub player: Player,
    pub kind: JoinKind,
    /// The room did not exist before this join
    pub room_created: bool,
    /// An existing room was reset because the join named another category
    pub category_reset: bool,
    pub snapshot: RoomSnapshot,
    /// Connections seated in the room after the join (joiner included)
    pub room_connections: Vec<ConnectionId>,
    /// Set when the connection was seated in another room and left it first
    pub left_previous: Option<LeaveOutcome>,
}

/// What removing a player changed.
#[derive(Debug, Clone)]
pub struct LeaveOutcome {
    pub room_id: RoomId,
    /// The room that was left (empty once destroyed)
    pub room: SharedRoom,
    pub player: Player,
    /// Snapshot of the room after removal, `None` if the room was destroyed
    pub remaining: Option<RoomSnapshot>,
    /// Connections still seated in the room
    pub remaining_connections: Vec<ConnectionId>,
}

impl LeaveOutcome {
    pub fn room_destroyed(&self) -> bool {
        self.remaining.is_none()
    }
}

#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// Fetch a room, creating it with `category_id` if absent. An existing
    /// room with another category is reset to that category.
    async fn get_or_create(
        &self,
        room_id: &RoomId,
        category_id: &CategoryId,
        now: Timestamp,
    ) -> SharedRoom;

    async fn get(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// Drop a room. Returns whether it existed.
    async fn remove(&self, room_id: &RoomId) -> bool;

    /// Index `connection` as the handle of `player_id` seated in `room_id`.
    async fn track_connection(&self, player_id: &PlayerId, room_id: &RoomId, connection: ConnectionId);

    async fn untrack_connection(&self, connection: &ConnectionId);

    async fn find_room_and_player_by_connection(
        &self,
        connection: &ConnectionId,
    ) -> Option<(SharedRoom, Player)>;

    /// Seat a player atomically: create/reset the room, add the player and
    /// track the connection. A rejected join changes nothing.
    async fn join(&self, request: JoinRequest, now: Timestamp) -> Result<JoinOutcome, RoomError>;

    /// Remove whichever player `connection` is tracked for, destroying the
    /// room if it becomes empty. `None` if the connection is not seated.
    async fn leave_by_connection(&self, connection: &ConnectionId) -> Option<LeaveOutcome>;

    async fn rooms(&self) -> Vec<SharedRoom>;

    async fn count_rooms(&self) -> usize;

    /// Number of connections currently seated in some room.
    async fn count_tracked_connections(&self) -> usize;
}

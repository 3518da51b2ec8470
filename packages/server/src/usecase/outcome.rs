//! UseCase の結果型

use crate::domain::{ConnectionId, Room, RoomSnapshot, SharedRoom};

/// Room 全体に配信する状態
#[derive(Debug, Clone)]
pub struct RoomBroadcast {
    /// 配信時に最新の状態を読み直すための Room
    pub room: SharedRoom,
    /// 操作後の Room のスナップショット
    pub snapshot: RoomSnapshot,
    /// 配信先（Room に参加中の接続）
    pub targets: Vec<ConnectionId>,
}

impl RoomBroadcast {
    pub fn of(handle: &SharedRoom, room: &Room) -> Self {
        Self {
            room: handle.clone(),
            snapshot: room.snapshot(),
            targets: room.connections(),
        }
    }
}

//! UseCase: Room 一覧・詳細の取得（HTTP API 用）

use std::sync::Arc;

use crate::domain::{RoomId, RoomSnapshot, SessionRegistry};

/// Room 情報取得のユースケース
pub struct GetRoomsUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 全 Room のスナップショットを作成時刻・ID 順で返す
    pub async fn list(&self) -> Vec<RoomSnapshot> {
        let mut snapshots = Vec::new();
        for room in self.registry.rooms().await {
            snapshots.push(room.lock().await.snapshot());
        }
        snapshots.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.room_id.cmp(&b.room_id))
        });
        snapshots
    }

    /// 指定 Room のスナップショットを返す（不正な ID や存在しない Room は None）
    pub async fn get(&self, room_id: &str) -> Option<RoomSnapshot> {
        let room_id = RoomId::new(room_id).ok()?;
        let room = self.registry.get(&room_id).await?;
        let snapshot = room.lock().await.snapshot();
        Some(snapshot)
    }

    pub async fn count_rooms(&self) -> usize {
        self.registry.count_rooms().await
    }
}

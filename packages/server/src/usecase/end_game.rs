//! UseCase: ゲーム終了処理（ホスト操作）

use std::sync::Arc;

use crate::domain::{RoomId, SessionRegistry};

use super::{error::GameActionError, outcome::RoomBroadcast};

/// ゲーム終了のユースケース
pub struct EndGameUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl EndGameUseCase {
    /// 新しい EndGameUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// ラウンド数に関係なく Room を finished にする
    pub async fn execute(&self, room_id: &str) -> Result<RoomBroadcast, GameActionError> {
        let room_id = RoomId::new(room_id)?;
        let handle = self
            .registry
            .get(&room_id)
            .await
            .ok_or_else(|| GameActionError::RoomNotFound(room_id.to_string()))?;

        let mut room = handle.lock().await;
        room.end_game();
        tracing::info!("Game ended in room '{}'", room_id);
        Ok(RoomBroadcast::of(&handle, &room))
    }
}

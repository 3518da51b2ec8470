//! UseCase: ゲーム開始処理
//!
//! どのフェーズからでも受け付け、ラウンド 1 から（再）開始する。

use std::sync::Arc;

use topten_shared::time::Clock;

use crate::domain::{QuestionProvider, RoomId, SessionRegistry, Timestamp};

use super::{error::GameActionError, outcome::RoomBroadcast};

/// ゲーム開始のユースケース
pub struct StartGameUseCase {
    registry: Arc<dyn SessionRegistry>,
    provider: Arc<dyn QuestionProvider>,
    clock: Arc<dyn Clock>,
}

impl StartGameUseCase {
    /// 新しい StartGameUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        provider: Arc<dyn QuestionProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            provider,
            clock,
        }
    }

    /// ゲーム開始を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RoomBroadcast)` - 開始後のスナップショットと配信先
    /// * `Err(GameActionError::RoomNotFound)` - Room が存在しない
    pub async fn execute(&self, room_id: &str) -> Result<RoomBroadcast, GameActionError> {
        let room_id = RoomId::new(room_id)?;
        let handle = self
            .registry
            .get(&room_id)
            .await
            .ok_or_else(|| GameActionError::RoomNotFound(room_id.to_string()))?;

        let mut room = handle.lock().await;
        room.start_game(
            self.provider.as_ref(),
            Timestamp::new(self.clock.now_millis()),
        );
        tracing::info!("Game started in room '{}'", room_id);
        Ok(RoomBroadcast::of(&handle, &room))
    }
}

//! UseCase: 退出処理
//!
//! `leaveRoom` メッセージと WebSocket 切断の両方で使われる。
//! 接続 ID からプレイヤーを特定して Room から外し、空になった Room は破棄する。

use std::sync::Arc;

use crate::domain::{ConnectionId, LeaveOutcome, SessionRegistry};

/// 退出のユースケース
pub struct LeaveRoomUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 退出を実行
    ///
    /// # Returns
    ///
    /// * `Some(LeaveOutcome)` - プレイヤーが Room から外れた
    /// * `None` - この接続はどの Room にも参加していない
    pub async fn execute(&self, connection: &ConnectionId) -> Option<LeaveOutcome> {
        let outcome = self.registry.leave_by_connection(connection).await?;
        tracing::info!(
            "Player '{}' left room '{}'{}",
            outcome.player.id,
            outcome.room_id,
            if outcome.room_destroyed() {
                " (room destroyed)"
            } else {
                ""
            }
        );
        Some(outcome)
    }
}

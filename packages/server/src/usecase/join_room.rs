//! UseCase: Room への参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 入力値の検証、Room の作成、プレイヤーの追加、接続の登録
//!
//! ### なぜこのテストが必要か
//! - 不正な入力（空の ID・名前）を構造化されたエラーとして拒否することを保証
//! - 人数上限が設定されている場合の拒否を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規 Room への参加、既存 Room への参加
//! - 異常系：必須フィールドが空、人数上限超過

use std::sync::Arc;

use topten_shared::time::Clock;

use crate::domain::{
    CategoryId, ConnectionId, JoinOutcome, JoinRequest, Player, PlayerId, PlayerName, RoomError,
    RoomId, SessionRegistry, Timestamp,
};

use super::error::JoinError;

/// 参加リクエスト（ワイヤー形式の生の値）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCommand {
    pub room_id: String,
    pub player_id: String,
    pub player_name: String,
    pub category_id: String,
}

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    registry: Arc<dyn SessionRegistry>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// 参加を実行
    ///
    /// # Arguments
    ///
    /// * `command` - クライアントから届いた参加リクエスト
    /// * `connection` - 参加する接続の ID
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功（スナップショットと通知対象を含む）
    /// * `Err(JoinError)` - 入力不正または人数上限超過
    pub async fn execute(
        &self,
        command: JoinCommand,
        connection: ConnectionId,
    ) -> Result<JoinOutcome, JoinError> {
        // 1. 入力値を Domain Model に変換
        let room_id = RoomId::new(command.room_id)?;
        let player_id = PlayerId::new(command.player_id)?;
        let player_name = PlayerName::new(command.player_name)?;
        let category_id = CategoryId::new(command.category_id)?;

        // 2. Registry 経由で参加
        let now = Timestamp::new(self.clock.now_millis());
        let request = JoinRequest {
            room_id: room_id.clone(),
            category_id,
            player: Player::new(player_id, player_name, connection, now),
        };
        let outcome = self
            .registry
            .join(request, now)
            .await
            .map_err(|e| match e {
                RoomError::CapacityExceeded { capacity } => JoinError::RoomFull {
                    room_id: room_id.to_string(),
                    capacity,
                },
            })?;

        tracing::info!(
            "Player '{}' joined room '{}' ({} players)",
            outcome.player.id,
            room_id,
            outcome.snapshot.players.len()
        );
        Ok(outcome)
    }
}

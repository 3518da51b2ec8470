//! UseCase: 回答送信処理
//!
//! 回答は question フェーズの Room でのみ受け付ける。結果は送信者にだけ返し、
//! 更新後のスナップショットは Room 全体に配信する。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SubmitAnswerUseCase::execute() メソッド
//! - フェーズによる受付制御、得点計算、スコアの累積
//!
//! ### どのような状況を想定しているか
//! - 正常系：正解（大文字小文字・前後の空白を無視）、不正解
//! - 異常系：lobby / finished の Room への送信、存在しない Room

use std::sync::Arc;

use crate::domain::{AnswerOutcome, GamePhase, PlayerId, RoomId, SessionRegistry};

use super::{error::GameActionError, outcome::RoomBroadcast};

/// 回答送信の結果
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    /// 送信された回答文字列（そのまま）
    pub answer: String,
    /// 送信者にだけ返す判定結果
    pub outcome: AnswerOutcome,
    /// Room 全体に配信する状態
    pub broadcast: RoomBroadcast,
}

/// 回答送信のユースケース
pub struct SubmitAnswerUseCase {
    registry: Arc<dyn SessionRegistry>,
}

impl SubmitAnswerUseCase {
    /// 新しい SubmitAnswerUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 回答を送信
    ///
    /// # Returns
    ///
    /// * `Ok(SubmitAnswerResult)` - 判定結果と配信内容
    /// * `Err(GameActionError::RoomNotFound)` - Room が存在しない
    /// * `Err(GameActionError::InvalidPhase)` - question フェーズ以外
    pub async fn execute(
        &self,
        room_id: &str,
        player_id: &str,
        answer: String,
    ) -> Result<SubmitAnswerResult, GameActionError> {
        let room_id = RoomId::new(room_id)?;
        let player_id = PlayerId::new(player_id)?;
        let handle = self
            .registry
            .get(&room_id)
            .await
            .ok_or_else(|| GameActionError::RoomNotFound(room_id.to_string()))?;

        let mut room = handle.lock().await;
        if room.phase() != GamePhase::Question {
            return Err(GameActionError::InvalidPhase {
                room_id: room_id.to_string(),
                phase: room.phase().as_str(),
            });
        }

        let outcome = room.submit_answer(&player_id, &answer);
        tracing::debug!(
            "Player '{}' answered '{}' in room '{}': correct={}, points={}",
            player_id,
            answer,
            room_id,
            outcome.is_correct,
            outcome.points
        );

        Ok(SubmitAnswerResult {
            answer,
            outcome,
            broadcast: RoomBroadcast::of(&handle, &room),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::{
        StartGameUseCase,
        test_support::{clock, join, provider, registry},
    };
    use crate::infrastructure::registry::InMemorySessionRegistry;

    async fn started_room() -> Arc<InMemorySessionRegistry> {
        let registry = registry();
        join(&registry, "R1", "P1").await;
        StartGameUseCase::new(registry.clone(), provider(), clock())
            .execute("R1")
            .await
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_correct_answer_scores_rank_points() {
        // テスト項目: 1 位の回答（大文字小文字・空白違い）で 1 点が入る
        // given (前提条件):
        let registry = started_room().await;
        let usecase = SubmitAnswerUseCase::new(registry);

        // when (操作):
        let result = usecase
            .execute("R1", "P1", "  sOCCER ".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(result.answer, "  sOCCER ");
        assert_eq!(
            result.outcome,
            AnswerOutcome {
                is_correct: true,
                points: 1,
                new_score: 1
            }
        );
        let p1 = PlayerId::new("P1").unwrap();
        assert_eq!(result.broadcast.snapshot.scores.get(&p1), Some(&1));
        assert_eq!(result.broadcast.snapshot.leaderboard[0].score, 1);
    }

    #[tokio::test]
    async fn test_scores_accumulate_and_wrong_answers_score_nothing() {
        // テスト項目: 正解は累積し、不正解はスコアを変えない
        // given (前提条件):
        let registry = started_room().await;
        let usecase = SubmitAnswerUseCase::new(registry);

        // when (操作):
        usecase.execute("R1", "P1", "Rugby".to_string()).await.unwrap();
        let wrong = usecase
            .execute("R1", "P1", "Curling".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            wrong.outcome,
            AnswerOutcome {
                is_correct: false,
                points: 0,
                new_score: 10
            }
        );
    }

    #[tokio::test]
    async fn test_answer_in_lobby_is_rejected() {
        // テスト項目: lobby の Room への回答は InvalidPhase になりスコアは変わらない
        // given (前提条件):
        let registry = registry();
        join(&registry, "R1", "P1").await;
        let usecase = SubmitAnswerUseCase::new(registry.clone());

        // when (操作):
        let result = usecase.execute("R1", "P1", "Soccer".to_string()).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            GameActionError::InvalidPhase {
                room_id: "R1".to_string(),
                phase: "lobby"
            }
        );
        let room = registry.get(&RoomId::new("R1").unwrap()).await.unwrap();
        let room = room.lock().await;
        assert_eq!(room.score_of(&PlayerId::new("P1").unwrap()), Some(0));
        assert!(room.answers_of(&PlayerId::new("P1").unwrap()).is_empty());
    }

    #[tokio::test]
    async fn test_answer_after_finish_is_rejected() {
        // テスト項目: finished の Room への回答は InvalidPhase になる
        // given (前提条件):
        let registry = started_room().await;
        let room = registry.get(&RoomId::new("R1").unwrap()).await.unwrap();
        room.lock().await.end_game();
        let usecase = SubmitAnswerUseCase::new(registry);

        // when (操作):
        let result = usecase.execute("R1", "P1", "Soccer".to_string()).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(GameActionError::InvalidPhase {
                phase: "finished",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_answer_to_unknown_room() {
        // テスト項目: 存在しない Room への回答は RoomNotFound になる
        // given (前提条件):
        let usecase = SubmitAnswerUseCase::new(registry());

        // when (操作):
        let result = usecase.execute("R9", "P1", "Soccer".to_string()).await;

        // then (期待する結果):
        assert!(result.unwrap_err().is_silent_by_default());
    }
}

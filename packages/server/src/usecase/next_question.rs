//! UseCase: 次の問題へ進む処理
//!
//! 最終ラウンドの後に呼ばれると Room は finished になる。

use std::sync::Arc;

use topten_shared::time::Clock;

use crate::domain::{QuestionProvider, RoomId, SessionRegistry, Timestamp};

use super::{error::GameActionError, outcome::RoomBroadcast};

/// 次の問題へ進むユースケース
pub struct NextQuestionUseCase {
    registry: Arc<dyn SessionRegistry>,
    provider: Arc<dyn QuestionProvider>,
    clock: Arc<dyn Clock>,
}

impl NextQuestionUseCase {
    /// 新しい NextQuestionUseCase を作成
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

    pub async fn execute(&self, room_id: &str) -> Result<RoomBroadcast, GameActionError> {
        let room_id = RoomId::new(room_id)?;
        let handle = self
            .registry
            .get(&room_id)
            .await
            .ok_or_else(|| GameActionError::RoomNotFound(room_id.to_string()))?;

        let mut room = handle.lock().await;
        room.next_question(
            self.provider.as_ref(),
            Timestamp::new(self.clock.now_millis()),
        );
        tracing::info!(
            "Room '{}' advanced to round {} ({})",
            room_id,
            room.current_round(),
            room.phase().as_str()
        );
        Ok(RoomBroadcast::of(&handle, &room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::GamePhase,
        usecase::{
            StartGameUseCase,
            test_support::{clock, join, provider, registry},
        },
    };

    #[tokio::test]
    async fn test_three_rounds_then_finished() {
        // テスト項目: start 後に next を 2 回で最終ラウンド、3 回目で finished になる
        // given (前提条件):
        let registry = registry();
        join(&registry, "R1", "P1").await;
        let (provider, clock) = (provider(), clock());
        StartGameUseCase::new(registry.clone(), provider.clone(), clock.clone())
            .execute("R1")
            .await
            .unwrap();
        let usecase = NextQuestionUseCase::new(registry, provider, clock.clone());

        // when (操作):
        clock.advance(1_000);
        let round2 = usecase.execute("R1").await.unwrap();
        let round3 = usecase.execute("R1").await.unwrap();
        let finished = usecase.execute("R1").await.unwrap();

        // then (期待する結果):
        assert_eq!(round2.snapshot.current_round, 2);
        assert_eq!(round2.snapshot.phase, GamePhase::Question);
        assert_eq!(
            round2.snapshot.question_start_time.map(|t| t.value()),
            Some(clock.now_millis())
        );
        assert_eq!(round3.snapshot.phase, GamePhase::Question);
        assert_eq!(finished.snapshot.phase, GamePhase::Finished);
    }

    #[tokio::test]
    async fn test_next_question_unknown_room() {
        // テスト項目: 存在しない Room への next は RoomNotFound になる
        // given (前提条件):
        let usecase = NextQuestionUseCase::new(registry(), provider(), clock());

        // when (操作):
        let result = usecase.execute("R404").await;

        // then (期待する結果):
        assert!(matches!(result, Err(GameActionError::RoomNotFound(_))));
    }
}

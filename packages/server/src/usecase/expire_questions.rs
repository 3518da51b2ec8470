//! UseCase: 制限時間切れの問題を次へ進める定期処理
//!
//! `auto_advance` が有効なときだけサーバーから定期的に呼ばれる。
//! Room 自体は時間切れを判定するだけで、自分から進むことはない。

use std::sync::Arc;

use topten_shared::time::Clock;

use crate::domain::{GamePhase, QuestionProvider, SessionRegistry, Timestamp};

use super::outcome::RoomBroadcast;

/// 時間切れ処理のユースケース
pub struct ExpireQuestionsUseCase {
    registry: Arc<dyn SessionRegistry>,
    provider: Arc<dyn QuestionProvider>,
    clock: Arc<dyn Clock>,
}

impl ExpireQuestionsUseCase {
    /// 新しい ExpireQuestionsUseCase を作成
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

    /// 時間切れの Room をすべて次の問題へ進め、配信内容を返す
    pub async fn execute(&self) -> Vec<RoomBroadcast> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut advanced = Vec::new();

        for handle in self.registry.rooms().await {
            let mut room = handle.lock().await;
            if room.phase() != GamePhase::Question || !room.is_question_expired(now) {
                continue;
            }
            room.next_question(self.provider.as_ref(), now);
            tracing::info!(
                "Question timed out in room '{}', now round {} ({})",
                room.id(),
                room.current_round(),
                room.phase().as_str()
            );
            advanced.push(RoomBroadcast::of(&handle, &room));
        }

        advanced
    }
}

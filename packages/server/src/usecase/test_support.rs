//! UseCase テスト用の共通ヘルパー

use std::sync::Arc;

use topten_shared::time::FixedClock;

use crate::{
    domain::{
        ConnectionId, Question, RoomSettings, SessionRegistry, question::MockQuestionProvider,
    },
    infrastructure::registry::InMemorySessionRegistry,
};

use super::{JoinCommand, JoinRoomUseCase};

pub const START_TIME: i64 = 1_000_000;

pub fn question() -> Question {
    Question::from_ranked(
        "Most watched sports",
        &[
            "Soccer",
            "Cricket",
            "Basketball",
            "Tennis",
            "Volleyball",
            "Table Tennis",
            "Baseball",
            "Golf",
            "American Football",
            "Rugby",
        ],
    )
}

pub fn provider() -> Arc<MockQuestionProvider> {
    let mut provider = MockQuestionProvider::new();
    provider.expect_pick().returning(|_| question());
    Arc::new(provider)
}

pub fn registry() -> Arc<InMemorySessionRegistry> {
    registry_with(RoomSettings::default())
}

pub fn registry_with(settings: RoomSettings) -> Arc<InMemorySessionRegistry> {
    Arc::new(InMemorySessionRegistry::new(settings))
}

pub fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(START_TIME))
}

pub fn join_command(room: &str, player: &str, category: &str) -> JoinCommand {
    JoinCommand {
        room_id: room.to_string(),
        player_id: player.to_string(),
        player_name: player.to_uppercase(),
        category_id: category.to_string(),
    }
}

/// 指定した Room にプレイヤーを参加させ、接続 ID を返す
pub async fn join(registry: &Arc<InMemorySessionRegistry>, room: &str, player: &str) -> ConnectionId {
    let usecase = JoinRoomUseCase::new(registry.clone() as Arc<dyn SessionRegistry>, clock());
    let connection = ConnectionId::generate();
    usecase
        .execute(join_command(room, player, "sports"), connection)
        .await
        .unwrap();
    connection
}

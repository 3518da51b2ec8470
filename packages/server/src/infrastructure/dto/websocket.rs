//! WebSocket message DTOs.
//!
//! Every frame is a JSON object tagged by `type`; field names are camelCase.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Messages sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Join {
        room_id: String,
        player_id: String,
        player_name: String,
        category_id: String,
    },
    Start {
        room_id: String,
    },
    SubmitAnswer {
        room_id: String,
        player_id: String,
        answer: String,
    },
    NextQuestion {
        room_id: String,
    },
    EndGame {
        room_id: String,
    },
    /// The leaving player is identified by the connection
    LeaveRoom {},
}

impl ClientMessage {
    /// Wire name of the message, as used in `error` replies.
    pub fn event_name(&self) -> &'static str {
        match self {
            ClientMessage::Join { .. } => "join",
            ClientMessage::Start { .. } => "start",
            ClientMessage::SubmitAnswer { .. } => "submitAnswer",
            ClientMessage::NextQuestion { .. } => "nextQuestion",
            ClientMessage::EndGame { .. } => "endGame",
            ClientMessage::LeaveRoom {} => "leaveRoom",
        }
    }
}

/// Messages sent by the server.
///
/// Snapshot-only events carry the snapshot fields inline next to `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    RoomJoined {
        success: bool,
        room: RoomSnapshotDto,
        player: PlayerDto,
    },
    PlayerJoined {
        player: PlayerDto,
        room: RoomSnapshotDto,
    },
    GameStarted(RoomSnapshotDto),
    AnswerResult {
        answer: String,
        is_correct: bool,
        points: u32,
        new_score: u32,
    },
    GameStateUpdate(RoomSnapshotDto),
    NextQuestion(RoomSnapshotDto),
    GameEnded(RoomSnapshotDto),
    PlayerLeft {
        player_id: String,
        room: RoomSnapshotDto,
    },
    Error {
        /// Inbound event that was rejected (`unknown` if it could not be read)
        event: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhaseDto {
    Lobby,
    Question,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntryDto {
    pub text: String,
    pub rank: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    pub title: String,
    pub answers: Vec<AnswerEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub joined_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub player_id: String,
    pub player_name: String,
    pub score: u32,
}

/// Complete public state of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshotDto {
    pub room_id: String,
    pub category_id: String,
    pub game_phase: GamePhaseDto,
    pub current_round: u32,
    pub total_rounds: u32,
    pub current_question: Option<QuestionDto>,
    pub players: Vec<PlayerDto>,
    pub scores: BTreeMap<String, u32>,
    pub leaderboard: Vec<LeaderboardEntryDto>,
    pub question_start_time: Option<i64>,
    /// Milliseconds
    pub question_time_limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_message_uses_camel_case_fields() {
        // テスト項目: join メッセージが camelCase のフィールドで解釈される
        // given (前提条件):
        let json = r#"{"type":"join","roomId":"R1","playerId":"p1","playerName":"Alice","categoryId":"sports"}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            message,
            ClientMessage::Join {
                room_id: "R1".to_string(),
                player_id: "p1".to_string(),
                player_name: "Alice".to_string(),
                category_id: "sports".to_string(),
            }
        );
    }

    #[test]
    fn test_join_without_required_field_fails() {
        // テスト項目: 必須フィールドが欠けた join は解釈に失敗する
        // given (前提条件):
        let json = r#"{"type":"join","roomId":"R1","playerId":"p1"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientMessage>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_leave_room_accepts_empty_payload() {
        // テスト項目: leaveRoom は type のみで解釈できる
        // given (前提条件):
        let json = r#"{"type":"leaveRoom"}"#;

        // when (操作):
        let message: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(message, ClientMessage::LeaveRoom {});
        assert_eq!(message.event_name(), "leaveRoom");
    }

    #[test]
    fn test_answer_result_serialization() {
        // テスト項目: answerResult が type タグ付き camelCase で出力される
        // given (前提条件):
        let message = ServerMessage::AnswerResult {
            answer: "Soccer".to_string(),
            is_correct: true,
            points: 1,
            new_score: 1,
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            serde_json::json!({
                "type": "answerResult",
                "answer": "Soccer",
                "isCorrect": true,
                "points": 1,
                "newScore": 1
            })
        );
    }
}

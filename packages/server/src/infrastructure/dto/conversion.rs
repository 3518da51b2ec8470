//! Conversion logic from domain entities to DTOs.

use topten_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    AnswerEntry, GamePhase, LeaderboardEntry, Player, Question, RoomSnapshot,
};
use crate::infrastructure::dto::{http, websocket as dto};

impl From<GamePhase> for dto::GamePhaseDto {
    fn from(phase: GamePhase) -> Self {
        match phase {
            GamePhase::Lobby => Self::Lobby,
            GamePhase::Question => Self::Question,
            GamePhase::Finished => Self::Finished,
        }
    }
}

impl From<&AnswerEntry> for dto::AnswerEntryDto {
    fn from(entry: &AnswerEntry) -> Self {
        Self {
            text: entry.text.clone(),
            rank: entry.rank,
            points: entry.points,
        }
    }
}

impl From<&Question> for dto::QuestionDto {
    fn from(question: &Question) -> Self {
        Self {
            title: question.title.clone(),
            answers: question.answers.iter().map(Into::into).collect(),
        }
    }
}

impl From<&Player> for dto::PlayerDto {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.as_str().to_string(),
            name: player.name.as_str().to_string(),
            joined_at: player.joined_at.value(),
        }
    }
}

impl From<&LeaderboardEntry> for dto::LeaderboardEntryDto {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            player_id: entry.player_id.as_str().to_string(),
            player_name: entry.player_name.as_str().to_string(),
            score: entry.score,
        }
    }
}

impl From<&RoomSnapshot> for dto::RoomSnapshotDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            room_id: snapshot.room_id.as_str().to_string(),
            category_id: snapshot.category_id.as_str().to_string(),
            game_phase: snapshot.phase.into(),
            current_round: snapshot.current_round,
            total_rounds: snapshot.total_rounds,
            current_question: snapshot.current_question.as_ref().map(Into::into),
            players: snapshot.players.iter().map(Into::into).collect(),
            scores: snapshot
                .scores
                .iter()
                .map(|(id, score)| (id.as_str().to_string(), *score))
                .collect(),
            leaderboard: snapshot.leaderboard.iter().map(Into::into).collect(),
            question_start_time: snapshot.question_start_time.map(|t| t.value()),
            question_time_limit: snapshot.question_time_limit_ms,
        }
    }
}

impl From<&RoomSnapshot> for http::RoomSummaryDto {
    fn from(snapshot: &RoomSnapshot) -> Self {
        Self {
            id: snapshot.room_id.as_str().to_string(),
            category_id: snapshot.category_id.as_str().to_string(),
            game_phase: snapshot.phase.into(),
            players: snapshot
                .players
                .iter()
                .map(|p| p.id.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(snapshot.created_at.value()),
        }
    }
}

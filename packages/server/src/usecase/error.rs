//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueObjectError;

/// 参加処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// 入力値が不正（空の ID など）
    #[error("invalid join payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),

    /// Room の人数上限に達している
    #[error("room '{room_id}' is full (capacity {capacity})")]
    RoomFull { room_id: String, capacity: usize },
}

/// ゲーム操作（start / submitAnswer / nextQuestion / endGame）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameActionError {
    /// 入力値が不正
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),

    /// Room が存在しない
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    /// 現在のフェーズでは受け付けない操作
    #[error("room '{room_id}' is in phase '{phase}'")]
    InvalidPhase { room_id: String, phase: &'static str },
}

impl GameActionError {
    /// 既定では黙って無視する（クライアントに通知しない）エラーかどうか
    pub fn is_silent_by_default(&self) -> bool {
        matches!(
            self,
            GameActionError::RoomNotFound(_) | GameActionError::InvalidPhase { .. }
        )
    }
}

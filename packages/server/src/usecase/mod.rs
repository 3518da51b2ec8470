//! UseCase 層
//!
//! クライアントからの各コマンドに 1 つずつユースケースを用意する。
//! 配信（どの接続に何を送るか）は UI 層の Gateway が担当する。

pub mod end_game;
pub mod error;
pub mod expire_questions;
pub mod get_rooms;
pub mod join_room;
pub mod leave_room;
pub mod next_question;
pub mod outcome;
pub mod start_game;
pub mod submit_answer;

#[cfg(test)]
mod test_support;

pub use end_game::EndGameUseCase;
pub use error::{GameActionError, JoinError};
pub use expire_questions::ExpireQuestionsUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::{JoinCommand, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use next_question::NextQuestionUseCase;
pub use outcome::RoomBroadcast;
pub use start_game::StartGameUseCase;
pub use submit_answer::{SubmitAnswerResult, SubmitAnswerUseCase};

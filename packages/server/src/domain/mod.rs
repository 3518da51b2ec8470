//! Domain layer: game rules and the interfaces the outer layers implement.

pub mod answer_matcher;
pub mod error;
pub mod message_pusher;
pub mod player;
pub mod question;
pub mod registry;
pub mod room;
pub mod value_object;

pub use error::{MessagePushError, RoomError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use player::{LeaderboardEntry, Player};
pub use question::{AnswerEntry, Question, QuestionProvider};
pub use registry::{JoinOutcome, JoinRequest, LeaveOutcome, SessionRegistry, SharedRoom};
pub use room::{
    AnswerOutcome, GamePhase, JoinKind, Room, RoomSettings, RoomSnapshot, ScoringMode,
};
pub use value_object::{CategoryId, ConnectionId, PlayerId, PlayerName, RoomId, Timestamp};

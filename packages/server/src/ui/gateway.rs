//! Realtime gateway.
//!
//! Translates decoded client messages into use case calls and fans the
//! results out as unicast or room-scoped multicast.

use std::sync::Arc;

use thiserror::Error;
use topten_shared::time::Clock;

use crate::{
    domain::{
        ConnectionId, LeaveOutcome, MessagePushError, MessagePusher, PusherChannel,
        QuestionProvider, SessionRegistry, SharedRoom,
    },
    infrastructure::dto::websocket::{ClientMessage, PlayerDto, RoomSnapshotDto, ServerMessage},
    usecase::{
        EndGameUseCase, ExpireQuestionsUseCase, GameActionError, JoinCommand, JoinRoomUseCase,
        LeaveRoomUseCase, NextQuestionUseCase, RoomBroadcast, StartGameUseCase,
        SubmitAnswerUseCase,
    },
};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to decode '{event}' message: {source}")]
    Decode {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

/// Dispatches inbound events of every connection.
pub struct Gateway {
    join_room: JoinRoomUseCase,
    start_game: StartGameUseCase,
    submit_answer: SubmitAnswerUseCase,
    next_question: NextQuestionUseCase,
    end_game: EndGameUseCase,
    leave_room: LeaveRoomUseCase,
    expire_questions: ExpireQuestionsUseCase,
    pusher: Arc<dyn MessagePusher>,
    /// Reply with `error` to unknown rooms and invalid phases instead of
    /// dropping them
    explicit_errors: bool,
}

impl Gateway {
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        provider: Arc<dyn QuestionProvider>,
        pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        explicit_errors: bool,
    ) -> Self {
        Self {
            join_room: JoinRoomUseCase::new(registry.clone(), clock.clone()),
            start_game: StartGameUseCase::new(registry.clone(), provider.clone(), clock.clone()),
            submit_answer: SubmitAnswerUseCase::new(registry.clone()),
            next_question: NextQuestionUseCase::new(
                registry.clone(),
                provider.clone(),
                clock.clone(),
            ),
            end_game: EndGameUseCase::new(registry.clone()),
            leave_room: LeaveRoomUseCase::new(registry.clone()),
            expire_questions: ExpireQuestionsUseCase::new(registry, provider, clock),
            pusher,
            explicit_errors,
        }
    }

    /// Register the outbound channel of a new connection.
    pub async fn connect(&self, connection: ConnectionId, sender: PusherChannel) {
        self.pusher.register_client(connection, sender).await;
        tracing::info!("Connection '{}' opened", connection);
    }

    /// Clean up after a closed connection. Same effect as `leaveRoom`.
    pub async fn disconnect(&self, connection: &ConnectionId) -> Result<(), GatewayError> {
        let result = self.leave(connection).await;
        self.pusher.unregister_client(connection).await;
        tracing::info!("Connection '{}' closed", connection);
        result
    }

    pub async fn count_connections(&self) -> usize {
        self.pusher.count_clients().await
    }

    /// Decode one text frame and dispatch it.
    ///
    /// Undecodable frames are answered with an `error` message before the
    /// decode error is returned.
    pub async fn handle_text(
        &self,
        connection: &ConnectionId,
        text: &str,
    ) -> Result<(), GatewayError> {
        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(source) => {
                let event = event_of(text);
                self.reply_error(connection, &event, source.to_string())
                    .await?;
                return Err(GatewayError::Decode { event, source });
            }
        };
        self.dispatch(connection, message).await
    }

    pub async fn dispatch(
        &self,
        connection: &ConnectionId,
        message: ClientMessage,
    ) -> Result<(), GatewayError> {
        let event = message.event_name();
        tracing::debug!("Connection '{}' sent '{}'", connection, event);

        match message {
            ClientMessage::Join {
                room_id,
                player_id,
                player_name,
                category_id,
            } => {
                let command = JoinCommand {
                    room_id,
                    player_id,
                    player_name,
                    category_id,
                };
                self.join(connection, command).await
            }
            ClientMessage::Start { room_id } => {
                let result = self.start_game.execute(&room_id).await;
                self.broadcast_or_reject(connection, event, result, ServerMessage::GameStarted)
                    .await
            }
            ClientMessage::SubmitAnswer {
                room_id,
                player_id,
                answer,
            } => {
                match self
                    .submit_answer
                    .execute(&room_id, &player_id, answer)
                    .await
                {
                    Ok(result) => {
                        let reply = ServerMessage::AnswerResult {
                            answer: result.answer,
                            is_correct: result.outcome.is_correct,
                            points: result.outcome.points,
                            new_score: result.outcome.new_score,
                        };
                        if let Err(e) = self.push_to(connection, &reply).await {
                            tracing::warn!(
                                "Failed to send answerResult to connection '{}': {}",
                                connection,
                                e
                            );
                        }
                        self.broadcast(&result.broadcast.room, ServerMessage::GameStateUpdate)
                            .await
                    }
                    Err(e) => self.reject(connection, event, e).await,
                }
            }
            ClientMessage::NextQuestion { room_id } => {
                let result = self.next_question.execute(&room_id).await;
                self.broadcast_or_reject(connection, event, result, ServerMessage::NextQuestion)
                    .await
            }
            ClientMessage::EndGame { room_id } => {
                let result = self.end_game.execute(&room_id).await;
                self.broadcast_or_reject(connection, event, result, ServerMessage::GameEnded)
                    .await
            }
            ClientMessage::LeaveRoom {} => self.leave(connection).await,
        }
    }

    /// Advance every room whose question timed out and announce the new state.
    pub async fn run_expiry_sweep(&self) -> Result<(), GatewayError> {
        for broadcast in self.expire_questions.execute().await {
            self.broadcast(&broadcast.room, ServerMessage::NextQuestion)
                .await?;
        }
        Ok(())
    }

    async fn join(
        &self,
        connection: &ConnectionId,
        command: JoinCommand,
    ) -> Result<(), GatewayError> {
        let outcome = match self.join_room.execute(command, *connection).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Join from connection '{}' rejected: {}", connection, e);
                return self.reply_error(connection, "join", e.to_string()).await;
            }
        };

        if let Some(left) = &outcome.left_previous {
            self.announce_leave(left).await?;
        }

        let room = outcome.room.lock().await;
        let snapshot = RoomSnapshotDto::from(&room.snapshot());
        let player = room
            .player(&outcome.player.id)
            .map_or_else(|| PlayerDto::from(&outcome.player), PlayerDto::from);
        let joined = ServerMessage::RoomJoined {
            success: true,
            room: snapshot.clone(),
            player: player.clone(),
        };
        if let Err(e) = self.push_to(connection, &joined).await {
            tracing::warn!("Failed to send roomJoined to connection '{}': {}", connection, e);
        }

        let others: Vec<ConnectionId> = room
            .connections()
            .into_iter()
            .filter(|c| c != connection)
            .collect();
        let content = encode(&ServerMessage::PlayerJoined {
            player,
            room: snapshot,
        })?;
        self.pusher.broadcast(&others, &content).await?;
        Ok(())
    }

    async fn leave(&self, connection: &ConnectionId) -> Result<(), GatewayError> {
        match self.leave_room.execute(connection).await {
            Some(left) => self.announce_leave(&left).await,
            None => Ok(()),
        }
    }

    async fn announce_leave(&self, left: &LeaveOutcome) -> Result<(), GatewayError> {
        if left.room_destroyed() {
            return Ok(());
        }
        let room = left.room.lock().await;
        let content = encode(&ServerMessage::PlayerLeft {
            player_id: left.player.id.to_string(),
            room: RoomSnapshotDto::from(&room.snapshot()),
        })?;
        self.pusher.broadcast(&room.connections(), &content).await?;
        Ok(())
    }

    async fn broadcast_or_reject(
        &self,
        connection: &ConnectionId,
        event: &str,
        result: Result<RoomBroadcast, GameActionError>,
        wrap: fn(RoomSnapshotDto) -> ServerMessage,
    ) -> Result<(), GatewayError> {
        match result {
            Ok(broadcast) => self.broadcast(&broadcast.room, wrap).await,
            Err(e) => self.reject(connection, event, e).await,
        }
    }

    /// Push the current state of `room` to everyone seated in it.
    ///
    /// The room stays locked until the push is queued, so the deliveries of
    /// one room are queued in mutation order and the last one is current.
    async fn broadcast(
        &self,
        room: &SharedRoom,
        wrap: fn(RoomSnapshotDto) -> ServerMessage,
    ) -> Result<(), GatewayError> {
        let room = room.lock().await;
        let content = encode(&wrap(RoomSnapshotDto::from(&room.snapshot())))?;
        self.pusher.broadcast(&room.connections(), &content).await?;
        Ok(())
    }

    async fn reject(
        &self,
        connection: &ConnectionId,
        event: &str,
        error: GameActionError,
    ) -> Result<(), GatewayError> {
        if error.is_silent_by_default() && !self.explicit_errors {
            tracing::debug!("Dropped '{}' from connection '{}': {}", event, connection, error);
            return Ok(());
        }
        tracing::warn!("Rejected '{}' from connection '{}': {}", event, connection, error);
        self.reply_error(connection, event, error.to_string()).await
    }

    async fn reply_error(
        &self,
        connection: &ConnectionId,
        event: &str,
        message: String,
    ) -> Result<(), GatewayError> {
        let reply = ServerMessage::Error {
            event: event.to_string(),
            message,
        };
        self.push_to(connection, &reply).await
    }

    async fn push_to(
        &self,
        connection: &ConnectionId,
        message: &ServerMessage,
    ) -> Result<(), GatewayError> {
        let content = encode(message)?;
        self.pusher.push_to(connection, &content).await?;
        Ok(())
    }
}

fn encode(message: &ServerMessage) -> Result<String, GatewayError> {
    serde_json::to_string(message).map_err(GatewayError::Serialize)
}

/// Best-effort `type` of an undecodable frame.
fn event_of(text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| value.get("type")?.as_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}

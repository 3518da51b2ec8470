//! InMemory SessionRegistry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロック順序
//!
//! registry のロック → room のロック の順で取得します。
//! 参加・退出・破棄はregistry のロックを保持したまま行うため、
//! 検索と変更の間に Room が破棄されることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    CategoryId, ConnectionId, JoinOutcome, JoinRequest, LeaveOutcome, Player, PlayerId, Room,
    RoomError, RoomId, RoomSettings, SessionRegistry, SharedRoom, Timestamp,
};

#[derive(Default)]
struct RegistryState {
    rooms: HashMap<RoomId, SharedRoom>,
    /// connection -> (room, player) index, so disconnects never scan rooms
    connections: HashMap<ConnectionId, (RoomId, PlayerId)>,
    /// latest connection of each player
    player_connections: HashMap<PlayerId, ConnectionId>,
}

impl RegistryState {
    /// Returns the room plus whether it was created and whether it was reset.
    async fn get_or_create(
        &mut self,
        room_id: &RoomId,
        category_id: &CategoryId,
        settings: RoomSettings,
        now: Timestamp,
    ) -> (SharedRoom, bool, bool) {
        if let Some(room) = self.rooms.get(room_id) {
            let room = room.clone();
            let reset = room.lock().await.update_category(category_id.clone());
            if reset {
                tracing::info!(
                    "Room '{}' reset to category '{}'",
                    room_id,
                    category_id
                );
            }
            return (room, false, reset);
        }

        let room = Arc::new(Mutex::new(Room::new(
            room_id.clone(),
            category_id.clone(),
            settings,
            now,
        )));
        self.rooms.insert(room_id.clone(), room.clone());
        tracing::info!("Room '{}' created (category '{}')", room_id, category_id);
        (room, true, false)
    }

    fn track(&mut self, player_id: &PlayerId, room_id: &RoomId, connection: ConnectionId) {
        if let Some(old) = self.player_connections.insert(player_id.clone(), connection)
            && old != connection
            && matches!(
                self.connections.get(&old),
                Some((r, p)) if r == room_id && p == player_id
            )
        {
            // replaced by a rejoin; the old socket no longer speaks for the player
            self.connections.remove(&old);
            tracing::debug!("Connection '{}' superseded by '{}'", old, connection);
        }
        self.connections
            .insert(connection, (room_id.clone(), player_id.clone()));
    }

    fn untrack(&mut self, connection: &ConnectionId) -> Option<(RoomId, PlayerId)> {
        let (room_id, player_id) = self.connections.remove(connection)?;
        if self.player_connections.get(&player_id) == Some(connection) {
            self.player_connections.remove(&player_id);
        }
        Some((room_id, player_id))
    }

    async fn leave(&mut self, connection: &ConnectionId) -> Option<LeaveOutcome> {
        let (room_id, player_id) = self.untrack(connection)?;
        let room = self.rooms.get(&room_id)?.clone();
        let mut guard = room.lock().await;
        let player = guard.remove_player(&player_id)?;

        if guard.is_empty() {
            drop(guard);
            self.rooms.remove(&room_id);
            tracing::info!("Room '{}' destroyed (no players left)", room_id);
            return Some(LeaveOutcome {
                room_id,
                room,
                player,
                remaining: None,
                remaining_connections: Vec::new(),
            });
        }

        let remaining = Some(guard.snapshot());
        let remaining_connections = guard.connections();
        drop(guard);
        Some(LeaveOutcome {
            room_id,
            room,
            player,
            remaining,
            remaining_connections,
        })
    }
}

/// インメモリ SessionRegistry 実装
pub struct InMemorySessionRegistry {
    /// 新規作成される Room の設定
    settings: RoomSettings,
    state: Mutex<RegistryState>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new(settings: RoomSettings) -> Self {
        Self {
            settings,
            state: Mutex::new(RegistryState::default()),
        }
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn get_or_create(
        &self,
        room_id: &RoomId,
        category_id: &CategoryId,
        now: Timestamp,
    ) -> SharedRoom {
        let mut state = self.state.lock().await;
        let (room, _, _) = state
            .get_or_create(room_id, category_id, self.settings, now)
            .await;
        room
    }

    async fn get(&self, room_id: &RoomId) -> Option<SharedRoom> {
        let state = self.state.lock().await;
        state.rooms.get(room_id).cloned()
    }

    async fn remove(&self, room_id: &RoomId) -> bool {
        let mut state = self.state.lock().await;
        let existed = state.rooms.remove(room_id).is_some();
        if existed {
            state.connections.retain(|_, (r, _)| r != room_id);
            tracing::info!("Room '{}' removed", room_id);
        }
        existed
    }

    async fn track_connection(
        &self,
        player_id: &PlayerId,
        room_id: &RoomId,
        connection: ConnectionId,
    ) {
        let mut state = self.state.lock().await;
        state.track(player_id, room_id, connection);
    }

    async fn untrack_connection(&self, connection: &ConnectionId) {
        let mut state = self.state.lock().await;
        state.untrack(connection);
    }

    async fn find_room_and_player_by_connection(
        &self,
        connection: &ConnectionId,
    ) -> Option<(SharedRoom, Player)> {
        let state = self.state.lock().await;
        let (room_id, player_id) = state.connections.get(connection)?;
        let room = state.rooms.get(room_id)?.clone();
        let player = room.lock().await.player(player_id).cloned()?;
        Some((room, player))
    }

    async fn join(&self, request: JoinRequest, now: Timestamp) -> Result<JoinOutcome, RoomError> {
        let mut state = self.state.lock().await;
        let connection = request.player.connection;

        let switching = state
            .connections
            .get(&connection)
            .is_some_and(|(r, p)| r != &request.room_id || p != &request.player.id);

        // a rejected join must not reset the room to another category
        if let Some(existing) = state.rooms.get(&request.room_id) {
            existing.lock().await.check_seat(&request.player.id)?;
        }

        let (room, room_created, category_reset) = state
            .get_or_create(&request.room_id, &request.category_id, self.settings, now)
            .await;

        let mut guard = room.lock().await;
        let kind = match guard.add_player(request.player.clone()) {
            Ok(kind) => kind,
            Err(e) => {
                if guard.is_empty() {
                    drop(guard);
                    state.rooms.remove(&request.room_id);
                }
                return Err(e);
            }
        };
        drop(guard);

        // only leave the previous seat once the new one is secured
        let left_previous = if switching {
            state.leave(&connection).await
        } else {
            None
        };

        let guard = room.lock().await;
        let player = guard
            .player(&request.player.id)
            .cloned()
            .unwrap_or_else(|| request.player.clone());
        let snapshot = guard.snapshot();
        let room_connections = guard.connections();
        drop(guard);

        state.track(&player.id, &request.room_id, connection);

        Ok(JoinOutcome {
            room,
            player,
            kind,
            room_created,
            category_reset,
            snapshot,
            room_connections,
            left_previous,
        })
    }

    async fn leave_by_connection(&self, connection: &ConnectionId) -> Option<LeaveOutcome> {
        let mut state = self.state.lock().await;
        state.leave(connection).await
    }

    async fn rooms(&self) -> Vec<SharedRoom> {
        let state = self.state.lock().await;
        state.rooms.values().cloned().collect()
    }

    async fn count_rooms(&self) -> usize {
        self.state.lock().await.rooms.len()
    }

    async fn count_tracked_connections(&self) -> usize {
        self.state.lock().await.connections.len()
    }
}

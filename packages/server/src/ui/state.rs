//! Shared application state.

use std::sync::Arc;

use crate::usecase::GetRoomsUseCase;

use super::gateway::Gateway;

pub struct AppState {
    /// Gateway（WebSocket イベントの振り分け）
    pub gateway: Arc<Gateway>,
    /// GetRoomsUseCase（HTTP API 用の Room 参照）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
}

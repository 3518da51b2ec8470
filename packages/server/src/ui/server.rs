//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, task::JoinHandle, time::MissedTickBehavior};
use topten_shared::time::Clock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    config::ServerConfig,
    domain::{QuestionProvider, SessionRegistry},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, registry::InMemorySessionRegistry,
    },
    usecase::GetRoomsUseCase,
};

use super::{
    gateway::Gateway,
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Top Ten game server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(config, Arc::new(StaticQuestionCatalog::builtin()), Arc::new(SystemClock));
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    gateway: Arc<Gateway>,
    get_rooms_usecase: Arc<GetRoomsUseCase>,
}

impl Server {
    /// Wire the in-memory registry, the WebSocket pusher and the use cases.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated server configuration
    /// * `provider` - Source of questions for new rounds
    /// * `clock` - Time source for joins, question start and expiry
    pub fn new(
        config: ServerConfig,
        provider: Arc<dyn QuestionProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry: Arc<dyn SessionRegistry> =
            Arc::new(InMemorySessionRegistry::new(config.room));
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let gateway = Arc::new(Gateway::new(
            registry.clone(),
            provider,
            pusher,
            clock,
            config.explicit_errors,
        ));
        let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry));
        Self {
            config,
            gateway,
            get_rooms_usecase,
        }
    }

    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            gateway: self.gateway.clone(),
            get_rooms_usecase: self.get_rooms_usecase.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = self.router();

        let sweep = self
            .config
            .auto_advance
            .then(|| spawn_expiry_sweep(self.gateway.clone(), self.config.sweep_interval));

        tracing::info!("Top Ten server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", listener.local_addr()?);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Some(sweep) = sweep {
            sweep.abort();
        }
        result?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Bind to the configured host and port and serve.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address
    /// or if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.serve(listener).await
    }
}

fn spawn_expiry_sweep(gateway: Arc<Gateway>, period: Duration) -> JoinHandle<()> {
    tracing::info!("Question expiry sweep every {:?}", period);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Err(e) = gateway.run_expiry_sweep().await {
                tracing::error!("Expiry sweep failed: {}", e);
            }
        }
    })
}

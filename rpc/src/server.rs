//! Axum-based RPC server.
//!
//! `POST /` takes one [`RpcCommand`] as a JSON body and answers with the
//! command's response object. `GET /commands` lists the command table.
//! Queries read LMDB synchronously, so each dispatch runs on the blocking
//! thread pool.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{debug, info};

use crate::commands::RpcCommand;
use crate::dispatcher::RpcDispatcher;
use crate::RpcError;

pub struct RpcServer {
    pub addr: SocketAddr,
    dispatcher: Arc<RpcDispatcher>,
}

impl RpcServer {
    pub fn new(addr: SocketAddr, dispatcher: Arc<RpcDispatcher>) -> Self {
        Self { addr, dispatcher }
    }

    /// The HTTP routes, without binding a socket.
    pub fn router(&self) -> Router {
        router(self.dispatcher.clone())
    }

    /// Serve until `shutdown` resolves.
    pub async fn start(
        &self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), RpcError> {
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.addr)))?;
        info!("RPC server listening on {}", self.addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!("RPC server stopped");
        Ok(())
    }
}

pub fn router(dispatcher: Arc<RpcDispatcher>) -> Router {
    Router::new()
        .route("/", post(rpc_handler))
        .route("/commands", get(commands_handler))
        .with_state(dispatcher)
}

async fn rpc_handler(State(dispatcher): State<Arc<RpcDispatcher>>, body: Bytes) -> Response {
    let command: RpcCommand = match serde_json::from_slice(&body) {
        Ok(command) => command,
        Err(e) => {
            debug!(error = %e, "rejected malformed RPC request");
            return RpcError::InvalidRequest(e.to_string()).into_response();
        }
    };
    match tokio::task::spawn_blocking(move || dispatcher.dispatch(command)).await {
        Ok(Ok(value)) => Json(value).into_response(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "RPC command failed");
            e.into_response()
        }
        Err(e) => RpcError::Server(format!("dispatch task failed: {e}")).into_response(),
    }
}

async fn commands_handler(State(dispatcher): State<Arc<RpcDispatcher>>) -> Json<Vec<&'static str>> {
    Json(dispatcher.commands().to_vec())
}

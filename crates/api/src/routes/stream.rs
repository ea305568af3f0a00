//! Live sensor stream endpoint.

use axum::{
    extract::{ws::WebSocketUpgrade, State},
    response::Response,
    Extension,
};

use crate::app::AppState;
use crate::middleware::RequestId;
use crate::services::stream_session;

/// Upgrades to a WebSocket and runs a sensor stream session on it.
///
/// GET /ws
pub async fn stream_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
) -> Response {
    let request_id = request_id.map(|Extension(RequestId(id))| id);
    ws.on_upgrade(move |socket| stream_session::run(socket, state, request_id))
}

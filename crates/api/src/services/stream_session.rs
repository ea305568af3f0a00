//! One live sensor stream connection.
//!
//! A session creates the demo patient, announces itself, starts the
//! producer group and answers client commands until the socket closes.

use axum::extract::ws::{Message, WebSocket};
use domain::models::{ClientCommand, CreatePatientRequest, StreamMessage};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::app::AppState;
use crate::middleware::metrics::{record_stream_closed, record_stream_opened};
use crate::services::multiplexer::{Intervals, Outbox, ProducerGroup};

/// Drives a connection until the client goes away. The upgrade request's
/// id is kept on the session span so stream logs join up with the request.
pub async fn run(socket: WebSocket, state: AppState, request_id: Option<String>) {
    let session_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "stream_session",
        %session_id,
        request_id = request_id.as_deref().unwrap_or("-"),
    );
    session(socket, state).instrument(span).await
}

async fn session(socket: WebSocket, state: AppState) {
    record_stream_opened();
    info!("Stream client connected");

    let (sink, mut frames) = socket.split();
    let (outbox, rx) = Outbox::channel(state.config.stream.queue_capacity);
    let writer = tokio::spawn(write_loop(sink, rx).in_current_span());

    let patient_id = create_demo_patient(&state).await;
    outbox.send(StreamMessage::connected());

    let producers = ProducerGroup::spawn(
        state.store.clone(),
        patient_id,
        outbox.clone(),
        Intervals::from(&state.config.stream),
    );

    while let Some(frame) = frames.next().await {
        match frame {
            Ok(Message::Text(text)) => {
                if let Some(reply) = command_reply(&text) {
                    outbox.send(reply);
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Stream transport error");
                break;
            }
        }
    }

    producers.shutdown().await;
    drop(outbox);
    writer.abort();

    record_stream_closed();
    info!("Stream client disconnected");
}

/// Creates the patient the session's heart rate readings are stored
/// against. The stream still runs, without persistence, if this fails.
async fn create_demo_patient(state: &AppState) -> Option<Uuid> {
    let request = CreatePatientRequest {
        name: state.config.stream.demo_patient_name.clone(),
        age: state.config.stream.demo_patient_age,
    };

    match state.store.create_patient(request).await {
        Ok(patient) => {
            info!(patient_id = %patient.id, "Demo patient created");
            Some(patient.id)
        }
        Err(e) => {
            warn!(error = %e, "Failed to create demo patient, readings will not be stored");
            None
        }
    }
}

/// Reply to a client text frame. Frames that are not JSON get no reply.
pub fn command_reply(text: &str) -> Option<StreamMessage> {
    match ClientCommand::parse(text) {
        Ok(command) => {
            debug!(?command, "Stream command received");
            Some(command.reply())
        }
        Err(e) => {
            warn!(error = %e, "Ignoring malformed stream frame");
            None
        }
    }
}

async fn write_loop(
    mut sink: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<StreamMessage>,
) {
    while let Some(message) = rx.recv().await {
        let text = match serde_json::to_string(&message) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Failed to encode stream message");
                continue;
            }
        };
        if let Err(e) = sink.send(Message::Text(text)).await {
            debug!(error = %e, "Stream writer stopped");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_text(frame: &str) -> Option<serde_json::Value> {
        command_reply(frame).map(|m| serde_json::to_value(m).unwrap())
    }

    #[test]
    fn test_start_and_stop_are_acknowledged() {
        let reply = reply_text(r#"{"command":"startMonitoring"}"#).unwrap();
        assert_eq!(reply["type"], "status");
        assert_eq!(reply["message"], "Monitoring started");

        let reply = reply_text(r#"{"command":"stopMonitoring"}"#).unwrap();
        assert_eq!(reply["type"], "status");
        assert_eq!(reply["message"], "Monitoring stopped");
    }

    #[test]
    fn test_unknown_command_is_an_error() {
        let reply = reply_text(r#"{"command":"reboot"}"#).unwrap();
        assert_eq!(reply["type"], "error");
        assert_eq!(reply["message"], "Unknown command");

        let reply = reply_text(r#"{"other":1}"#).unwrap();
        assert_eq!(reply["message"], "Unknown command");
    }

    #[test]
    fn test_non_json_is_ignored() {
        assert!(reply_text("hello").is_none());
    }
}

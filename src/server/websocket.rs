//! GraphQL subscriptions over WebSocket
//!
//! Speaks both `graphql-transport-ws` (`subscribe`/`next`/`complete`) and the
//! legacy `graphql-ws` dialect (`start`/`data`/`stop`). Replies use the
//! dialect of the message that opened the operation.

use async_graphql::{Request, Response};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::graphql::GraphQLSchema;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    ConnectionInit,
    Subscribe { id: String, payload: Request },
    Start { id: String, payload: Request },
    Complete { id: String },
    Stop { id: String },
    Ping,
    Pong,
    ConnectionTerminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    TransportWs,
    LegacyWs,
}

impl Dialect {
    fn data_type(self) -> &'static str {
        match self {
            Dialect::TransportWs => "next",
            Dialect::LegacyWs => "data",
        }
    }
}

pub async fn graphql_ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.protocols(["graphql-transport-ws", "graphql-ws"])
        .on_upgrade(move |socket| handle_graphql_ws(socket, state.graphql_schema))
}

async fn handle_graphql_ws(socket: WebSocket, schema: GraphQLSchema) {
    let (mut sink, mut source) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink
                .send(Message::Text(message.to_string().into()))
                .await
                .is_err()
            {
                break;
            }
        }
    });

    let mut operations: HashMap<String, JoinHandle<()>> = HashMap::new();

    while let Some(Ok(message)) = source.next().await {
        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => break,
            _ => continue,
        };

        let client_message = match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_message) => client_message,
            Err(e) => {
                tracing::debug!("Ignoring unrecognised WebSocket message: {}", e);
                continue;
            }
        };

        match client_message {
            ClientMessage::ConnectionInit => {
                if tx.send(json!({ "type": "connection_ack" })).is_err() {
                    break;
                }
            }
            ClientMessage::Subscribe { id, payload } => {
                start_operation(&schema, &tx, &mut operations, id, payload, Dialect::TransportWs);
            }
            ClientMessage::Start { id, payload } => {
                start_operation(&schema, &tx, &mut operations, id, payload, Dialect::LegacyWs);
            }
            ClientMessage::Complete { id } | ClientMessage::Stop { id } => {
                if let Some(handle) = operations.remove(&id) {
                    tracing::debug!("Client stopped subscription {}", id);
                    handle.abort();
                }
            }
            ClientMessage::Ping => {
                if tx.send(json!({ "type": "pong" })).is_err() {
                    break;
                }
            }
            ClientMessage::Pong => {}
            ClientMessage::ConnectionTerminate => break,
        }
    }

    for (_, handle) in operations {
        handle.abort();
    }
    drop(tx);
    let _ = writer.await;
}

fn start_operation(
    schema: &GraphQLSchema,
    tx: &mpsc::UnboundedSender<Value>,
    operations: &mut HashMap<String, JoinHandle<()>>,
    id: String,
    request: Request,
    dialect: Dialect,
) {
    operations.retain(|_, handle| !handle.is_finished());
    if let Some(previous) = operations.remove(&id) {
        tracing::warn!("Replacing subscription with duplicate id {}", id);
        previous.abort();
    }

    let schema = schema.clone();
    let tx = tx.clone();
    let operation_id = id.clone();

    let handle = tokio::spawn(async move {
        let mut stream = schema.execute_stream(request).peekable();

        // graphql-transport-ws reports rejected documents with a single
        // `error` message and no `complete`
        if dialect == Dialect::TransportWs {
            if let Some(response) = std::pin::Pin::new(&mut stream).peek().await {
                if is_request_error(response) {
                    let message = json!({
                        "id": operation_id,
                        "type": "error",
                        "payload": response.errors,
                    });
                    let _ = tx.send(message);
                    return;
                }
            }
        }

        while let Some(response) = stream.next().await {
            let message = json!({
                "id": operation_id,
                "type": dialect.data_type(),
                "payload": response,
            });
            if tx.send(message).is_err() {
                return;
            }
        }

        let _ = tx.send(json!({ "id": operation_id, "type": "complete" }));
    });

    operations.insert(id, handle);
}

/// True when the document was rejected before execution (parse or
/// validation errors), as opposed to field errors raised while resolving.
fn is_request_error(response: &Response) -> bool {
    response.data == async_graphql::Value::Null
        && !response.errors.is_empty()
        && response.errors.iter().all(|error| error.path.is_empty())
}

//! SSE streaming endpoint.
//!
//! Event sequence: one `metadata` event with the run id, a `data` event per
//! text chunk (JSON string), then `end`. A failure after the stream has
//! started is reported as an `error` event instead of `end`.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use chainserve_core::ChainError;
use futures::stream::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::dto::{InvokeRequest, StreamError, StreamMetadata};
use crate::error::{chain_status, ApiJson, AppError};
use crate::state::RouteState;

type EventSender = mpsc::Sender<Result<Event, Infallible>>;

/// Streams pipeline output as server-sent events.
pub async fn stream(
    State(state): State<RouteState>,
    ApiJson(req): ApiJson<InvokeRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let runnable = state.binding.runnable.clone();
    runnable.validate(&req.input)?;

    let run_id = Uuid::new_v4();
    info!("Stream {} (run {})", runnable.name(), run_id);

    let (tx, rx) = mpsc::channel::<Result<Event, Infallible>>(100);

    tokio::spawn(async move {
        if !send_event(&tx, "metadata", &StreamMetadata { run_id }).await {
            return;
        }

        let mut chunks = match runnable.stream(req.input).await {
            Ok(chunks) => chunks,
            Err(e) => {
                send_error(&tx, &e).await;
                return;
            }
        };

        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(text) => {
                    if !send_event(&tx, "data", &text).await {
                        debug!("Client went away during run {}", run_id);
                        return;
                    }
                }
                Err(e) => {
                    send_error(&tx, &e).await;
                    return;
                }
            }
        }

        let _ = tx.send(Ok(Event::default().event("end"))).await;
    });

    Ok(Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default()))
}

/// Sends a JSON event; returns `false` once the client has disconnected.
async fn send_event<T: Serialize>(tx: &EventSender, name: &str, data: &T) -> bool {
    let event = match Event::default().event(name).json_data(data) {
        Ok(event) => event,
        Err(e) => {
            error!("Failed to encode {} event: {}", name, e);
            return true;
        }
    };
    tx.send(Ok(event)).await.is_ok()
}

async fn send_error(tx: &EventSender, err: &ChainError) {
    if err.is_client_error() {
        warn!("Stream rejected: {}", err);
    } else {
        error!("Stream error: {}", err);
    }
    let data = StreamError {
        status_code: chain_status(err).as_u16(),
        message: err.to_string(),
    };
    send_event(tx, "error", &data).await;
}

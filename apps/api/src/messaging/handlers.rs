//! Direct messages between users and mentors.

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::models::message::MessageRow;
use crate::state::AppState;

const MESSAGE_COLUMNS: &str = "id, sender_id, receiver_id, content, read, created_at";

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub receiver_id: Option<Uuid>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

/// GET /api/messages/:peer_id
pub async fn handle_get_conversation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(peer_id): Path<Uuid>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    let messages = load_conversation(&state.db, user.id, peer_id).await?;
    Ok(Json(messages))
}

/// POST /api/messages
///
/// Stores the message, pushes it to live subscribers, then returns the
/// refreshed conversation.
pub async fn handle_send_message(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(request): AppJson<SendMessageRequest>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    let receiver_id = request
        .receiver_id
        .ok_or(AppError::Validation("Receiver is required"))?;
    let content = request
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or(AppError::Validation("Message content is required"))?;

    let stored = sqlx::query_as::<_, MessageRow>(&format!(
        r#"
        INSERT INTO messages (sender_id, receiver_id, content, read, created_at)
        VALUES ($1, $2, $3, FALSE, now())
        RETURNING {MESSAGE_COLUMNS}
        "#
    ))
    .bind(user.id)
    .bind(receiver_id)
    .bind(content)
    .fetch_one(&state.db)
    .await?;

    state.messages.publish(stored);

    let messages = load_conversation(&state.db, user.id, receiver_id).await?;
    Ok(Json(messages))
}

/// POST /api/messages/:peer_id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(peer_id): Path<Uuid>,
) -> Result<Json<MarkReadResponse>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE messages SET read = TRUE
        WHERE sender_id = $1 AND receiver_id = $2 AND read IS NOT TRUE
        "#,
    )
    .bind(peer_id)
    .bind(user.id)
    .execute(&state.db)
    .await?;
    Ok(Json(MarkReadResponse {
        updated: result.rows_affected(),
    }))
}

/// GET /api/messages/:peer_id/stream
///
/// Server-sent events carrying each new message the peer sends to the caller.
pub async fn handle_message_stream(
    State(state): State<AppState>,
    user: AuthUser,
    Path(peer_id): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = state
        .messages
        .subscribe(peer_id, user.id)
        .filter_map(|message| async move {
            match Event::default().event("message").json_data(&message) {
                Ok(event) => Some(Ok(event)),
                Err(e) => {
                    warn!("Dropping message {} from live stream: {e}", message.id);
                    None
                }
            }
        });
    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Both directions between the two users, oldest first.
async fn load_conversation(
    pool: &PgPool,
    user_id: Uuid,
    peer_id: Uuid,
) -> Result<Vec<MessageRow>, sqlx::Error> {
    sqlx::query_as::<_, MessageRow>(&format!(
        r#"
        SELECT {MESSAGE_COLUMNS}
        FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at ASC
        "#
    ))
    .bind(user_id)
    .bind(peer_id)
    .fetch_all(pool)
    .await
}

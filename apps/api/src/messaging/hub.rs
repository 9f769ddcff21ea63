//! In-process fan-out of newly sent messages to live subscribers.

use futures::stream::{self, Stream};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;
use uuid::Uuid;

use crate::models::message::MessageRow;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct MessageHub {
    sender: broadcast::Sender<MessageRow>,
}

impl Default for MessageHub {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Delivery is best effort; with no subscribers the message is dropped.
    pub fn publish(&self, message: MessageRow) {
        if self.sender.send(message).is_err() {
            debug!("No live subscribers for new message");
        }
    }

    /// Messages sent from `sender_id` to `receiver_id` after this call.
    /// A subscriber that falls behind skips what it missed.
    pub fn subscribe(&self, sender_id: Uuid, receiver_id: Uuid) -> impl Stream<Item = MessageRow> {
        let rx = self.sender.subscribe();
        stream::unfold(rx, move |mut rx| async move {
            loop {
                match rx.recv().await {
                    Ok(msg) if msg.sender_id == sender_id && msg.receiver_id == receiver_id => {
                        return Some((msg, rx));
                    }
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Live subscriber lagged, skipped {skipped} messages");
                        continue;
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;

    fn message(sender_id: Uuid, receiver_id: Uuid, content: &str) -> MessageRow {
        MessageRow {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            content: content.to_string(),
            read: Some(false),
            created_at: Some(chrono::Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_subscriber_only_sees_its_pair() {
        let hub = MessageHub::new();
        let (mentor, student, stranger) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let stream = hub.subscribe(mentor, student);
        tokio::pin!(stream);

        hub.publish(message(stranger, student, "spam"));
        hub.publish(message(student, mentor, "my own outgoing"));
        hub.publish(message(mentor, student, "hello"));

        let received = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(received.content, "hello");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_harmless() {
        let hub = MessageHub::new();
        hub.publish(message(Uuid::new_v4(), Uuid::new_v4(), "nobody listening"));
    }

    #[tokio::test]
    async fn test_stream_ends_when_hub_dropped() {
        let hub = MessageHub::new();
        let stream = hub.subscribe(Uuid::new_v4(), Uuid::new_v4());
        tokio::pin!(stream);
        drop(hub);
        assert!(stream.next().await.is_none());
    }
}

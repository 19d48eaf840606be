use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

/// Errors raised while publishing a topic notification
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Topic '{0}' is closed")]
    TopicClosed(String),
}

/// Sending side of a named pub/sub topic.
///
/// Handlers that broadcast change notifications take this trait rather than
/// a concrete channel so tests can observe or replace the delivery.
#[async_trait]
pub trait TopicEventSender<V>: Send + Sync {
    /// Publish `event` on `topic`, returning how many subscribers received it.
    async fn send(&self, topic: &str, event: V) -> Result<usize, EventError>;
}

/// Topic-keyed broadcaster built on `tokio::sync::broadcast`.
///
/// Channels are created on first use, either by a subscriber or a publisher,
/// and channels without receivers can be pruned with [`cleanup_idle`].
///
/// ```rust,no_run
/// use commander::utils::EventBroadcaster;
///
/// # async fn example() {
/// let broadcaster = EventBroadcaster::<String, String>::new(100);
///
/// let mut receiver = broadcaster.subscribe("OnPlatformAdded".to_string()).await;
/// broadcaster
///     .publish("OnPlatformAdded".to_string(), "linux".to_string())
///     .await;
///
/// assert_eq!(receiver.recv().await.ok(), Some("linux".to_string()));
/// # }
/// ```
///
/// [`cleanup_idle`]: EventBroadcaster::cleanup_idle
pub struct EventBroadcaster<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    channels: Arc<RwLock<HashMap<K, broadcast::Sender<V>>>>,
    buffer_size: usize,
}

impl<K, V> EventBroadcaster<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a broadcaster buffering up to `buffer_size` events per topic
    /// before slow subscribers start lagging.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Subscribe to every event published on `key` from now on.
    ///
    /// The receiver is taken while the map lock is held, so a concurrent
    /// [`cleanup_idle`](Self::cleanup_idle) cannot prune the channel first.
    pub async fn subscribe(&self, key: K) -> broadcast::Receiver<V> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(&key) {
                return sender.subscribe();
            }
        }

        let mut channels = self.channels.write().await;
        channels
            .entry(key)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .subscribe()
    }

    /// Publish `event` on `key`. Returns the number of receivers reached,
    /// which is `0` when nobody is listening.
    pub async fn publish(&self, key: K, event: V) -> usize {
        let sender = self.get_or_create(key).await;
        sender.send(event).unwrap_or(0)
    }

    /// Number of live receivers on `key`, or 0 if the topic was never opened.
    pub async fn receiver_count(&self, key: &K) -> usize {
        let channels = self.channels.read().await;
        channels
            .get(key)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drop all topics that no longer have receivers, returning how many
    /// were removed.
    pub async fn cleanup_idle(&self) -> usize {
        let mut channels = self.channels.write().await;
        let before = channels.len();
        channels.retain(|_, sender| sender.receiver_count() > 0);
        before - channels.len()
    }

    pub async fn channel_count(&self) -> usize {
        self.channels.read().await.len()
    }

    async fn get_or_create(&self, key: K) -> broadcast::Sender<V> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(&key) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;

        // Another task may have created the channel while we waited
        channels
            .entry(key)
            .or_insert_with(|| broadcast::channel(self.buffer_size).0)
            .clone()
    }
}

impl<K, V> Clone for EventBroadcaster<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
            buffer_size: self.buffer_size,
        }
    }
}

#[async_trait]
impl<V> TopicEventSender<V> for EventBroadcaster<String, V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn send(&self, topic: &str, event: V) -> Result<usize, EventError> {
        Ok(self.publish(topic.to_string(), event).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_and_publish() {
        let broadcaster = EventBroadcaster::<i32, String>::new(10);

        let mut receiver = broadcaster.subscribe(1).await;

        let delivered = broadcaster.publish(1, "test event".to_string()).await;
        assert_eq!(delivered, 1);

        let received = receiver.recv().await.unwrap();
        assert_eq!(received, "test event");
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let broadcaster = EventBroadcaster::<String, i32>::new(10);

        let mut receiver1 = broadcaster.subscribe("key1".to_string()).await;
        let mut receiver2 = broadcaster.subscribe("key1".to_string()).await;

        assert_eq!(broadcaster.publish("key1".to_string(), 42).await, 2);

        assert_eq!(receiver1.recv().await.unwrap(), 42);
        assert_eq!(receiver2.recv().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_topics_are_isolated() {
        let broadcaster = EventBroadcaster::<String, i32>::new(10);

        let mut receiver = broadcaster.subscribe("a".to_string()).await;
        assert_eq!(broadcaster.publish("b".to_string(), 7).await, 0);

        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_without_receivers() {
        let broadcaster = EventBroadcaster::<i32, String>::new(10);

        {
            let _receiver = broadcaster.subscribe(1).await;
        }

        assert_eq!(broadcaster.publish(1, "test".to_string()).await, 0);
    }

    #[tokio::test]
    async fn test_cleanup_idle() {
        let broadcaster = EventBroadcaster::<i32, String>::new(10);

        {
            let _receiver = broadcaster.subscribe(1).await;
            assert_eq!(broadcaster.receiver_count(&1).await, 1);
        }

        assert_eq!(broadcaster.receiver_count(&1).await, 0);
        assert_eq!(broadcaster.cleanup_idle().await, 1);
        assert_eq!(broadcaster.channel_count().await, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_subscribe_survives_concurrent_cleanup() {
        let broadcaster = EventBroadcaster::<String, i32>::new(10);

        let pruner = {
            let broadcaster = broadcaster.clone();
            tokio::spawn(async move {
                loop {
                    broadcaster.cleanup_idle().await;
                    tokio::task::yield_now().await;
                }
            })
        };

        for round in 0..2000 {
            let mut receiver = broadcaster.subscribe("topic".to_string()).await;
            assert_eq!(broadcaster.publish("topic".to_string(), round).await, 1);
            assert_eq!(receiver.try_recv().unwrap(), round);
        }

        pruner.abort();
    }

    #[tokio::test]
    async fn test_topic_event_sender() {
        let broadcaster = EventBroadcaster::<String, i32>::new(10);
        let mut receiver = broadcaster.subscribe("OnPlatformAdded".to_string()).await;

        let sender: &dyn TopicEventSender<i32> = &broadcaster;
        assert_eq!(sender.send("OnPlatformAdded", 5).await, Ok(1));
        assert_eq!(receiver.recv().await.unwrap(), 5);
    }
}

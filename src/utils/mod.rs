pub mod event_broadcaster;

pub use event_broadcaster::{EventBroadcaster, EventError, TopicEventSender};
